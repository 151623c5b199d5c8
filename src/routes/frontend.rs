//! 前端静态资源路由
//!
//! 构建产物通过 rust-embed 在编译期嵌入，找不到的路径回退到
//! `index.html`，由前端路由接管。`/api/` 下未匹配的路径返回 JSON 404。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// Vite 产物文件名带 hash，可以长期缓存
fn is_immutable(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            extension(path),
            "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp"
        )
}

fn is_api_path(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    path == "api" || path.starts_with("api/")
}

fn resolve(path: &str) -> Option<(&str, Vec<u8>)> {
    let path = path.trim_start_matches('/');
    if !path.is_empty()
        && let Some(file) = FrontendAssets::get(path)
    {
        return Some((path, file.data.into_owned()));
    }
    FrontendAssets::get(INDEX).map(|file| (INDEX, file.data.into_owned()))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let tail = req.match_info().query("tail");

    if is_api_path(tail) {
        return Ok(ApiResponse::respond_error(
            ErrorCode::NotFound,
            "API endpoint not found",
        ));
    }

    match resolve(tail) {
        Some((path, data)) => {
            let cache_control = if is_immutable(path) {
                "public, max-age=31536000, immutable"
            } else {
                "no-cache"
            };
            Ok(HttpResponse::Ok()
                .content_type(mime_type(path))
                .insert_header(("Cache-Control", cache_control))
                .body(data))
        }
        None => Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Frontend assets are not embedded in this build")),
    }
}

/// 其余 GET 请求都交给前端，必须最后注册
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            mime_type("assets/app.mjs"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(mime_type("assets/index.css"), "text/css; charset=utf-8");
        assert_eq!(mime_type("favicon.ico"), "image/x-icon");
        assert_eq!(mime_type("README"), "application/octet-stream");
    }

    #[test]
    fn test_is_immutable() {
        assert!(is_immutable("assets/index-3f2a.js"));
        assert!(is_immutable("assets/logo.svg"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("logo.svg"));
    }

    #[test]
    fn test_unknown_route_falls_back_to_index() {
        // build.rs 保证 index.html 一定存在
        let (path, _) = resolve("/dashboard/fees").unwrap();
        assert_eq!(path, INDEX);
        let (path, _) = resolve("").unwrap();
        assert_eq!(path, INDEX);
    }

    #[test]
    fn test_is_api_path() {
        assert!(is_api_path("api/unknown"));
        assert!(is_api_path("/api/fees/9/extra"));
        assert!(is_api_path("api"));
        assert!(!is_api_path("apiary"));
        assert!(!is_api_path("dashboard/api"));
    }

    #[actix_web::test]
    async fn test_unknown_api_path_gets_json_not_found() {
        use actix_web::{App, http::StatusCode, test};

        let app = test::init_service(App::new().configure(configure_frontend_routes)).await;

        let req = test::TestRequest::get().uri("/api/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::NotFound as i32);

        let req = test::TestRequest::get().uri("/attendance").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
