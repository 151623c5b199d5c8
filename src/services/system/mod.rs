use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::system::responses::{ApiInfoResponse, HealthResponse};
use crate::models::{AppStartTime, ApiResponse};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // API 入口说明
    pub async fn api_info(&self, _request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = self.get_config();
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            ApiInfoResponse {
                name: format!("{} API", config.app.system_name),
                version: env!("CARGO_PKG_VERSION").to_string(),
                endpoints: "/api/*".to_string(),
                health: "/api/health".to_string(),
            },
            "API information",
        )))
    }

    // 健康检查
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let now = chrono::Utc::now();
        let uptime = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| (now - start.start_datetime).num_seconds())
            .unwrap_or(0);

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse {
                status: "ok".to_string(),
                timestamp: now,
                uptime,
            },
            "Service is healthy",
        )))
    }
}
