/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，并把对应的
 * [`User`](crate::models::users::entities::User) 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/fees")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_fees))
 * ```
 *
 * 处理程序中通过 [`RequireJWT::extract_user`] 取得当前用户。
 *
 * 失败时统一返回 401：
 * - 缺少或格式错误的 Authorization 头：`No token provided`
 * - 签名错误、过期或 token 类型不对：`Invalid token`
 * - 用户已被删除：`User not found`
 *
 * 解析出的用户按 token 缓存 `cache.default_ttl` 秒。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

#[derive(Debug, PartialEq, Eq)]
enum AuthFailure {
    NoToken,
    InvalidToken,
    UserNotFound,
    Internal,
}

impl AuthFailure {
    fn status(&self) -> StatusCode {
        match self {
            AuthFailure::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AuthFailure::Internal => ErrorCode::InternalServerError,
            _ => ErrorCode::Unauthorized,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AuthFailure::NoToken => "No token provided",
            AuthFailure::InvalidToken => "Invalid token",
            AuthFailure::UserNotFound => "User not found",
            AuthFailure::Internal => "Internal server error",
        }
    }
}

fn cache_key(token: &str) -> String {
    format!("user:{token}")
}

// 提取并验证 access token，返回对应用户
async fn authenticate(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthFailure::NoToken)?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        debug!("JWT validation failed: {}", err);
        AuthFailure::InvalidToken
    })?;
    let user_id = claims.user_id().ok_or(AuthFailure::InvalidToken)?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    if let Some(cache) = &cache {
        match cache.get_json::<User>(&cache_key(token)).await {
            CacheResult::Found(user) if user.id == user_id => return Ok(user),
            CacheResult::Found(_) | CacheResult::ExistsButNoValue => {
                cache.remove(&cache_key(token)).await;
            }
            CacheResult::NotFound => {}
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage is not registered in app data");
            AuthFailure::Internal
        })?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            AuthFailure::Internal
        })?
        .ok_or(AuthFailure::UserNotFound)?;

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key(token), &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for user {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    info!(
                        "JWT authentication failed for {} {}: {}",
                        req.method(),
                        req.path(),
                        failure.message()
                    );
                    Ok(req.into_response(
                        create_error_response(failure.status(), failure.code(), failure.message())
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 处理程序中读取当前用户
impl RequireJWT {
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}
