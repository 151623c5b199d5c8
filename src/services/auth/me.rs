use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::AuthService;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(ApiResponse::respond_error(
            ErrorCode::Unauthorized,
            "Authentication required",
        ));
    };

    // 中间件中的用户可能来自缓存，这里以数据库为准
    let storage = service.get_storage(request)?;
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Current user"))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::UserNotFound,
            "User not found",
        )),
        Err(e) => {
            tracing::error!("Failed to load current user {}: {}", user_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to load user",
            ))
        }
    }
}
