use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, auth::responses::RefreshTokenResponse};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(ApiResponse::respond_error(
            ErrorCode::InvalidRefreshToken,
            "No refresh token provided",
        ));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Rejected refresh token: {}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InvalidRefreshToken,
                "Invalid refresh token",
            ));
        }
    };

    let Some(user_id) = claims.user_id() else {
        return Ok(ApiResponse::respond_error(
            ErrorCode::InvalidRefreshToken,
            "Invalid refresh token",
        ));
    };

    // 用户可能已被删除，或角色已变化
    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::InvalidRefreshToken,
                "User not found",
            ));
        }
        Err(e) => {
            tracing::error!("Refresh lookup failed for user {}: {}", user_id, e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Token refresh failed",
            ));
        }
    };

    match JwtUtils::generate_access_token(user.id, &user.email, &user.role.to_string()) {
        Ok(token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                token,
                expires_in: JwtUtils::access_token_ttl_secs(),
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Token refresh failed",
            ))
        }
    }
}
