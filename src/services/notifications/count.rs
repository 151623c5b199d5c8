use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::unauthenticated;

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    match storage.count_unread_notifications(user_id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse {
                count: count as i64,
            },
            "Unread count retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to count unread notifications for {}: {}", user_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to count unread notifications",
            ))
        }
    }
}
