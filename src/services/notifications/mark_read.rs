use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::unauthenticated;

pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    // 别人的通知与不存在的通知一样返回 404
    match storage.mark_notification_read(id, user_id).await {
        Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notification,
            "Notification marked as read",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => {
            tracing::error!("Failed to mark notification {} read: {}", id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update notification",
            ))
        }
    }
}

pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    match storage.mark_all_notifications_read(user_id).await {
        Ok(marked) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse {
                success: true,
                marked_count: marked as i64,
            },
            "All notifications marked as read",
        ))),
        Err(e) => {
            tracing::error!("Failed to mark all notifications read for {}: {}", user_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update notifications",
            ))
        }
    }
}
