use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{
    ApiResponse, CountResponse, ErrorCode, notifications::requests::BroadcastNotificationRequest,
};
use crate::utils::validate::validate_required;

pub async fn broadcast(
    service: &NotificationService,
    request: &HttpRequest,
    body: BroadcastNotificationRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("title", &body.title) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.broadcast_notification(body).await {
        Ok(count) => {
            tracing::info!("Broadcast notification to {} students", count);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CountResponse {
                    count: count as i64,
                },
                "Notification broadcast successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to broadcast notification: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to broadcast notification",
            ))
        }
    }
}
