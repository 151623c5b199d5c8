use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{
    ApiResponse, ErrorCode, notifications::requests::CreateNotificationRequest,
};
use crate::utils::validate::validate_required;

pub async fn create_notification(
    service: &NotificationService,
    request: &HttpRequest,
    body: CreateNotificationRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("title", &body.title) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(body.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::UserNotFound,
                "User not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to look up recipient {}: {}", body.user_id, e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create notification",
            ));
        }
    }

    match storage.create_notification(body).await {
        Ok(notification) => Ok(HttpResponse::Created().json(ApiResponse::success(
            notification,
            "Notification created successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to create notification: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create notification",
            ))
        }
    }
}
