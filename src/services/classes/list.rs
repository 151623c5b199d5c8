use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_classes().await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Class list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list classes: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve class list",
            ))
        }
    }
}
