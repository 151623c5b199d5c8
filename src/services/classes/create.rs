use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, validate_class_fields};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_class_fields(Some(&class_data.name), Some(&class_data.subject)) {
        return Ok(ApiResponse::respond_error(ErrorCode::ClassFieldInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.id, class.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                class,
                "Class created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create class: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create class",
            ))
        }
    }
}
