use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{ClassService, validate_class_fields};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) =
        validate_class_fields(update_data.name.as_deref(), update_data.subject.as_deref())
    {
        return Ok(ApiResponse::respond_error(ErrorCode::ClassFieldInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::ClassNotFound,
            "Class not found",
        )),
        Err(e) => {
            error!("Failed to update class {}: {}", class_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update class",
            ))
        }
    }
}
