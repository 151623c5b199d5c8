use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(ApiResponse::respond_error(
            ErrorCode::ClassNotFound,
            "Class not found",
        )),
        Err(e) => {
            error!("Failed to delete class {}: {}", class_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to delete class",
            ))
        }
    }
}
