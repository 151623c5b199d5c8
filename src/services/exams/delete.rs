use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_exam(id).await {
        Ok(true) => {
            tracing::info!("Deleted exam {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(ApiResponse::respond_error(
            ErrorCode::ExamNotFound,
            "Exam not found",
        )),
        Err(e) => {
            tracing::error!("Failed to delete exam {}: {}", id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to delete exam",
            ))
        }
    }
}
