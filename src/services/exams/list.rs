use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_exams(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_exams().await {
        Ok(exams) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exams,
            "Exams retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list exams: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve exams",
            ))
        }
    }
}
