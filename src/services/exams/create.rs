use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode, exams::requests::CreateExamRequest};
use crate::utils::validate::validate_required;

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    body: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("subject", &body.subject) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_exam(body).await {
        Ok(exam) => {
            tracing::info!("Scheduled exam {} ({}) on {}", exam.id, exam.subject, exam.date);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                exam,
                "Exam created successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to create exam: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create exam",
            ))
        }
    }
}
