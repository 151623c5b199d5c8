use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode, exams::requests::UpdateExamRequest};
use crate::utils::validate::validate_required;

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
    body: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref subject) = body.subject
        && let Err(msg) = validate_required("subject", subject)
    {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_exam(id, body).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exam,
            "Exam updated successfully",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::ExamNotFound,
            "Exam not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update exam {}: {}", id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update exam",
            ))
        }
    }
}
