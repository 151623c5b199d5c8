use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, UPCOMING_EXAM_LIMIT};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_upcoming(
    service: &ExamService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_upcoming_exams(chrono::Utc::now(), UPCOMING_EXAM_LIMIT)
        .await
    {
        Ok(exams) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exams,
            "Upcoming exams retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list upcoming exams: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve upcoming exams",
            ))
        }
    }
}
