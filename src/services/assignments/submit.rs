use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::unauthenticated;

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    match storage.submit_assignment(user_id, assignment_id).await {
        Ok(Some(row)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Assignment submitted successfully",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::StudentAssignmentNotFound,
            "Assignment not found for this student",
        )),
        Err(e) => {
            tracing::error!(
                "Failed to submit assignment {} for user {}: {}",
                assignment_id,
                user_id,
                e
            );
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to submit assignment",
            ))
        }
    }
}
