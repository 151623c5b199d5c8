use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    body: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("subject", &body.subject)
        .and_then(|_| validate_required("title", &body.title))
    {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_assignment(body).await {
        Ok(created) => {
            tracing::info!(
                "Created assignment {} for {} students",
                created.assignment.id,
                created.students.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::UserNotFound,
            "Failed to create assignment",
        )),
    }
}
