use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::unauthenticated;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;

    const MESSAGE: &str = "Assignments retrieved successfully";
    let result = if current.is_teacher() {
        storage
            .list_assignments_with_students()
            .await
            .map(|list| HttpResponse::Ok().json(ApiResponse::success(list, MESSAGE)))
    } else {
        storage
            .list_student_assignments(current.id)
            .await
            .map(|list| HttpResponse::Ok().json(ApiResponse::success(list, MESSAGE)))
    };

    match result {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!("Failed to list assignments for user {}: {}", current.id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve assignments",
            ))
        }
    }
}
