use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::GradeAssignmentRequest};
use crate::utils::validate::validate_required;

pub async fn grade_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    body: GradeAssignmentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("grade", &body.grade) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    let student_id = body.student_id;

    match storage
        .grade_assignment(student_id, assignment_id, body.grade.trim().to_string())
        .await
    {
        Ok(Some(row)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Assignment graded successfully",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::StudentAssignmentNotFound,
            "Assignment not found for this student",
        )),
        Err(e) => {
            tracing::error!(
                "Failed to grade assignment {} for student {}: {}",
                assignment_id,
                student_id,
                e
            );
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to grade assignment",
            ))
        }
    }
}
