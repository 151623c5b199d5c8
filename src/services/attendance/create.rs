use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::CreateAttendanceRequest};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required;

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    body: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("subject", &body.subject) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_attendance(body).await {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(
            record,
            "Attendance recorded successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::UserNotFound,
            "Failed to record attendance",
        )),
    }
}
