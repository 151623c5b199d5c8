use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::UpdateAttendanceRequest};

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    body: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_attendance_status(id, body.status).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update attendance {}: {}", id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update attendance",
            ))
        }
    }
}
