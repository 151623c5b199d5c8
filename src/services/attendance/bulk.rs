use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, CountResponse, ErrorCode, attendance::requests::BulkAttendanceRequest,
};
use crate::services::storage_error_response;
use crate::utils::validate::validate_required;

pub async fn bulk_create(
    service: &AttendanceService,
    request: &HttpRequest,
    body: BulkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("subject", &body.subject) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    let subject = body.subject.clone();

    match storage.bulk_create_attendance(body).await {
        Ok(count) => {
            tracing::info!("Recorded {} attendance rows for {}", count, subject);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CountResponse {
                    count: count as i64,
                },
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::UserNotFound,
            "Failed to record attendance",
        )),
    }
}
