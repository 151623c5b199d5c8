use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::requests::{AttendanceListParams, AttendanceListQuery},
};
use crate::services::{scoped_user_id, unauthenticated};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    let list_query = AttendanceListQuery {
        user_id: scoped_user_id(&current, query.user_id),
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match storage.list_attendance(list_query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list attendance: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve attendance",
            ))
        }
    }
}
