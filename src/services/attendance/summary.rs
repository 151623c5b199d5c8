use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::UserScopeParams};
use crate::services::{scoped_user_id, unauthenticated};

pub async fn get_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    query: UserScopeParams,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    let target = scoped_user_id(&current, query.user_id);

    match storage.attendance_summary(target).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Attendance summary retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to summarise attendance for {:?}: {}", target, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve attendance summary",
            ))
        }
    }
}
