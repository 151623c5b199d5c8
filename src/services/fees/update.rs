use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{entities::FeeStatus, requests::UpdateFeeRequest},
};
use crate::services::unauthenticated;

pub async fn update_fee(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
    body: UpdateFeeRequest,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;

    let fee = match storage.get_fee_by_id(id).await {
        Ok(Some(fee)) => fee,
        Ok(None) => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::FeeNotFound,
                "Fee not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to load fee {}: {}", id, e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update fee",
            ));
        }
    };

    // 学生只能把自己的费用标记为已缴
    if !current.is_teacher() && fee.user_id != current.id {
        return Ok(ApiResponse::respond_error(
            ErrorCode::Forbidden,
            "Cannot update other users' fees",
        ));
    }
    if !FeeStatus::allowed_for(current.role).contains(&body.status) {
        return Ok(ApiResponse::respond_error(
            ErrorCode::FeeStatusNotAllowed,
            "Invalid status",
        ));
    }

    match storage.update_fee_status(id, body.status).await {
        Ok(Some(fee)) => {
            tracing::info!("User {} set fee {} to {}", current.id, id, fee.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Fee updated successfully")))
        }
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::FeeNotFound,
            "Fee not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update fee {}: {}", id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to update fee",
            ))
        }
    }
}
