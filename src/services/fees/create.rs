use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::{ApiResponse, ErrorCode, fees::requests::CreateFeeRequest};
use crate::utils::validate::validate_required;

pub async fn create_fee(
    service: &FeeService,
    request: &HttpRequest,
    body: CreateFeeRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required("title", &body.title) {
        return Ok(ApiResponse::respond_error(ErrorCode::BadRequest, msg));
    }
    if !body.amount.is_finite() || body.amount <= 0.0 {
        return Ok(ApiResponse::respond_error(
            ErrorCode::FeeAmountInvalid,
            "Amount must be greater than 0",
        ));
    }

    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(body.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::UserNotFound,
                "User not found",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to look up fee owner {}: {}", body.user_id, e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create fee",
            ));
        }
    }

    match storage.create_fee(body).await {
        Ok(fee) => Ok(HttpResponse::Created().json(ApiResponse::success(
            fee,
            "Fee created successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to create fee: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to create fee",
            ))
        }
    }
}
