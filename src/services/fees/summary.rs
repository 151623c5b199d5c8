use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, attendance::requests::UserScopeParams, fees::responses::FeeSummary,
};
use crate::services::{scoped_user_id, unauthenticated};

pub async fn get_summary(
    service: &FeeService,
    request: &HttpRequest,
    query: UserScopeParams,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(unauthenticated());
    };

    let storage = service.get_storage(request)?;
    match storage.list_fees(scoped_user_id(&current, query.user_id)).await {
        Ok(fees) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FeeSummary::from_fees(&fees),
            "Fee summary retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to summarise fees: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve fee summary",
            ))
        }
    }
}
