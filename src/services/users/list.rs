use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UserListParams};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_users(query.role).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            users,
            "User list retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve user list",
            ))
        }
    }
}
