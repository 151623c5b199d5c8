use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::utils::validate::{validate_http_url, validate_name};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_user(request) else {
        return Ok(ApiResponse::respond_error(
            ErrorCode::Unauthorized,
            "Authentication required",
        ));
    };

    // 本人或教师可以修改
    if current.id != user_id && !current.is_teacher() {
        return Ok(ApiResponse::respond_error(
            ErrorCode::CanNotUpdateOtherUser,
            "Cannot update other users",
        ));
    }

    if let Some(ref name) = update_data.name
        && let Err(msg) = validate_name(name)
    {
        return Ok(ApiResponse::respond_error(ErrorCode::UserNameInvalid, msg));
    }
    if let Some(ref avatar) = update_data.avatar
        && let Err(msg) = validate_http_url(avatar)
    {
        return Ok(ApiResponse::respond_error(ErrorCode::UserAvatarInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            tracing::info!("User {} updated profile of user {}", current.id, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Ok(ApiResponse::respond_error(
            ErrorCode::UserNotFound,
            "User not found",
        )),
        Err(e) => {
            tracing::error!("Failed to update user {}: {}", user_id, e);
            Ok(ApiResponse::respond_error(
                ErrorCode::UserUpdateFailed,
                "Failed to update user",
            ))
        }
    }
}
