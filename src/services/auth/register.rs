use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::RegisterRequest, responses::AuthResponse},
    users::requests::CreateUserRequest,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(ApiResponse::respond_error(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(ApiResponse::respond_error(ErrorCode::UserPasswordInvalid, msg));
    }
    if let Err(msg) = validate_name(&register_request.name) {
        return Ok(ApiResponse::respond_error(ErrorCode::UserNameInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::UserEmailAlreadyExists,
                "Email already registered",
            ));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Register lookup failed: {}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::RegisterFailed,
                "Registration failed",
            ));
        }
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::RegisterFailed,
                "Registration failed",
            ));
        }
    };

    let create = CreateUserRequest {
        email: register_request.email.trim().to_string(),
        password: password_hash,
        name: register_request.name.trim().to_string(),
        role: register_request.role,
        avatar: None,
        grade: register_request.grade,
        section: register_request.section,
        roll_no: register_request.roll_no,
        department: register_request.department,
    };

    let user = match storage.create_user(create).await {
        Ok(user) => user,
        // 并发注册同一邮箱时，预检查可能都已通过
        Err(e) if e.is_conflict() => {
            return Ok(ApiResponse::respond_error(
                ErrorCode::UserEmailAlreadyExists,
                "Email already registered",
            ));
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::RegisterFailed,
                "Registration failed",
            ));
        }
    };

    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Registration succeeded but token generation failed",
            ));
        }
    };

    tracing::info!("Registered {} user {}", user.role, user.email);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = AuthResponse {
        token: token_pair.access_token,
        expires_in: service.get_config().jwt.access_token_expiry * 60,
        user,
    };

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Registration successful")))
}
