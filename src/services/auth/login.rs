use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::AuthResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::{validate_email, validate_password};

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_email(&login_request.email) {
        return Ok(ApiResponse::respond_error(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password(&login_request.password) {
        return Ok(ApiResponse::respond_error(ErrorCode::UserPasswordInvalid, msg));
    }

    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let user = match storage.get_user_by_email(&login_request.email).await {
        Ok(Some(user)) if verify_password(&login_request.password, &user.password_hash) => user,
        Ok(_) => {
            tracing::info!("Failed login attempt for {}", login_request.email);
            return Ok(ApiResponse::respond_error(
                ErrorCode::AuthFailed,
                "Invalid credentials",
            ));
        }
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Login failed",
            ));
        }
    };

    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Login failed, unable to generate token",
            ));
        }
    };

    tracing::info!("User {} logged in", user.email);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = AuthResponse {
        token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
