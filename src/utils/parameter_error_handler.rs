//! JSON / Query 参数解析错误统一转换为 400 响应

use actix_web::{HttpRequest, error::InternalError, error::JsonPayloadError, error::QueryPayloadError};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        other => format!("Invalid request body: {other}"),
    };
    let response = ApiResponse::respond_error(ErrorCode::BadRequest, message);
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query string error on {}: {}", req.path(), err);
    let response =
        ApiResponse::respond_error(ErrorCode::BadRequest, format!("Invalid query parameters: {err}"));
    InternalError::from_response(err, response).into()
}
