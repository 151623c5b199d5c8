use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 构造错误响应，HTTP 状态码由错误码决定
    pub fn respond_error(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(code.http_status()).json(Self::error_empty(code, message))
    }
}

// 批量操作影响的记录数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::error_empty(
            ErrorCode::FeeNotFound,
            "Fee not found",
        ))
        .unwrap();
        assert_eq!(body["code"], 5000);
        assert_eq!(body["message"], "Fee not found");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_respond_error_status() {
        let resp = ApiResponse::respond_error(ErrorCode::CanNotUpdateOtherUser, "nope");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = ApiResponse::respond_error(ErrorCode::UserEmailAlreadyExists, "dup");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
