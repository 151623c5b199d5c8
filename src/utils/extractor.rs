//! 路径参数提取器

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径中的 `{id}`，必须是正整数
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    fn parse(raw: &str) -> Option<i64> {
        raw.parse::<i64>().ok().filter(|id| *id > 0)
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        let result = Self::parse(raw).map(SafeIDI64).ok_or_else(|| {
            let response = ApiResponse::respond_error(
                ErrorCode::BadRequest,
                format!("Invalid id: '{raw}'"),
            );
            InternalError::from_response("invalid path id", response).into()
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(SafeIDI64::parse("12"), Some(12));
        assert_eq!(SafeIDI64::parse("0"), None);
        assert_eq!(SafeIDI64::parse("-3"), None);
        assert_eq!(SafeIDI64::parse("abc"), None);
        assert_eq!(SafeIDI64::parse("1; DROP TABLE users"), None);
    }
}
