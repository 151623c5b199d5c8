pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod notifications;
pub mod system;
pub mod users;

pub use common::{ApiResponse, CountResponse};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 按模块分段：1xxx 通用，2xxx 认证，3xxx 用户，4xxx 考勤，5xxx 费用，
/// 6xxx 作业，7xxx 考试，8xxx 通知，9xxx 班级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    InvalidRefreshToken = 2002,

    UserNotFound = 3000,
    UserEmailAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameInvalid = 3004,
    UserAvatarInvalid = 3005,
    UserUpdateFailed = 3006,
    CanNotUpdateOtherUser = 3007,

    AttendanceNotFound = 4000,

    FeeNotFound = 5000,
    FeeAmountInvalid = 5001,
    FeeStatusNotAllowed = 5002,

    AssignmentNotFound = 6000,
    StudentAssignmentNotFound = 6001,

    ExamNotFound = 7000,

    NotificationNotFound = 8000,

    ClassNotFound = 9000,
    ClassFieldInvalid = 9001,
}

impl ErrorCode {
    /// 错误码对应的 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::Unauthorized | ErrorCode::AuthFailed | ErrorCode::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            ErrorCode::Forbidden | ErrorCode::CanNotUpdateOtherUser => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::UserNotFound
            | ErrorCode::AttendanceNotFound
            | ErrorCode::FeeNotFound
            | ErrorCode::AssignmentNotFound
            | ErrorCode::StudentAssignmentNotFound
            | ErrorCode::ExamNotFound
            | ErrorCode::NotificationNotFound
            | ErrorCode::ClassNotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalServerError
            | ErrorCode::RegisterFailed
            | ErrorCode::UserUpdateFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::BadRequest
            | ErrorCode::UserEmailAlreadyExists
            | ErrorCode::UserEmailInvalid
            | ErrorCode::UserPasswordInvalid
            | ErrorCode::UserNameInvalid
            | ErrorCode::UserAvatarInvalid
            | ErrorCode::FeeAmountInvalid
            | ErrorCode::FeeStatusNotAllowed
            | ErrorCode::ClassFieldInvalid => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::RateLimitExceeded.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ErrorCode::UserEmailAlreadyExists.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::RegisterFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCode::RateLimitExceeded as i32, 1029);
    }
}
