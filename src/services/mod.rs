pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod notifications;
pub mod system;
pub mod users;

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use exams::ExamService;
pub use fees::FeeService;
pub use notifications::NotificationService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::errors::ErpError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 取存储句柄
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not configured")
        })
}

/// 存储层错误转响应：NotFound 类错误映射为 404，其余记录日志后返回 500
pub(crate) fn storage_error_response(
    err: ErpError,
    not_found_code: ErrorCode,
    context: &str,
) -> HttpResponse {
    if err.is_not_found() {
        return ApiResponse::respond_error(not_found_code, err.message());
    }
    tracing::error!("{}: {}", context, err);
    ApiResponse::respond_error(ErrorCode::InternalServerError, context)
}

/// 学生只能查看自己的数据；教师可指定 userId，不指定时为全校范围
pub(crate) fn scoped_user_id(
    current: &crate::models::users::entities::User,
    requested: Option<i64>,
) -> Option<i64> {
    if current.is_teacher() {
        requested
    } else {
        Some(current.id)
    }
}

/// 未认证时的统一响应（正常情况下已被中间件拦截）
pub(crate) fn unauthenticated() -> HttpResponse {
    ApiResponse::respond_error(ErrorCode::Unauthorized, "Authentication required")
}
