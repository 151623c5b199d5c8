//! 首页仪表盘
//!
//! 学生看到自己的出勤、费用与作业；教师看到全校汇总。
//! 未读通知始终是调用者本人的。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::dashboard::responses::DashboardResponse;
use crate::models::fees::responses::FeeSummary;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{scoped_user_id, unauthenticated};

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(current) = RequireJWT::extract_user(request) else {
            return Ok(unauthenticated());
        };

        let storage = self.get_storage(request)?;
        match build_dashboard(storage.as_ref(), &current).await {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => {
                tracing::error!("Failed to build dashboard for user {}: {}", current.id, e);
                Ok(ApiResponse::respond_error(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve dashboard",
                ))
            }
        }
    }
}

pub async fn build_dashboard(storage: &dyn Storage, current: &User) -> Result<DashboardResponse> {
    let scope = scoped_user_id(current, None);

    let attendance = storage.attendance_summary(scope).await?;
    let fees = storage.list_fees(scope).await?;
    let pending = storage.count_pending_assignments(scope).await?;
    let next_exam = storage
        .list_upcoming_exams(chrono::Utc::now(), 1)
        .await?
        .into_iter()
        .next();
    let unread = storage.count_unread_notifications(current.id).await?;

    Ok(DashboardResponse {
        attendance,
        fees: FeeSummary::from_fees(&fees),
        pending_assignments: pending as i64,
        next_exam,
        unread_notifications: unread as i64,
    })
}
