use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::responses::AttendanceSummary;
use crate::models::exams::entities::Exam;
use crate::models::fees::responses::FeeSummary;

/// 首页仪表盘聚合数据
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub attendance: AttendanceSummary,
    pub fees: FeeSummary,
    /// 状态为 PENDING 的学生作业数
    pub pending_assignments: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_exam: Option<Exam>,
    pub unread_notifications: i64,
}
