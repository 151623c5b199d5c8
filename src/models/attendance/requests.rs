use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::utils::datetime;

// 考勤列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "datetime::query_option::deserialize")]
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "datetime::query_option::deserialize")]
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
}

// 考勤列表查询（存储层，已按角色确定目标用户）
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub user_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// 汇总/用户范围查询参数，费用模块复用
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UserScopeParams {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub user_id: i64,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceEntry {
    pub user_id: i64,
    pub status: AttendanceStatus,
}

// 批量点名
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceRequest {
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub subject: String,
    pub records: Vec<BulkAttendanceEntry>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: AttendanceStatus,
}
