use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::utils::datetime;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub subject: String,
    pub title: String,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    #[ts(type = "string")]
    pub due_date: DateTime<Utc>,
    /// 分配给哪些学生，留空则只创建作业
    pub student_ids: Option<Vec<i64>>,
}

// 教师评分请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeAssignmentRequest {
    pub student_id: i64,
    pub grade: String,
}
