use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试安排
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub subject: String,
    pub date: chrono::DateTime<chrono::Utc>,
    /// 展示用时间，如 "09:00 AM"
    pub time: String,
    pub room: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
