use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::utils::datetime;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub subject: String,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub time: String,
    pub room: String,
}

// 部分更新，未提供的字段保持不变
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "datetime::flexible_option::deserialize")]
    #[ts(type = "string | null")]
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub room: Option<String>,
}

impl UpdateExamRequest {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.date.is_none() && self.time.is_none() && self.room.is_none()
    }
}
