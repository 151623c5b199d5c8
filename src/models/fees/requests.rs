use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::FeeStatus;
use crate::utils::datetime;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeRequest {
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    #[ts(type = "string")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: FeeStatus,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeRequest {
    pub status: FeeStatus,
}
