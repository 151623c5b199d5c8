use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知类型
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationType {
    #[default]
    Info,
    Alert,
    Success,
}

impl NotificationType {
    pub const INFO: &'static str = "INFO";
    pub const ALERT: &'static str = "ALERT";
    pub const SUCCESS: &'static str = "SUCCESS";
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationType::Info => Self::INFO,
            NotificationType::Alert => Self::ALERT,
            NotificationType::Success => Self::SUCCESS,
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::INFO => Ok(NotificationType::Info),
            Self::ALERT => Ok(NotificationType::Alert),
            Self::SUCCESS => Ok(NotificationType::Success),
            _ => Err(format!("Invalid notification type: {s}")),
        }
    }
}

// 站内通知
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
