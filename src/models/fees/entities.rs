use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::{UserRole, UserSummary};

// 费用状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub enum FeeStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl FeeStatus {
    pub const PAID: &'static str = "PAID";
    pub const PENDING: &'static str = "PENDING";
    pub const OVERDUE: &'static str = "OVERDUE";

    /// 角色可设置的费用状态：学生只能标记为已缴
    pub fn allowed_for(role: UserRole) -> &'static [FeeStatus] {
        match role {
            UserRole::Teacher => &[FeeStatus::Paid, FeeStatus::Pending, FeeStatus::Overdue],
            UserRole::Student => &[FeeStatus::Paid],
        }
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FeeStatus::Paid => Self::PAID,
            FeeStatus::Pending => Self::PENDING,
            FeeStatus::Overdue => Self::OVERDUE,
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for FeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PAID => Ok(FeeStatus::Paid),
            Self::PENDING => Ok(FeeStatus::Pending),
            Self::OVERDUE => Ok(FeeStatus::Overdue),
            _ => Err(format!("Invalid fee status: {s}")),
        }
    }
}

// 费用记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct Fee {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: FeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_statuses() {
        assert_eq!(FeeStatus::allowed_for(UserRole::Student), &[FeeStatus::Paid]);
        assert!(FeeStatus::allowed_for(UserRole::Teacher).contains(&FeeStatus::Overdue));
    }
}
