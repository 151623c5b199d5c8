use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 学生作业状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Submitted,
    Graded,
}

impl AssignmentStatus {
    pub const PENDING: &'static str = "PENDING";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const GRADED: &'static str = "GRADED";
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Pending => Self::PENDING,
            AssignmentStatus::Submitted => Self::SUBMITTED,
            AssignmentStatus::Graded => Self::GRADED,
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(AssignmentStatus::Pending),
            Self::SUBMITTED => Ok(AssignmentStatus::Submitted),
            Self::GRADED => Ok(AssignmentStatus::Graded),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub subject: String,
    pub title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学生与作业的关联记录，(user_id, assignment_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignment {
    pub id: i64,
    pub user_id: i64,
    pub assignment_id: i64,
    pub status: AssignmentStatus,
    pub grade: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}
