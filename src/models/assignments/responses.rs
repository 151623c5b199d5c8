use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, AssignmentStatus, StudentAssignment};

// 教师视角：作业及其全部学生记录
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentWithStudents {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub students: Vec<StudentAssignment>,
}

// 学生视角：扁平化的作业条目
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignmentView {
    pub id: i64,
    pub assignment_id: i64,
    pub subject: String,
    pub title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: AssignmentStatus,
    pub grade: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl StudentAssignmentView {
    pub fn new(row: StudentAssignment, assignment: &Assignment) -> Self {
        Self {
            id: row.id,
            assignment_id: assignment.id,
            subject: assignment.subject.clone(),
            title: assignment.title.clone(),
            due_date: assignment.due_date,
            status: row.status,
            grade: row.grade,
            submitted_at: row.submitted_at,
        }
    }
}
