//! 作业存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as Assignments,
};
use crate::entity::student_assignments::{ActiveModel, Column, Entity as StudentAssignments};
use crate::errors::{ErpError, Result};
use crate::models::assignments::{
    entities::{AssignmentStatus, StudentAssignment},
    requests::CreateAssignmentRequest,
    responses::{AssignmentWithStudents, StudentAssignmentView},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生作业列表，按截止日期升序
    pub async fn list_student_assignments_impl(
        &self,
        user_id: i64,
    ) -> Result<Vec<StudentAssignmentView>> {
        let rows = StudentAssignments::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Assignments)
            .order_by_asc(AssignmentColumn::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to list student assignments: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, assignment)| {
                let assignment = assignment?.into_assignment();
                Some(StudentAssignmentView::new(
                    row.into_student_assignment(None),
                    &assignment,
                ))
            })
            .collect())
    }

    /// 全部作业及其学生记录
    pub async fn list_assignments_with_students_impl(&self) -> Result<Vec<AssignmentWithStudents>> {
        let assignments = Assignments::find()
            .order_by_asc(AssignmentColumn::DueDate)
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list assignments: {e}")))?;

        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let rows = StudentAssignments::find()
            .filter(Column::AssignmentId.is_in(assignments.iter().map(|a| a.id)))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to list student assignments: {e}"))
            })?;

        let users = self.user_summaries(rows.iter().map(|r| r.user_id)).await?;

        let mut grouped: HashMap<i64, Vec<StudentAssignment>> = HashMap::new();
        for row in rows {
            let user = users.get(&row.user_id).cloned();
            grouped
                .entry(row.assignment_id)
                .or_default()
                .push(row.into_student_assignment(user));
        }

        Ok(assignments
            .into_iter()
            .map(|a| AssignmentWithStudents {
                students: grouped.remove(&a.id).unwrap_or_default(),
                assignment: a.into_assignment(),
            })
            .collect())
    }

    /// 创建作业并为每个学生生成 PENDING 记录，在同一事务中完成
    pub async fn create_assignment_impl(
        &self,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentWithStudents> {
        let mut student_ids = req.student_ids.unwrap_or_default();
        student_ids.sort_unstable();
        student_ids.dedup();

        let users = self.user_summaries(student_ids.iter().copied()).await?;
        if let Some(missing) = student_ids.iter().find(|id| !users.contains_key(id)) {
            return Err(ErpError::not_found(format!("User {missing} not found")));
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        let assignment = AssignmentActiveModel {
            subject: Set(req.subject),
            title: Set(req.title),
            due_date: Set(req.due_date.timestamp()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ErpError::database_operation(format!("Failed to create assignment: {e}")))?;

        let mut students = Vec::with_capacity(student_ids.len());
        for user_id in student_ids {
            let row = ActiveModel {
                user_id: Set(user_id),
                assignment_id: Set(assignment.id),
                status: Set(AssignmentStatus::Pending.to_string()),
                grade: Set(None),
                submitted_at: Set(None),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to assign student {user_id}: {e}"))
            })?;
            students.push(row.into_student_assignment(users.get(&user_id).cloned()));
        }

        txn.commit().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to commit assignment: {e}"))
        })?;

        Ok(AssignmentWithStudents {
            assignment: assignment.into_assignment(),
            students,
        })
    }

    /// 学生提交作业
    pub async fn submit_assignment_impl(
        &self,
        user_id: i64,
        assignment_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = StudentAssignments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Submitted.to_string()),
            )
            .col_expr(Column::SubmittedAt, Expr::value(Some(now)))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Self::student_assignment_key(user_id, assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to submit assignment: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_student_assignment(user_id, assignment_id).await
    }

    /// 教师评分
    pub async fn grade_assignment_impl(
        &self,
        user_id: i64,
        assignment_id: i64,
        grade: String,
    ) -> Result<Option<StudentAssignment>> {
        let result = StudentAssignments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Graded.to_string()),
            )
            .col_expr(Column::Grade, Expr::value(Some(grade)))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Self::student_assignment_key(user_id, assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to grade assignment: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_student_assignment(user_id, assignment_id).await
    }

    /// PENDING 状态的学生作业数
    pub async fn count_pending_assignments_impl(&self, user_id: Option<i64>) -> Result<u64> {
        let mut select = StudentAssignments::find()
            .filter(Column::Status.eq(AssignmentStatus::Pending.to_string()));
        if let Some(id) = user_id {
            select = select.filter(Column::UserId.eq(id));
        }

        select.count(&self.db).await.map_err(|e| {
            ErpError::database_operation(format!("Failed to count pending assignments: {e}"))
        })
    }

    // (user_id, assignment_id) 复合键条件
    fn student_assignment_key(user_id: i64, assignment_id: i64) -> Condition {
        Condition::all()
            .add(Column::UserId.eq(user_id))
            .add(Column::AssignmentId.eq(assignment_id))
    }

    async fn find_student_assignment(
        &self,
        user_id: i64,
        assignment_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let row = StudentAssignments::find()
            .filter(Self::student_assignment_key(user_id, assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to query student assignment: {e}"))
            })?;

        Ok(row.map(|r| r.into_student_assignment(None)))
    }
}
