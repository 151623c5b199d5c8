//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{ErpError, Result};
use crate::models::attendance::{
    entities::{AttendanceRecord, AttendanceStatus},
    requests::{AttendanceListQuery, BulkAttendanceRequest, CreateAttendanceRequest},
    responses::AttendanceSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    fn attendance_scope(user_id: Option<i64>) -> Select<Attendance> {
        let select = Attendance::find();
        match user_id {
            Some(id) => select.filter(Column::UserId.eq(id)),
            None => select,
        }
    }

    /// 列出考勤记录并附带学生信息
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Self::attendance_scope(query.user_id);

        // 日期区间（闭区间）
        if let Some(start) = query.start_date {
            select = select.filter(Column::Date.gte(start.timestamp()));
        }
        if let Some(end) = query.end_date {
            select = select.filter(Column::Date.lte(end.timestamp()));
        }

        let rows = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list attendance: {e}")))?;

        let users = self.user_summaries(rows.iter().map(|r| r.user_id)).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let user = users.get(&r.user_id).cloned();
                r.into_attendance(user)
            })
            .collect())
    }

    /// 出勤汇总：总数与各状态计数
    pub async fn attendance_summary_impl(&self, user_id: Option<i64>) -> Result<AttendanceSummary> {
        let total = self.count_attendance(user_id, None).await?;
        let present = self
            .count_attendance(user_id, Some(AttendanceStatus::Present))
            .await?;
        let absent = self
            .count_attendance(user_id, Some(AttendanceStatus::Absent))
            .await?;
        let late = self
            .count_attendance(user_id, Some(AttendanceStatus::Late))
            .await?;

        Ok(AttendanceSummary::from_counts(
            total as i64,
            present as i64,
            absent as i64,
            late as i64,
        ))
    }

    async fn count_attendance(
        &self,
        user_id: Option<i64>,
        status: Option<AttendanceStatus>,
    ) -> Result<u64> {
        let mut select = Self::attendance_scope(user_id);
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to count attendance: {e}")))
    }

    /// 创建考勤记录
    pub async fn create_attendance_impl(
        &self,
        req: CreateAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        let user = self
            .get_user_by_id_impl(req.user_id)
            .await?
            .ok_or_else(|| ErpError::not_found(format!("User {} not found", req.user_id)))?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            date: Set(req.date.timestamp()),
            status: Set(req.status.to_string()),
            subject: Set(req.subject),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            ErpError::database_operation(format!("Failed to create attendance: {e}"))
        })?;

        Ok(result.into_attendance(Some(user.summary())))
    }

    /// 批量创建考勤，在同一事务中完成
    pub async fn bulk_create_attendance_impl(&self, req: BulkAttendanceRequest) -> Result<u64> {
        if req.records.is_empty() {
            return Ok(0);
        }

        let known = self
            .user_summaries(req.records.iter().map(|r| r.user_id))
            .await?;
        if let Some(missing) = req.records.iter().find(|r| !known.contains_key(&r.user_id)) {
            return Err(ErpError::not_found(format!(
                "User {} not found",
                missing.user_id
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let date = req.date.timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        let mut count = 0u64;
        for entry in req.records {
            ActiveModel {
                user_id: Set(entry.user_id),
                date: Set(date),
                status: Set(entry.status.to_string()),
                subject: Set(req.subject.clone()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to insert attendance: {e}"))
            })?;
            count += 1;
        }

        txn.commit().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to commit attendance batch: {e}"))
        })?;

        Ok(count)
    }

    /// 修改考勤状态
    pub async fn update_attendance_status_impl(
        &self,
        id: i64,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>> {
        let result = Attendance::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to update attendance: {e}"))
            })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query attendance: {e}")))?;

        match row {
            Some(row) => {
                let user = self.user_summaries([row.user_id]).await?.remove(&row.user_id);
                Ok(Some(row.into_attendance(user)))
            }
            None => Ok(None),
        }
    }
}
