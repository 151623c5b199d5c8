//! 考试存储操作

use super::SeaOrmStorage;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{ErpError, Result};
use crate::models::exams::{
    entities::Exam,
    requests::{CreateExamRequest, UpdateExamRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn list_exams_impl(&self) -> Result<Vec<Exam>> {
        let exams = Exams::find()
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list exams: {e}")))?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    /// 指定时间之后的考试，按日期升序取前 limit 条
    pub async fn list_upcoming_exams_impl(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        limit: u64,
    ) -> Result<Vec<Exam>> {
        let exams = Exams::find()
            .filter(Column::Date.gte(from.timestamp()))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to list upcoming exams: {e}"))
            })?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let model = ActiveModel {
            subject: Set(req.subject),
            date: Set(req.date.timestamp()),
            time: Set(req.time),
            room: Set(req.room),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to create exam: {e}")))?;

        Ok(result.into_exam())
    }

    /// 部分更新考试
    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let Some(existing) = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query exam: {e}")))?
        else {
            return Ok(None);
        };

        if update.is_empty() {
            return Ok(Some(existing.into_exam()));
        }

        let mut model: ActiveModel = existing.into();
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(date) = update.date {
            model.date = Set(date.timestamp());
        }
        if let Some(time) = update.time {
            model.time = Set(time);
        }
        if let Some(room) = update.room {
            model.room = Set(room);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to update exam: {e}")))?;

        Ok(Some(result.into_exam()))
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to delete exam: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
