//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{ErpError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 班级列表，最新创建的在前
    pub async fn list_classes_impl(&self) -> Result<Vec<Class>> {
        let rows = Classes::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list classes: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_class()).collect())
    }

    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            subject: Set(req.subject),
            schedule: Set(req.schedule),
            room: Set(req.room),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to create class: {e}")))?;

        Ok(result.into_class())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query class: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(schedule) = update.schedule {
            model.schedule = Set(schedule);
        }
        if let Some(room) = update.room {
            model.room = Set(room);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to update class: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to delete class: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
