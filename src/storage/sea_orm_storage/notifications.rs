//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ErpError, Result};
use crate::models::notifications::{
    entities::Notification,
    requests::{BroadcastNotificationRequest, CreateNotificationRequest},
};
use crate::models::users::entities::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 用户通知列表，最新的在前
    pub async fn list_notifications_impl(&self, user_id: i64) -> Result<Vec<Notification>> {
        let rows = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to list notifications: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_notification()).collect())
    }

    /// 未读通知数量
    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<u64> {
        Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to count unread notifications: {e}"))
            })
    }

    /// 创建通知
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            title: Set(req.title),
            message: Set(req.message),
            notification_type: Set(req.notification_type.to_string()),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            ErpError::database_operation(format!("Failed to create notification: {e}"))
        })?;

        Ok(result.into_notification())
    }

    /// 向所有学生广播同一条通知
    pub async fn broadcast_notification_impl(
        &self,
        req: BroadcastNotificationRequest,
    ) -> Result<u64> {
        let student_ids: Vec<i64> = Users::find()
            .select_only()
            .column(UserColumn::Id)
            .filter(UserColumn::Role.eq(UserRole::STUDENT))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list students: {e}")))?;

        if student_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let notification_type = req.notification_type.to_string();

        let txn = self.db.begin().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        let mut count = 0u64;
        for user_id in student_ids {
            ActiveModel {
                user_id: Set(user_id),
                title: Set(req.title.clone()),
                message: Set(req.message.clone()),
                notification_type: Set(notification_type.clone()),
                is_read: Set(false),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to insert notification: {e}"))
            })?;
            count += 1;
        }

        txn.commit().await.map_err(|e| {
            ErpError::database_operation(format!("Failed to commit broadcast: {e}"))
        })?;

        Ok(count)
    }

    /// 标记通知为已读，id 与 user_id 必须同时匹配
    pub async fn mark_notification_read_impl(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Notification>> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to mark notification read: {e}"))
            })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query notification: {e}")))?;

        Ok(row.map(|m| m.into_notification()))
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<u64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ErpError::database_operation(format!("Failed to mark all notifications read: {e}"))
            })?;

        Ok(result.rows_affected)
    }
}
