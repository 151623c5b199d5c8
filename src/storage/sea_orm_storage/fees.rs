//! 费用存储操作

use super::SeaOrmStorage;
use crate::entity::fees::{ActiveModel, Column, Entity as Fees};
use crate::errors::{ErpError, Result};
use crate::models::fees::{
    entities::{Fee, FeeStatus},
    requests::CreateFeeRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出费用并附带学生信息
    pub async fn list_fees_impl(&self, user_id: Option<i64>) -> Result<Vec<Fee>> {
        let mut select = Fees::find();
        if let Some(id) = user_id {
            select = select.filter(Column::UserId.eq(id));
        }

        let rows = select
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list fees: {e}")))?;

        let users = self.user_summaries(rows.iter().map(|r| r.user_id)).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let user = users.get(&r.user_id).cloned();
                r.into_fee(user)
            })
            .collect())
    }

    pub async fn get_fee_by_id_impl(&self, id: i64) -> Result<Option<Fee>> {
        let result = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query fee: {e}")))?;

        Ok(result.map(|m| m.into_fee(None)))
    }

    /// 创建费用
    pub async fn create_fee_impl(&self, req: CreateFeeRequest) -> Result<Fee> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            title: Set(req.title),
            amount: Set(req.amount),
            due_date: Set(req.due_date.timestamp()),
            status: Set(req.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to create fee: {e}")))?;

        Ok(result.into_fee(None))
    }

    /// 修改费用状态
    pub async fn update_fee_status_impl(&self, id: i64, status: FeeStatus) -> Result<Option<Fee>> {
        let result = Fees::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to update fee: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_fee_by_id_impl(id).await
    }
}
