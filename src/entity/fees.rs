//! 费用实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub due_date: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee(
        self,
        user: Option<crate::models::users::entities::UserSummary>,
    ) -> crate::models::fees::entities::Fee {
        use crate::models::fees::entities::{Fee, FeeStatus};
        use crate::utils::datetime::from_timestamp;

        Fee {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            amount: self.amount,
            due_date: from_timestamp(self.due_date),
            status: self.status.parse::<FeeStatus>().unwrap_or_default(),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
            user,
        }
    }
}
