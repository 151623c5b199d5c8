//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject: String,
    pub date: i64,
    pub time: String,
    pub room: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::utils::datetime::from_timestamp;

        crate::models::exams::entities::Exam {
            id: self.id,
            subject: self.subject,
            date: from_timestamp(self.date),
            time: self.time,
            room: self.room,
            created_at: from_timestamp(self.created_at),
        }
    }
}
