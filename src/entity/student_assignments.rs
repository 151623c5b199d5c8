//! 学生作业关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub assignment_id: i64,
    pub status: String,
    pub grade: Option<String>,
    pub submitted_at: Option<i64>,
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
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_assignment(
        self,
        user: Option<crate::models::users::entities::UserSummary>,
    ) -> crate::models::assignments::entities::StudentAssignment {
        use crate::models::assignments::entities::{AssignmentStatus, StudentAssignment};
        use crate::utils::datetime::from_timestamp;

        StudentAssignment {
            id: self.id,
            user_id: self.user_id,
            assignment_id: self.assignment_id,
            status: self.status.parse::<AssignmentStatus>().unwrap_or_default(),
            grade: self.grade,
            submitted_at: self.submitted_at.map(from_timestamp),
            updated_at: from_timestamp(self.updated_at),
            user,
        }
    }
}
