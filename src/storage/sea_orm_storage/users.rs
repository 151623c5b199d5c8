use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ErpError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

// 邮箱唯一索引冲突单独区分，注册并发时由服务层返回 400
fn create_user_error(email: &str, err: DbErr) -> ErpError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ErpError::conflict(format!("Email {email} is already registered"))
        }
        _ => ErpError::database_operation(format!("Failed to create user: {err}")),
    }
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let email = req.email.clone();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            name: Set(req.name),
            role: Set(req.role.to_string()),
            avatar: Set(req.avatar),
            grade: Set(req.grade),
            section: Set(req.section),
            roll_no: Set(req.roll_no),
            department: Set(req.department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| create_user_error(&email, e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出用户
    pub async fn list_users_impl(&self, role: Option<UserRole>) -> Result<Vec<User>> {
        let mut select = Users::find();

        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let users = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to list users: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户资料，只写入请求中出现的字段
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(avatar) = update.avatar {
            model.avatar = Set(Some(avatar));
        }
        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade));
        }
        if let Some(section) = update.section {
            model.section = Set(Some(section));
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to update user: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to count users: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "hash".to_string(),
            name: "Jamie Lee".to_string(),
            role: UserRole::Student,
            avatar: None,
            grade: None,
            section: None,
            roll_no: None,
            department: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_user_impl(account("jamie.lee@edunova.edu"))
            .await
            .unwrap();

        let err = storage
            .create_user_impl(account("jamie.lee@edunova.edu"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[test]
    fn test_other_db_errors_stay_operational() {
        let err = create_user_error("a@edunova.edu", DbErr::Custom("disk full".to_string()));
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "E005");
    }
}
