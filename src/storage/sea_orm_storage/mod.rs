//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendance;
mod classes;
mod exams;
mod fees;
mod notifications;
mod users;

use crate::config::AppConfig;
use crate::errors::{ErpError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::migrated(db).await?;
        info!("SeaORM storage initialized, database: {}", db_url);
        Ok(storage)
    }

    /// 单连接内存 SQLite，进程内独享一份数据
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ErpError::database_config(format!("SQLite URL parse failed: {e}")))?;

        // 内存库随连接释放而消失，连接池只保留一条且不回收
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| ErpError::database_connection(format!("SQLite connect failed: {e}")))?;

        Self::migrated(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    async fn migrated(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ErpError::database_operation(format!("Migration failed: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ErpError::database_config(format!("SQLite URL parse failed: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-32000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ErpError::database_connection(format!("SQLite connect failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ErpError::database_connection(format!("Unable to connect to database: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
        {
            Ok(url.to_string())
        } else {
            Err(ErpError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }

    /// 批量查询用户简要信息，用于嵌入到考勤、费用、作业记录
    pub(crate) async fn user_summaries(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, crate::models::users::entities::UserSummary>> {
        use crate::entity::users::{Column, Entity as Users};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("Failed to load users: {e}")))?;

        Ok(users.iter().map(|u| (u.id, u.to_summary())).collect())
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::StudentAssignment,
        requests::CreateAssignmentRequest,
        responses::{AssignmentWithStudents, StudentAssignmentView},
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceListQuery, BulkAttendanceRequest, CreateAttendanceRequest},
        responses::AttendanceSummary,
    },
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    exams::{
        entities::Exam,
        requests::{CreateExamRequest, UpdateExamRequest},
    },
    fees::{
        entities::{Fee, FeeStatus},
        requests::CreateFeeRequest,
    },
    notifications::{
        entities::Notification,
        requests::{BroadcastNotificationRequest, CreateNotificationRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>> {
        self.list_users_impl(role).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 考勤模块
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(query).await
    }

    async fn attendance_summary(&self, user_id: Option<i64>) -> Result<AttendanceSummary> {
        self.attendance_summary_impl(user_id).await
    }

    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<AttendanceRecord> {
        self.create_attendance_impl(req).await
    }

    async fn bulk_create_attendance(&self, req: BulkAttendanceRequest) -> Result<u64> {
        self.bulk_create_attendance_impl(req).await
    }

    async fn update_attendance_status(
        &self,
        id: i64,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_status_impl(id, status).await
    }

    // 费用模块
    async fn list_fees(&self, user_id: Option<i64>) -> Result<Vec<Fee>> {
        self.list_fees_impl(user_id).await
    }

    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>> {
        self.get_fee_by_id_impl(id).await
    }

    async fn create_fee(&self, req: CreateFeeRequest) -> Result<Fee> {
        self.create_fee_impl(req).await
    }

    async fn update_fee_status(&self, id: i64, status: FeeStatus) -> Result<Option<Fee>> {
        self.update_fee_status_impl(id, status).await
    }

    // 作业模块
    async fn list_student_assignments(&self, user_id: i64) -> Result<Vec<StudentAssignmentView>> {
        self.list_student_assignments_impl(user_id).await
    }

    async fn list_assignments_with_students(&self) -> Result<Vec<AssignmentWithStudents>> {
        self.list_assignments_with_students_impl().await
    }

    async fn create_assignment(
        &self,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentWithStudents> {
        self.create_assignment_impl(req).await
    }

    async fn submit_assignment(
        &self,
        user_id: i64,
        assignment_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        self.submit_assignment_impl(user_id, assignment_id).await
    }

    async fn grade_assignment(
        &self,
        user_id: i64,
        assignment_id: i64,
        grade: String,
    ) -> Result<Option<StudentAssignment>> {
        self.grade_assignment_impl(user_id, assignment_id, grade)
            .await
    }

    async fn count_pending_assignments(&self, user_id: Option<i64>) -> Result<u64> {
        self.count_pending_assignments_impl(user_id).await
    }

    // 考试模块
    async fn list_exams(&self) -> Result<Vec<Exam>> {
        self.list_exams_impl().await
    }

    async fn list_upcoming_exams(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        limit: u64,
    ) -> Result<Vec<Exam>> {
        self.list_upcoming_exams_impl(from, limit).await
    }

    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(req).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 通知模块
    async fn list_notifications(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.list_notifications_impl(user_id).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(user_id).await
    }

    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn broadcast_notification(&self, req: BroadcastNotificationRequest) -> Result<u64> {
        self.broadcast_notification_impl(req).await
    }

    async fn mark_notification_read(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Notification>> {
        self.mark_notification_read_impl(id, user_id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    // 班级模块
    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.list_classes_impl().await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }
}
