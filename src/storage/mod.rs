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

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户，可按角色筛选
    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>>;
    // 更新用户资料
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 考勤方法
    // 列出考勤记录（按日期倒序）
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;
    // 出勤汇总，user_id 为空时统计全部记录
    async fn attendance_summary(&self, user_id: Option<i64>) -> Result<AttendanceSummary>;
    // 创建单条考勤
    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<AttendanceRecord>;
    // 批量点名，返回插入条数
    async fn bulk_create_attendance(&self, req: BulkAttendanceRequest) -> Result<u64>;
    // 修改考勤状态
    async fn update_attendance_status(
        &self,
        id: i64,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>>;

    /// 费用方法
    // 列出费用（按截止日期升序）
    async fn list_fees(&self, user_id: Option<i64>) -> Result<Vec<Fee>>;
    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>>;
    async fn create_fee(&self, req: CreateFeeRequest) -> Result<Fee>;
    async fn update_fee_status(&self, id: i64, status: FeeStatus) -> Result<Option<Fee>>;

    /// 作业方法
    // 学生视角的作业列表
    async fn list_student_assignments(&self, user_id: i64) -> Result<Vec<StudentAssignmentView>>;
    // 教师视角：全部作业及学生记录
    async fn list_assignments_with_students(&self) -> Result<Vec<AssignmentWithStudents>>;
    // 创建作业并分配给学生
    async fn create_assignment(&self, req: CreateAssignmentRequest)
    -> Result<AssignmentWithStudents>;
    // 学生提交作业
    async fn submit_assignment(
        &self,
        user_id: i64,
        assignment_id: i64,
    ) -> Result<Option<StudentAssignment>>;
    // 教师评分
    async fn grade_assignment(
        &self,
        user_id: i64,
        assignment_id: i64,
        grade: String,
    ) -> Result<Option<StudentAssignment>>;
    // 未提交作业数，user_id 为空时统计全部学生
    async fn count_pending_assignments(&self, user_id: Option<i64>) -> Result<u64>;

    /// 考试方法
    async fn list_exams(&self) -> Result<Vec<Exam>>;
    // 指定时间之后的考试
    async fn list_upcoming_exams(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        limit: u64,
    ) -> Result<Vec<Exam>>;
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 通知方法
    async fn list_notifications(&self, user_id: i64) -> Result<Vec<Notification>>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64>;
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // 向全部学生广播，返回创建条数
    async fn broadcast_notification(&self, req: BroadcastNotificationRequest) -> Result<u64>;
    // 标记单条已读，只能操作自己的通知
    async fn mark_notification_read(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Notification>>;
    // 全部标记已读，返回影响条数
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64>;

    /// 班级管理方法
    async fn list_classes(&self) -> Result<Vec<Class>>;
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
