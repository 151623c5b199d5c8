//! 初始数据
//!
//! 空库启动时创建默认教师账号；`seed.demo_data` 打开时再写入一名演示学生
//! 及其考勤、费用、作业、考试、班级和通知。

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    assignments::requests::CreateAssignmentRequest,
    attendance::{entities::AttendanceStatus, requests::CreateAttendanceRequest},
    classes::requests::CreateClassRequest,
    exams::requests::CreateExamRequest,
    fees::{entities::FeeStatus, requests::CreateFeeRequest},
    notifications::{entities::NotificationType, requests::CreateNotificationRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;
use crate::utils::password::hash_password;

pub const DEMO_STUDENT_EMAIL: &str = "alex.rivera@edunova.edu";
const DEMO_PASSWORD: &str = "password";

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 数据库中没有任何用户时创建默认教师
pub async fn seed_teacher(storage: &dyn Storage) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping teacher seed", count);
            return;
        }
        Ok(_) => info!("No users found in database, creating default teacher account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping teacher seed", e);
            return;
        }
    }

    let password = std::env::var("SEED_TEACHER_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  SEED_TEACHER_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated teacher password: {}", pwd);
        warn!("==========================================================");
        pwd
    });

    let seed = &AppConfig::get().seed;
    match create_account(
        storage,
        &seed.teacher_email,
        &password,
        &seed.teacher_name,
        UserRole::Teacher,
    )
    .await
    {
        Ok(user) => info!(
            "Default teacher account created (ID: {}, email: {})",
            user.id, user.email
        ),
        Err(e) => warn!("Failed to create teacher account: {}", e),
    }
}

async fn create_account(
    storage: &dyn Storage,
    email: &str,
    password: &str,
    name: &str,
    role: UserRole,
) -> Result<User> {
    let mut request = CreateUserRequest {
        email: email.to_string(),
        password: hash_password(password)?,
        name: name.to_string(),
        role,
        avatar: None,
        grade: None,
        section: None,
        roll_no: None,
        department: None,
    };
    match role {
        UserRole::Teacher => request.department = Some("Science".to_string()),
        UserRole::Student => {
            request.grade = Some("10".to_string());
            request.section = Some("A".to_string());
            request.roll_no = Some("1024".to_string());
        }
    }
    storage.create_user(request).await
}

/// 写入演示数据，演示学生已存在时跳过
pub async fn seed_demo_data(storage: &dyn Storage) {
    match storage.get_user_by_email(DEMO_STUDENT_EMAIL).await {
        Ok(Some(_)) => {
            debug!("Demo data already present, skipping");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to check demo data: {}", e);
            return;
        }
    }

    match write_demo_data(storage).await {
        Ok(student) => info!(
            "Demo data seeded, student login: {} / {}",
            student.email, DEMO_PASSWORD
        ),
        Err(e) => warn!("Failed to seed demo data: {}", e),
    }
}

async fn write_demo_data(storage: &dyn Storage) -> Result<User> {
    let student = create_account(
        storage,
        DEMO_STUDENT_EMAIL,
        DEMO_PASSWORD,
        "Alex Rivera",
        UserRole::Student,
    )
    .await?;
    let now = Utc::now();

    let subjects = ["Physics", "Math", "Chemistry", "English", "History"];
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Present,
        AttendanceStatus::Late,
    ];
    for (i, (subject, status)) in subjects.iter().zip(statuses).enumerate() {
        storage
            .create_attendance(CreateAttendanceRequest {
                user_id: student.id,
                date: now - Duration::days(i as i64),
                status,
                subject: subject.to_string(),
            })
            .await?;
    }

    for (title, amount, days, status) in [
        ("Tuition Fee - Term 1", 1200.0, -60, FeeStatus::Paid),
        ("Lab Fee", 150.0, 14, FeeStatus::Pending),
        ("Library Fine", 15.0, -10, FeeStatus::Overdue),
    ] {
        storage
            .create_fee(CreateFeeRequest {
                user_id: student.id,
                title: title.to_string(),
                amount,
                due_date: now + Duration::days(days),
                status,
            })
            .await?;
    }

    let mut assignment_ids = Vec::new();
    for (subject, title, days) in [
        ("Physics", "Thermodynamics Report", 7),
        ("Mathematics", "Calculus Problem Set", 3),
        ("Literature", "Shakespeare Essay", -5),
    ] {
        let created = storage
            .create_assignment(CreateAssignmentRequest {
                subject: subject.to_string(),
                title: title.to_string(),
                due_date: now + Duration::days(days),
                student_ids: Some(vec![student.id]),
            })
            .await?;
        assignment_ids.push(created.assignment.id);
    }
    storage
        .submit_assignment(student.id, assignment_ids[1])
        .await?;
    storage
        .grade_assignment(student.id, assignment_ids[2], "A-".to_string())
        .await?;

    for (subject, days, time, room) in [
        ("Physics Mid-term", 10, "09:00 AM", "Hall A"),
        ("Math Final", 12, "11:00 AM", "Hall B"),
    ] {
        let day = now + Duration::days(days);
        // 考试日期取当天零点
        let date = day
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|d| d.and_utc())
            .unwrap_or(day);
        storage
            .create_exam(CreateExamRequest {
                subject: subject.to_string(),
                date,
                time: time.to_string(),
                room: room.to_string(),
            })
            .await?;
    }

    for (name, subject, schedule, room) in [
        ("10-A Physics", "Physics", "Mon/Wed 09:00", "Lab 1"),
        ("10-A Mathematics", "Mathematics", "Tue/Thu 10:00", "Room 204"),
        ("10-A Chemistry", "Chemistry", "Fri 11:00", "Lab 2"),
    ] {
        storage
            .create_class(CreateClassRequest {
                name: name.to_string(),
                subject: subject.to_string(),
                schedule: schedule.to_string(),
                room: room.to_string(),
            })
            .await?;
    }

    for (title, message, notification_type) in [
        (
            "Exam Schedule Released",
            "The mid-term exam schedule is now available.",
            NotificationType::Info,
        ),
        (
            "Fee Payment Reminder",
            "Lab fee payment is due next week.",
            NotificationType::Alert,
        ),
    ] {
        storage
            .create_notification(CreateNotificationRequest {
                user_id: student.id,
                title: title.to_string(),
                message: message.to_string(),
                notification_type,
            })
            .await?;
    }

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SeaOrmStorage;

    #[test]
    fn test_generated_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_seed_teacher_only_on_empty_database() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        seed_teacher(&storage).await;
        seed_teacher(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);

        let email = &AppConfig::get().seed.teacher_email;
        let teacher = storage.get_user_by_email(email).await.unwrap().unwrap();
        assert!(teacher.is_teacher());
    }

    #[tokio::test]
    async fn test_demo_data_is_written_once() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        seed_demo_data(&storage).await;
        seed_demo_data(&storage).await;

        let student = storage
            .get_user_by_email(DEMO_STUDENT_EMAIL)
            .await
            .unwrap()
            .unwrap();
        let summary = storage.attendance_summary(Some(student.id)).await.unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.percentage, 60);
        assert_eq!(storage.list_fees(Some(student.id)).await.unwrap().len(), 3);
        assert_eq!(
            storage
                .count_pending_assignments(Some(student.id))
                .await
                .unwrap(),
            1
        );
        assert_eq!(storage.list_classes().await.unwrap().len(), 3);
    }
}
