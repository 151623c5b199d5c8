//! HTTP 层测试：完整路由表 + 内存 SQLite

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::cache::ObjectCache;
use crate::cache::object_cache::MokaCacheWrapper;
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{SeaOrmStorage, Storage};
use crate::utils::jwt::{JwtUtils, REFRESH_COOKIE_NAME};
use crate::utils::password::hash_password;
use crate::utils::{json_error_handler, query_error_handler};

use super::configure_api_routes;

const PASSWORD: &str = "password123";

static PASSWORD_HASH: Lazy<String> = Lazy::new(|| hash_password(PASSWORD).unwrap());

struct Fixture {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    teacher: User,
    student: User,
    other: User,
}

async fn create_account(
    storage: &dyn Storage,
    email: &str,
    name: &str,
    role: UserRole,
    roll_no: Option<&str>,
) -> User {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password: PASSWORD_HASH.clone(),
            name: name.to_string(),
            role,
            avatar: None,
            grade: roll_no.map(|_| "10th".to_string()),
            section: roll_no.map(|_| "A".to_string()),
            roll_no: roll_no.map(str::to_string),
            department: None,
        })
        .await
        .unwrap()
}

async fn setup() -> Fixture {
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1000, 60));

    let teacher = create_account(
        storage.as_ref(),
        "sarah.jenkins@edunova.edu",
        "Sarah Jenkins",
        UserRole::Teacher,
        None,
    )
    .await;
    let student = create_account(
        storage.as_ref(),
        "alex.rivera@edunova.edu",
        "Alex Rivera",
        UserRole::Student,
        Some("1024"),
    )
    .await;
    let other = create_account(
        storage.as_ref(),
        "jamie.lee@edunova.edu",
        "Jamie Lee",
        UserRole::Student,
        Some("1025"),
    )
    .await;

    Fixture {
        storage,
        cache,
        teacher,
        student,
        other,
    }
}

macro_rules! init_app {
    ($fx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($fx.storage.clone()))
                .app_data(web::Data::new($fx.cache.clone()))
                .configure(configure_api_routes),
        )
        .await
    };
}

// 返回状态码与 JSON 响应体，空响应体记为 Null
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }};
}

fn bearer(user: &User) -> (header::HeaderName, String) {
    let token =
        JwtUtils::generate_access_token(user.id, &user.email, &user.role.to_string()).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn get(uri: &str, user: &User) -> TestRequest {
    TestRequest::get().uri(uri).insert_header(bearer(user))
}

fn post(uri: &str, user: &User, body: Value) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header(bearer(user))
        .set_json(body)
}

fn patch(uri: &str, user: &User, body: Value) -> TestRequest {
    TestRequest::patch()
        .uri(uri)
        .insert_header(bearer(user))
        .set_json(body)
}

fn delete(uri: &str, user: &User) -> TestRequest {
    TestRequest::delete().uri(uri).insert_header(bearer(user))
}

// 限流计数是全局的，每个测试用不同的来源地址
fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 20, 0, last_octet], 40000))
}

#[actix_web::test]
async fn test_missing_or_invalid_token_is_rejected() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(app, TestRequest::get().uri("/api/attendance"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");

    let (status, body) = call!(
        app,
        TestRequest::get()
            .uri("/api/attendance")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    // refresh token 不能当 access token 用
    let refresh = JwtUtils::generate_refresh_token(
        fx.student.id,
        &fx.student.email,
        &fx.student.role.to_string(),
    )
    .unwrap();
    let (status, _) = call!(
        app,
        TestRequest::get()
            .uri("/api/dashboard")
            .insert_header((header::AUTHORIZATION, format!("Bearer {refresh}")))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 用户已不存在
    let ghost = JwtUtils::generate_access_token(9999, "ghost@edunova.edu", "STUDENT").unwrap();
    let (status, body) = call!(
        app,
        TestRequest::get()
            .uri("/api/dashboard")
            .insert_header((header::AUTHORIZATION, format!("Bearer {ghost}")))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn test_students_cannot_call_teacher_routes() {
    let fx = setup().await;
    let app = init_app!(fx);
    let sid = fx.student.id;

    let requests = vec![
        post(
            "/api/fees",
            &fx.student,
            json!({"userId": sid, "title": "Tuition", "amount": 10.0, "dueDate": "2030-01-01"}),
        ),
        post(
            "/api/attendance",
            &fx.student,
            json!({"userId": sid, "date": "2023-11-05", "status": "PRESENT", "subject": "Math"}),
        ),
        post(
            "/api/attendance/bulk",
            &fx.student,
            json!({"date": "2023-11-05", "subject": "Math", "records": []}),
        ),
        post(
            "/api/exams",
            &fx.student,
            json!({"subject": "Physics", "date": "2030-01-01", "time": "09:00 AM", "room": "Hall A"}),
        ),
        post(
            "/api/classes",
            &fx.student,
            json!({"name": "10-A", "subject": "Physics", "schedule": "Mon", "room": "101"}),
        ),
        post(
            "/api/notifications",
            &fx.student,
            json!({"userId": sid, "title": "Hi", "message": "Hello"}),
        ),
        post(
            "/api/notifications/broadcast",
            &fx.student,
            json!({"title": "Hi", "message": "Hello"}),
        ),
        post(
            "/api/assignments",
            &fx.student,
            json!({"subject": "Math", "title": "Algebra", "dueDate": "2030-01-01"}),
        ),
        post(
            "/api/assignments/1/grade",
            &fx.student,
            json!({"studentId": sid, "grade": "A"}),
        ),
        patch("/api/attendance/1", &fx.student, json!({"status": "LATE"})),
        patch("/api/exams/1", &fx.student, json!({"room": "Hall B"})),
        delete("/api/exams/1", &fx.student),
        delete("/api/classes/1", &fx.student),
        get("/api/users", &fx.student),
    ];

    for req in requests {
        let (status, body) = call!(app, req);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Insufficient permissions");
    }

    // 只有学生能提交作业
    let (status, _) = call!(app, post("/api/assignments/1/submit", &fx.teacher, json!({})));
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_register_login_refresh_and_me() {
    let fx = setup().await;
    let app = init_app!(fx);

    let register = |body: Value| {
        TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(peer(1))
            .set_json(body)
    };

    let (status, body) = call!(
        app,
        register(json!({
            "email": "new.student@edunova.edu",
            "password": "secret1",
            "name": "New Student",
            "role": "STUDENT",
            "rollNo": "2001"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["email"], "new.student@edunova.edu");
    assert_eq!(body["data"]["user"]["rollNo"], "2001");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let (status, body) = call!(
        app,
        register(json!({
            "email": "new.student@edunova.edu",
            "password": "secret1",
            "name": "Someone Else",
            "role": "STUDENT"
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");

    let (status, _) = call!(
        app,
        register(json!({"email": "bad", "password": "secret1", "name": "Bad", "role": "STUDENT"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let login = |email: &str, password: &str| {
        TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer(2))
            .set_json(json!({"email": email, "password": password}))
    };

    let (status, body) = call!(app, login(&fx.student.email, "wrong-password"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = call!(app, login("nobody@edunova.edu", PASSWORD));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, login(&fx.student.email, PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == REFRESH_COOKIE_NAME)
        .unwrap()
        .into_owned();
    assert!(cookie.http_only().unwrap_or(false));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["expiresIn"].as_i64(),
        Some(JwtUtils::access_token_ttl_secs())
    );
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = call!(
        app,
        TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64(), Some(fx.student.id));
    assert_eq!(body["data"]["role"], "STUDENT");

    let (status, body) = call!(
        app,
        TestRequest::post().uri("/api/auth/refresh").cookie(cookie)
    );
    assert_eq!(status, StatusCode::OK);
    let refreshed = body["data"]["token"].as_str().unwrap();
    let claims = JwtUtils::verify_access_token(refreshed).unwrap();
    assert_eq!(claims.user_id(), Some(fx.student.id));

    let (status, _) = call!(app, TestRequest::post().uri("/api/auth/refresh"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_attendance_summary_and_scoping() {
    let fx = setup().await;
    let app = init_app!(fx);
    let sid = fx.student.id;

    let records = [
        ("2023-11-05", "PRESENT"),
        ("2023-11-06T09:00:00Z", "PRESENT"),
        ("2023-11-07", "ABSENT"),
    ];
    let mut first_id = 0;
    for (date, status) in records {
        let (code, body) = call!(
            app,
            post(
                "/api/attendance",
                &fx.teacher,
                json!({"userId": sid, "date": date, "status": status, "subject": "Math"}),
            )
        );
        assert_eq!(code, StatusCode::CREATED);
        if first_id == 0 {
            first_id = body["data"]["id"].as_i64().unwrap();
            assert_eq!(body["data"]["date"], "2023-11-05T00:00:00Z");
            assert_eq!(body["data"]["user"]["rollNo"], "1024");
        }
    }

    let (status, body) = call!(app, get("/api/attendance/summary", &fx.student));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"total": 3, "present": 2, "absent": 1, "late": 0, "percentage": 67})
    );

    let uri = format!("/api/attendance/summary?userId={}", fx.other.id);
    let (_, body) = call!(app, get(&uri, &fx.teacher));
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["percentage"], 0);

    // 学生传入别人的 userId 也只能看到自己的记录
    let uri = format!("/api/attendance?userId={}", fx.other.id);
    let (_, body) = call!(app, get(&uri, &fx.student));
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|r| r["userId"].as_i64() == Some(sid)));

    let (_, body) = call!(
        app,
        get(
            "/api/attendance?startDate=2023-11-06&endDate=2023-11-07",
            &fx.teacher
        )
    );
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["date"], "2023-11-07T00:00:00Z");

    let uri = format!("/api/attendance/{first_id}");
    let (status, body) = call!(app, patch(&uri, &fx.teacher, json!({"status": "LATE"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "LATE");

    let (status, _) = call!(
        app,
        patch("/api/attendance/9999", &fx.teacher, json!({"status": "LATE"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_bulk_attendance() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(
        app,
        post(
            "/api/attendance/bulk",
            &fx.teacher,
            json!({
                "date": "2023-11-08",
                "subject": "Physics",
                "records": [
                    {"userId": fx.student.id, "status": "PRESENT"},
                    {"userId": fx.other.id, "status": "LATE"}
                ]
            }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 2);

    let (status, body) = call!(
        app,
        post(
            "/api/attendance/bulk",
            &fx.teacher,
            json!({"date": "2023-11-09", "subject": "Physics", "records": []}),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 0);

    let (status, _) = call!(
        app,
        post(
            "/api/attendance/bulk",
            &fx.teacher,
            json!({
                "date": "2023-11-10",
                "subject": "Physics",
                "records": [{"userId": 9999, "status": "PRESENT"}]
            }),
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call!(app, get("/api/attendance/summary", &fx.teacher));
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["late"], 1);
}

#[actix_web::test]
async fn test_fee_summary_and_status_rules() {
    let fx = setup().await;
    let app = init_app!(fx);
    let sid = fx.student.id;

    let mut ids = Vec::new();
    for (title, amount, status) in [
        ("Tuition", 1200.0, Some("PAID")),
        ("Library", 150.0, None),
        ("Lab", 15.0, Some("OVERDUE")),
    ] {
        let mut body = json!({"userId": sid, "title": title, "amount": amount, "dueDate": "2030-01-15"});
        if let Some(status) = status {
            body["status"] = json!(status);
        }
        let (code, resp) = call!(app, post("/api/fees", &fx.teacher, body));
        assert_eq!(code, StatusCode::CREATED);
        ids.push(resp["data"]["id"].as_i64().unwrap());
    }
    let (_, resp) = call!(
        app,
        post(
            "/api/fees",
            &fx.teacher,
            json!({"userId": fx.other.id, "title": "Sports", "amount": 50.0, "dueDate": "2030-02-01"}),
        )
    );
    let other_fee = resp["data"]["id"].as_i64().unwrap();

    let (status, _) = call!(
        app,
        post(
            "/api/fees",
            &fx.teacher,
            json!({"userId": sid, "title": "Free", "amount": 0.0, "dueDate": "2030-01-15"}),
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(
        app,
        post(
            "/api/fees",
            &fx.teacher,
            json!({"userId": 9999, "title": "Ghost", "amount": 5.0, "dueDate": "2030-01-15"}),
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call!(app, get("/api/fees/summary", &fx.student));
    assert_eq!(body["data"]["totalDue"].as_f64(), Some(165.0));
    assert_eq!(body["data"]["totalPaid"].as_f64(), Some(1200.0));
    assert_eq!(body["data"]["pending"], 1);
    assert_eq!(body["data"]["overdue"], 1);

    let (_, body) = call!(app, get("/api/fees/summary", &fx.teacher));
    assert_eq!(body["data"]["totalDue"].as_f64(), Some(215.0));
    assert_eq!(body["data"]["pending"], 2);

    let (_, body) = call!(app, get("/api/fees", &fx.student));
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // 学生只能把自己的费用标记为 PAID
    let uri = format!("/api/fees/{}", ids[1]);
    let (status, body) = call!(app, patch(&uri, &fx.student, json!({"status": "PAID"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "PAID");

    let uri = format!("/api/fees/{}", ids[2]);
    let (status, body) = call!(app, patch(&uri, &fx.student, json!({"status": "PENDING"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status");

    let uri = format!("/api/fees/{other_fee}");
    let (status, _) = call!(app, patch(&uri, &fx.student, json!({"status": "PAID"})));
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call!(app, patch(&uri, &fx.teacher, json!({"status": "OVERDUE"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "OVERDUE");

    let (status, body) = call!(
        app,
        patch("/api/fees/9999", &fx.teacher, json!({"status": "PAID"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Fee not found");
}

#[actix_web::test]
async fn test_assignment_submit_and_grade_touch_one_row() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(
        app,
        post(
            "/api/assignments",
            &fx.teacher,
            json!({
                "subject": "Mathematics",
                "title": "Calculus Problem Set 4",
                "dueDate": "2030-01-10",
                "studentIds": [fx.student.id, fx.other.id]
            }),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    let assignment_id = body["data"]["id"].as_i64().unwrap();
    let students = body["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|s| s["status"] == "PENDING"));

    let uri = format!("/api/assignments/{assignment_id}/submit");
    let (status, body) = call!(app, post(&uri, &fx.student, json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "SUBMITTED");
    assert!(!body["data"]["submittedAt"].is_null());

    let uri = format!("/api/assignments/{assignment_id}/grade");
    let (status, body) = call!(
        app,
        post(&uri, &fx.teacher, json!({"studentId": fx.other.id, "grade": "B+"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "GRADED");
    assert_eq!(body["data"]["grade"], "B+");

    let (_, body) = call!(app, get("/api/assignments", &fx.teacher));
    let rows = body["data"][0]["students"].as_array().unwrap();
    let status_of = |id: i64| {
        rows.iter()
            .find(|r| r["userId"].as_i64() == Some(id))
            .map(|r| r["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of(fx.student.id), "SUBMITTED");
    assert_eq!(status_of(fx.other.id), "GRADED");

    let (_, body) = call!(app, get("/api/assignments", &fx.student));
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["assignmentId"].as_i64(), Some(assignment_id));
    assert_eq!(mine[0]["title"], "Calculus Problem Set 4");

    let (status, _) = call!(app, post("/api/assignments/9999/submit", &fx.student, json!({})));
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 未被分配的学生
    let (_, body) = call!(
        app,
        post(
            "/api/assignments",
            &fx.teacher,
            json!({
                "subject": "History",
                "title": "Essay",
                "dueDate": "2030-02-01",
                "studentIds": [fx.student.id]
            }),
        )
    );
    let essay = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/assignments/{essay}/grade");
    let (status, _) = call!(
        app,
        post(&uri, &fx.teacher, json!({"studentId": fx.other.id, "grade": "A"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(
        app,
        post(
            "/api/assignments",
            &fx.teacher,
            json!({"subject": "History", "title": "Essay", "dueDate": "2030-02-01", "studentIds": [9999]}),
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_notifications_are_private() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(
        app,
        post(
            "/api/notifications",
            &fx.teacher,
            json!({"userId": fx.other.id, "title": "Reminder", "message": "Bring your lab coat"}),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "INFO");
    assert_eq!(body["data"]["read"], false);
    let id = body["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/notifications/{id}/read");
    let (status, _) = call!(app, patch(&uri, &fx.student, json!({})));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(app, patch(&uri, &fx.other, json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);

    let (status, body) = call!(
        app,
        post(
            "/api/notifications/broadcast",
            &fx.teacher,
            json!({"title": "Holiday", "message": "School closed Friday", "type": "ALERT"}),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 2);

    let (_, body) = call!(app, get("/api/notifications/unread-count", &fx.student));
    assert_eq!(body["data"]["count"], 1);

    let (status, body) = call!(
        app,
        post("/api/notifications/mark-all-read", &fx.student, json!({}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"success": true, "markedCount": 1}));

    let (_, body) = call!(app, get("/api/notifications/unread-count", &fx.student));
    assert_eq!(body["data"]["count"], 0);

    let (_, body) = call!(app, get("/api/notifications", &fx.student));
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["type"], "ALERT");
    assert_eq!(list[0]["read"], true);
}

#[actix_web::test]
async fn test_exams_crud_and_upcoming() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(
        app,
        post(
            "/api/exams",
            &fx.teacher,
            json!({"subject": "Physics Mid-term", "date": "2999-11-20", "time": "09:00 AM", "room": "Hall A"}),
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    let future_id = body["data"]["id"].as_i64().unwrap();

    call!(
        app,
        post(
            "/api/exams",
            &fx.teacher,
            json!({"subject": "History Final", "date": "2000-01-01", "time": "11:00 AM", "room": "Hall B"}),
        )
    );

    let (_, body) = call!(app, get("/api/exams", &fx.student));
    let all = body["data"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["subject"], "History Final");

    let (_, body) = call!(app, get("/api/exams/upcoming", &fx.student));
    let upcoming = body["data"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["id"].as_i64(), Some(future_id));

    let uri = format!("/api/exams/{future_id}");
    let (status, body) = call!(app, patch(&uri, &fx.teacher, json!({"room": "Hall C"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["room"], "Hall C");
    assert_eq!(body["data"]["subject"], "Physics Mid-term");

    let (status, body) = call!(app, delete(&uri, &fx.teacher));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = call!(app, delete(&uri, &fx.teacher));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_classes_and_timetable() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, _) = call!(
        app,
        post(
            "/api/classes",
            &fx.teacher,
            json!({"name": "  ", "subject": "Physics", "schedule": "Mon, Wed", "room": "101"}),
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call!(app, get("/api/classes/timetable", &fx.student));
    assert_eq!(body["data"]["days"].as_array().unwrap().len(), 5);
    let rows = body["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(
        rows.iter()
            .all(|r| r["cells"].as_array().unwrap().iter().all(Value::is_null))
    );

    let mut ids = Vec::new();
    for (name, subject) in [("10-A", "Physics"), ("10-B", "Chemistry")] {
        let (status, body) = call!(
            app,
            post(
                "/api/classes",
                &fx.teacher,
                json!({"name": name, "subject": subject, "schedule": "Mon, Wed", "room": "101"}),
            )
        );
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (_, body) = call!(app, get("/api/classes", &fx.student));
    let list = body["data"].as_array().unwrap();
    assert_eq!(list[0]["name"], "10-B");

    let (_, body) = call!(app, get("/api/classes/timetable", &fx.student));
    let rows = body["data"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["time"], "09:00 AM");
    assert!(rows[0]["cells"][0].is_null());
    assert!(!rows[0]["cells"][1].is_null());

    let uri = format!("/api/classes/{}", ids[0]);
    let (status, body) = call!(app, patch(&uri, &fx.teacher, json!({"room": "202"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["room"], "202");

    let (status, _) = call!(app, delete(&uri, &fx.teacher));
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call!(app, patch(&uri, &fx.teacher, json!({"room": "303"})));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_listing_and_profile_updates() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(app, get("/api/users?role=STUDENT", &fx.teacher));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let uri = format!("/api/users/{}", fx.other.id);
    let (status, body) = call!(app, patch(&uri, &fx.student, json!({"name": "Hacked"})));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cannot update other users");

    let uri = format!("/api/users/{}", fx.student.id);
    let (status, _) = call!(app, patch(&uri, &fx.student, json!({"avatar": "not-a-url"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(app, patch(&uri, &fx.student, json!({"name": "Alex R."})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alex R.");

    // 教师可以修改学生资料
    let (status, body) = call!(app, patch(&uri, &fx.teacher, json!({"section": "B"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["section"], "B");

    let (status, _) = call!(app, get("/api/users/9999", &fx.teacher));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(app, get("/api/users/abc", &fx.teacher));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_dashboard_aggregates_per_role() {
    let fx = setup().await;
    let app = init_app!(fx);

    call!(
        app,
        post(
            "/api/attendance",
            &fx.teacher,
            json!({"userId": fx.student.id, "date": "2023-11-05", "status": "PRESENT", "subject": "Math"}),
        )
    );
    call!(
        app,
        post(
            "/api/fees",
            &fx.teacher,
            json!({"userId": fx.other.id, "title": "Tuition", "amount": 300.0, "dueDate": "2030-01-15"}),
        )
    );
    call!(
        app,
        post(
            "/api/exams",
            &fx.teacher,
            json!({"subject": "Chemistry", "date": "2999-01-01", "time": "10:00 AM", "room": "Lab 2"}),
        )
    );
    call!(
        app,
        post(
            "/api/notifications",
            &fx.teacher,
            json!({"userId": fx.student.id, "title": "Hi", "message": "Welcome"}),
        )
    );

    let (status, body) = call!(app, get("/api/dashboard", &fx.student));
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["attendance"]["percentage"], 100);
    assert_eq!(data["fees"]["totalDue"].as_f64(), Some(0.0));
    assert_eq!(data["pendingAssignments"], 0);
    assert_eq!(data["nextExam"]["subject"], "Chemistry");
    assert_eq!(data["unreadNotifications"], 1);

    let (_, body) = call!(app, get("/api/dashboard", &fx.teacher));
    assert_eq!(body["data"]["fees"]["totalDue"].as_f64(), Some(300.0));
    assert_eq!(body["data"]["unreadNotifications"], 0);
}

#[actix_web::test]
async fn test_malformed_body_uses_error_envelope() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(
        app,
        TestRequest::post()
            .uri("/api/exams")
            .insert_header(bearer(&fx.teacher))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, _) = call!(
        app,
        post(
            "/api/attendance",
            &fx.teacher,
            json!({"userId": fx.student.id, "date": "yesterday", "status": "PRESENT", "subject": "Math"}),
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_api_info_and_health() {
    let fx = setup().await;
    let app = init_app!(fx);

    let (status, body) = call!(app, TestRequest::get().uri("/api"));
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["name"].as_str().unwrap().ends_with(" API"));
    assert_eq!(body["data"]["health"], "/api/health");

    let (status, body) = call!(app, TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[actix_web::test]
async fn test_login_is_rate_limited_per_ip() {
    let fx = setup().await;
    let app = init_app!(fx);
    let max = AppConfig::get().rate_limit.login_max_requests;

    let login = |last_octet: u8| {
        TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer(last_octet))
            .set_json(json!({"email": "nobody@edunova.edu", "password": PASSWORD}))
    };

    for _ in 0..max {
        let (status, _) = call!(app, login(40));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let resp = test::call_service(&app, login(40).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = resp
        .headers()
        .get("Retry-After")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=AppConfig::get().rate_limit.window_secs).contains(&retry_after));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::RateLimitExceeded as i32);

    // 其他来源地址不受影响
    let (status, _) = call!(app, login(41));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_is_rate_limited_per_ip() {
    let fx = setup().await;
    let app = init_app!(fx);
    let max = AppConfig::get().rate_limit.register_max_requests;

    let register = |last_octet: u8| {
        TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(peer(last_octet))
            .set_json(json!({"email": "bad", "password": "secret1", "name": "Bad", "role": "STUDENT"}))
    };

    for _ in 0..max {
        let (status, _) = call!(app, register(42));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, body) = call!(app, register(42));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], ErrorCode::RateLimitExceeded as i32);

    let (status, _) = call!(app, register(43));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
