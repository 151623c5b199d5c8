pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod frontend;
pub mod notifications;
pub mod system;
pub mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

pub use assignments::configure_assignment_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use exams::configure_exam_routes;
pub use fees::configure_fee_routes;
pub use frontend::configure_frontend_routes;
pub use notifications::configure_notification_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

/// 注册全部 `/api` 路由，前端 fallback 需另行在最后注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_attendance_routes)
        .configure(configure_fee_routes)
        .configure(configure_assignment_routes)
        .configure(configure_exam_routes)
        .configure(configure_notification_routes)
        .configure(configure_classes_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_system_routes);
}
