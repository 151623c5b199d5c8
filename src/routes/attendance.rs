use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListParams, BulkAttendanceRequest, CreateAttendanceRequest, UpdateAttendanceRequest,
    UserScopeParams,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

pub async fn get_summary(
    req: HttpRequest,
    query: web::Query<UserScopeParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_summary(&req, query.into_inner()).await
}

pub async fn create_attendance(
    req: HttpRequest,
    body: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, body.into_inner())
        .await
}

pub async fn bulk_create(
    req: HttpRequest,
    body: web::Json<BulkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.bulk_create(&req, body.into_inner()).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(
                        web::post()
                            .to(create_attendance)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            // 固定路径必须在 /{id} 之前注册
            .service(web::resource("/summary").route(web::get().to(get_summary)))
            .service(
                web::resource("/bulk").route(
                    web::post()
                        .to(bulk_create)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{id}").route(
                    web::patch()
                        .to(update_attendance)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
