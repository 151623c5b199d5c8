use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;
use crate::utils::SafeIDI64;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn list_upcoming(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_upcoming(&req).await
}

pub async fn create_exam(
    req: HttpRequest,
    body: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, body.into_inner()).await
}

pub async fn update_exam(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.update_exam(&req, id.0, body.into_inner()).await
}

pub async fn delete_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, id.0).await
}

// 配置路由
pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(web::resource("/upcoming").route(web::get().to(list_upcoming)))
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
                    .route(web::patch().to(update_exam))
                    .route(web::delete().to(delete_exam)),
            ),
    );
}
