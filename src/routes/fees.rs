use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::UserScopeParams;
use crate::models::fees::requests::{CreateFeeRequest, UpdateFeeRequest};
use crate::models::users::entities::UserRole;
use crate::services::FeeService;
use crate::utils::SafeIDI64;

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<UserScopeParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(&req, query.into_inner()).await
}

pub async fn get_summary(
    req: HttpRequest,
    query: web::Query<UserScopeParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_summary(&req, query.into_inner()).await
}

pub async fn create_fee(
    req: HttpRequest,
    body: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_fee(&req, body.into_inner()).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.update_fee(&req, id.0, body.into_inner()).await
}

// 配置路由
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/fees")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_fees))
                    .route(
                        web::post()
                            .to(create_fee)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(web::resource("/summary").route(web::get().to(get_summary)))
            // 学生可以把自己的费用标记为已缴，在服务层判断
            .service(web::resource("/{id}").route(web::patch().to(update_fee))),
    );
}
