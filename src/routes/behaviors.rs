use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::behaviors::requests::{CreateBehaviorRequest, UpdateBehaviorRequest};
use crate::models::common::DateRangeParams;
use crate::models::users::entities::UserRole;
use crate::services::BehaviorService;
use crate::utils::{SafeIDI64, SafeSessionIdI64, strict_json_error_handler};

// 懒加载的全局 BehaviorService 实例
static BEHAVIOR_SERVICE: Lazy<BehaviorService> = Lazy::new(BehaviorService::new_lazy);

/// 行为评价的请求体解析失败时只返回 "Données invalides"
fn strict_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(strict_json_error_handler)
}

pub async fn list_behaviors(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    query: web::Query<DateRangeParams>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE
        .list_behaviors(&req, session_id.0, query.into_inner())
        .await
}

pub async fn create_behavior(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    body: web::Json<CreateBehaviorRequest>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE
        .create_behavior(&req, session_id.0, body.into_inner())
        .await
}

pub async fn get_behavior(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.get_behavior(&req, id.0).await
}

pub async fn update_behavior(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateBehaviorRequest>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE
        .update_behavior(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_behavior(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.delete_behavior(&req, id.0).await
}

/// 挂在 `/api/v1/sessions/{session_id}` 作用域下
pub fn configure_session_behaviors(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/behaviors")
            .app_data(strict_json_config())
            .route(web::get().to(list_behaviors))
            .route(web::post().to(create_behavior)),
    );
}

// 配置路由
pub fn configure_behaviors_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/behaviors")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .app_data(strict_json_config())
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_behavior))
                    .route(web::put().to(update_behavior))
                    .route(web::delete().to(delete_behavior)),
            ),
    );
}
