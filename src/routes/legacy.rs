//! 旧版前端仍在调用的用户列表接口
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::LegacyService;

static LEGACY_SERVICE: Lazy<LegacyService> = Lazy::new(LegacyService::new_lazy);

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    LEGACY_SERVICE.list_teachers(&req).await
}

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    LEGACY_SERVICE.list_students(&req).await
}

pub fn configure_legacy_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/teacher", web::get().to(list_teachers))
            .route("/student", web::get().to(list_students)),
    );
}
