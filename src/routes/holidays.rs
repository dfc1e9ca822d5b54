use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::holidays::requests::{
    CreateHolidayRequest, HolidayListParams, UpdateHolidayRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::HolidayService;
use crate::utils::SafeIDI64;

// 懒加载的全局 HolidayService 实例
static HOLIDAY_SERVICE: Lazy<HolidayService> = Lazy::new(HolidayService::new_lazy);

pub async fn list_holidays(
    req: HttpRequest,
    query: web::Query<HolidayListParams>,
) -> ActixResult<HttpResponse> {
    HOLIDAY_SERVICE
        .list_holidays(&req, query.into_inner())
        .await
}

pub async fn list_upcoming(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOLIDAY_SERVICE.list_upcoming(&req).await
}

pub async fn create_holiday(
    req: HttpRequest,
    body: web::Json<CreateHolidayRequest>,
) -> ActixResult<HttpResponse> {
    HOLIDAY_SERVICE
        .create_holiday(&req, body.into_inner())
        .await
}

pub async fn update_holiday(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateHolidayRequest>,
) -> ActixResult<HttpResponse> {
    HOLIDAY_SERVICE
        .update_holiday(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_holiday(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HOLIDAY_SERVICE.delete_holiday(&req, id.0).await
}

// 配置路由
pub fn configure_holidays_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/holidays")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_holidays))
                    .route(
                        web::post()
                            .to(create_holiday)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            // 需在 /{id} 之前注册
            .route("/upcoming", web::get().to(list_upcoming))
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route(web::put().to(update_holiday))
                    .route(web::delete().to(delete_holiday)),
            ),
    );
}
