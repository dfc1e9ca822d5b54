use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::requests::{CalendarParams, UpdateSchedulesRequest};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;

// 懒加载的全局 ScheduleService 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_schedules(&req).await
}

pub async fn update_schedules(
    req: HttpRequest,
    body: web::Json<UpdateSchedulesRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedules(&req, body.into_inner())
        .await
}

pub async fn get_calendar(
    req: HttpRequest,
    query: web::Query<CalendarParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .get_calendar(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_schedules))
                    .route(
                        web::put()
                            .to(update_schedules)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .route("/calendar", web::get().to(get_calendar)),
    );
}
