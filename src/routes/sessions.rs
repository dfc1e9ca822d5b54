use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{attendances, behaviors, grades};
use crate::middlewares;
use crate::models::courses::requests::{EnrollStudentsRequest, UpdateSessionRequest};
use crate::models::users::entities::UserRole;
use crate::services::SessionService;
use crate::utils::{SafeSessionIdI64, SafeStudentIdI64};

// 懒加载的全局 SessionService 实例
static SESSION_SERVICE: Lazy<SessionService> = Lazy::new(SessionService::new_lazy);

pub async fn get_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.get_session(&req, session_id.0).await
}

pub async fn update_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    body: web::Json<UpdateSessionRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .update_session(&req, session_id.0, body.into_inner())
        .await
}

pub async fn list_students(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.list_students(&req, session_id.0).await
}

pub async fn enroll_students(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    body: web::Json<EnrollStudentsRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .enroll_students(&req, session_id.0, body.into_inner())
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .unenroll_student(&req, session_id.0, student_id.0)
        .await
}

// 配置路由
//
// 课节下的出勤、行为、成绩也挂在这里，共用 RequireSessionAccess 的校验结果。
pub fn configure_sessions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions/{session_id}")
            .wrap(middlewares::RequireSessionAccess)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_session))
                    .route(
                        web::put()
                            .to(update_session)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/students")
                    .route(web::get().to(list_students))
                    .route(
                        web::post()
                            .to(enroll_students)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/students/{student_id}").route(
                    web::delete()
                        .to(unenroll_student)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .configure(attendances::configure_session_attendances)
            .configure(behaviors::configure_session_behaviors)
            .configure(grades::configure_session_grades),
    );
}
