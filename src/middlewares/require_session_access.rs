/*!
 * 课节访问控制中间件
 *
 * 用于带 `{session_id}` 路径参数的路由，必须挂在 RequireJWT 之后：
 * - 管理员直接放行
 * - 教师必须是该课节所属课程的任课教师
 * - 其余情况返回 403
 *
 * 通过校验后，课节本身写入请求扩展，处理函数可用
 * `RequireSessionAccess::extract_session(&req)` 取回，避免重复查询。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use crate::{
    errors::Result,
    models::{
        ErrorCode,
        courses::entities::CourseSession,
        users::entities::{User, UserRole},
    },
    storage::Storage,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireSessionAccess;

/// 访问判定结果
#[derive(Debug, PartialEq, Eq)]
pub enum SessionAccess {
    Granted,
    Forbidden,
}

/// 判断用户能否访问某课节
pub async fn check_session_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    session: &CourseSession,
) -> Result<SessionAccess> {
    match user.role {
        UserRole::Admin => Ok(SessionAccess::Granted),
        UserRole::Teacher => {
            if storage.is_course_teacher(session.course_id, user.id).await? {
                Ok(SessionAccess::Granted)
            } else {
                Ok(SessionAccess::Forbidden)
            }
        }
        UserRole::Student => Ok(SessionAccess::Forbidden),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSessionAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionAccessMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionAccessMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionAccessMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // 1. 当前用户
            let Some(user) = req.extensions().get::<User>().cloned() else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentification requise",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. session_id
            let Some(session_id) = req
                .match_info()
                .get("session_id")
                .and_then(|s| s.parse::<i64>().ok())
                .filter(|id| *id > 0)
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::InvalidData,
                        "Données invalides: session_id invalide",
                    )
                    .map_into_right_body(),
                ));
            };

            let storage = req
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone();

            // 3. 课节存在
            let session = match storage.get_session_by_id(session_id).await {
                Ok(Some(session)) => session,
                Ok(None) => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::SessionNotFound,
                            "Séance introuvable",
                        )
                        .map_into_right_body(),
                    ));
                }
                Err(e) => {
                    error!("Failed to load session {}: {}", session_id, e);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Erreur interne",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 4. 权限
            match check_session_access(&storage, &user, &session).await {
                Ok(SessionAccess::Granted) => {
                    debug!("User {} granted access to session {}", user.id, session_id);
                    req.extensions_mut().insert(session);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Ok(SessionAccess::Forbidden) => {
                    info!("User {} denied access to session {}", user.id, session_id);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::SessionPermissionDenied,
                            "Accès refusé à cette séance",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(e) => {
                    error!("Session access check failed: {}", e);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Erreur interne",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireSessionAccess {
    /// 取出中间件已校验的课节
    pub fn extract_session(req: &actix_web::HttpRequest) -> Option<CourseSession> {
        req.extensions().get::<CourseSession>().cloned()
    }
}
