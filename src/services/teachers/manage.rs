use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::teachers::entities::Teacher;
use crate::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::models::teachers::responses::TeacherCreatedResponse;
use crate::models::users::entities::UserRole;
use crate::services::try_response;
use crate::services::users::{
    AccountChanges, NewAccount, create_account, delete_account, update_account,
};

use super::TeacherService;

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    body: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let input = NewAccount {
        email: body.email,
        password: body.password,
        firstname: body.firstname,
        lastname: body.lastname,
        phone: body.phone,
        gender: body.gender,
        ..Default::default()
    };

    let (user, generated_password) =
        try_response!(create_account(&storage, UserRole::Teacher, input).await);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        TeacherCreatedResponse {
            teacher: Teacher::from(user),
            generated_password,
        },
        "Enseignant créé",
    )))
}

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    body: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let changes = AccountChanges {
        email: body.email,
        firstname: body.firstname,
        lastname: body.lastname,
        phone: body.phone,
        gender: body.gender,
        ..Default::default()
    };

    let user = try_response!(
        update_account(&storage, &service.get_cache(request), id, UserRole::Teacher, changes).await
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(Teacher::from(user), "Enseignant mis à jour")))
}

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    try_response!(delete_account(&storage, &cache, id, UserRole::Teacher).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Enseignant supprimé")))
}
