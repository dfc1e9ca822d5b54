use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::students::entities::Student;
use crate::models::students::requests::{CreateStudentRequest, UpdateStudentRequest};
use crate::models::students::responses::StudentCreatedResponse;
use crate::models::users::entities::UserRole;
use crate::services::try_response;
use crate::services::users::{
    AccountChanges, NewAccount, create_account, delete_account, update_account,
};

use super::StudentService;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let input = NewAccount {
        email: body.email,
        password: body.password,
        firstname: body.firstname,
        lastname: body.lastname,
        phone: body.phone,
        gender: body.gender,
        date_of_birth: body.date_of_birth,
        parent_email: body.parent_email,
        school_year: body.school_year,
    };

    let (user, generated_password) =
        try_response!(create_account(&storage, UserRole::Student, input).await);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentCreatedResponse {
            student: Student::from(user),
            generated_password,
        },
        "Élève créé",
    )))
}

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    body: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let changes = AccountChanges {
        email: body.email,
        firstname: body.firstname,
        lastname: body.lastname,
        phone: body.phone,
        gender: body.gender,
        date_of_birth: body.date_of_birth,
        parent_email: body.parent_email,
        school_year: body.school_year,
    };

    let user = try_response!(
        update_account(&storage, &service.get_cache(request), id, UserRole::Student, changes).await
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(Student::from(user), "Élève mis à jour")))
}

/// 软删除，同时退出全部课节
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    try_response!(delete_account(&storage, &cache, id, UserRole::Student).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Élève supprimé")))
}
