use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::info;

use crate::models::ErrorCode;
use crate::models::users::entities::{Gender, User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::services::{bad_request, conflict, internal_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_initial_password;
use crate::utils::validate::validate_password_simple;

use super::{check_date_of_birth, check_email, check_name, check_school_year};

/// 待创建账号的原始输入
#[derive(Debug, Default)]
pub struct NewAccount {
    pub email: String,
    pub password: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}

/// 校验并创建账号
///
/// 未提供密码时生成一个初始密码，和新用户一起返回。
pub async fn create_account(
    storage: &Arc<dyn Storage>,
    role: UserRole,
    input: NewAccount,
) -> Result<(User, Option<String>), HttpResponse> {
    let email = check_email(&input.email)?;
    let firstname = check_name(&input.firstname)?;
    let lastname = check_name(&input.lastname)?;
    let parent_email = input.parent_email.as_deref().map(check_email).transpose()?;
    let date_of_birth = input
        .date_of_birth
        .as_deref()
        .map(check_date_of_birth)
        .transpose()?;
    let school_year = input.school_year.as_deref().map(check_school_year).transpose()?;

    let (password, generated) = match input.password {
        Some(password) => {
            validate_password_simple(&password)
                .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))?;
            (password, None)
        }
        None => {
            let password = generate_initial_password();
            (password.clone(), Some(password))
        }
    };
    let password_hash =
        hash_password(&password).map_err(|e| internal_error("Password hashing failed", e))?;

    let request = CreateUserRequest {
        email,
        password: password_hash,
        role: role.clone(),
        firstname,
        lastname,
        phone: input.phone.filter(|p| !p.trim().is_empty()),
        gender: input.gender,
        date_of_birth,
        parent_email,
        school_year,
    };

    match storage.create_user(request).await {
        Ok(user) => {
            info!("Created {} account {} ({})", role, user.id, user.email);
            Ok((user, generated))
        }
        Err(e) if e.is_unique_violation() => Err(conflict(
            ErrorCode::UserAlreadyExists,
            "Cet email est déjà utilisé",
        )),
        Err(e) => Err(internal_error("User creation failed", e)),
    }
}
