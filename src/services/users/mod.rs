//! 学生与教师共用的账号操作
//!
//! 这里只做校验与持久化，返回值由 students / teachers 各自包装成视图。

pub mod create;
pub mod delete;
pub mod update;

use actix_web::HttpResponse;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::validate::{parse_date, validate_email, validate_name, validate_school_year};

use super::{bad_request, internal_error, invalid_data, not_found};

pub use create::{NewAccount, create_account};
pub use delete::delete_account;
pub use update::{AccountChanges, update_account};

/// 按角色读取账号，角色不符视为不存在
pub async fn load_account(
    storage: &Arc<dyn Storage>,
    id: i64,
    role: UserRole,
) -> Result<User, HttpResponse> {
    match storage.get_user_by_id(id).await {
        Ok(Some(user)) if user.role == role => Ok(user),
        Ok(_) => Err(not_found(ErrorCode::UserNotFound, not_found_message(&role))),
        Err(e) => Err(internal_error("Failed to load user", e)),
    }
}

fn not_found_message(role: &UserRole) -> &'static str {
    match role {
        UserRole::Student => "Élève introuvable",
        UserRole::Teacher => "Enseignant introuvable",
        UserRole::Admin => "Utilisateur introuvable",
    }
}

pub(crate) fn check_email(email: &str) -> Result<String, HttpResponse> {
    let email = email.trim().to_lowercase();
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    Ok(email)
}

pub(crate) fn check_name(name: &str) -> Result<String, HttpResponse> {
    let name = name.trim().to_string();
    validate_name(&name).map_err(invalid_data)?;
    Ok(name)
}

/// 出生日期不能晚于今天
pub(crate) fn check_date_of_birth(raw: &str) -> Result<NaiveDate, HttpResponse> {
    let date = parse_date(raw).map_err(invalid_data)?;
    if date > chrono::Local::now().date_naive() {
        return Err(invalid_data("date de naissance dans le futur"));
    }
    Ok(date)
}

pub(crate) fn check_school_year(school_year: &str) -> Result<String, HttpResponse> {
    let school_year = school_year.trim().to_string();
    validate_school_year(&school_year).map_err(invalid_data)?;
    Ok(school_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(check_email("  Jane.Doe@Example.org ").unwrap(), "jane.doe@example.org");
        assert!(check_email("not-an-email").is_err());
    }

    #[test]
    fn test_date_of_birth() {
        assert!(check_date_of_birth("2014-05-02").is_ok());
        assert!(check_date_of_birth("02/05/2014").is_err());
        assert!(check_date_of_birth("2999-01-01").is_err());
    }

    #[test]
    fn test_names_and_school_year() {
        assert_eq!(check_name(" Amine ").unwrap(), "Amine");
        assert!(check_name("").is_err());
        assert!(check_school_year("2025-2026").is_ok());
        assert!(check_school_year("2025-2027").is_err());
    }
}
