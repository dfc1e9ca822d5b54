use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::DATE_FORMAT;

pub const TIME_FORMAT: &str = "%H:%M";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 字母（含重音）、空格、连字符和撇号
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L} '\-]*$").expect("Invalid name regex"));

static SCHOOL_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid school year regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("Invalid time regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Format d'email invalide");
    }
    Ok(())
}

/// 姓名校验：1..=50 个字符
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > 50 {
        return Err("Le nom doit contenir entre 1 et 50 caractères");
    }
    if !NAME_RE.is_match(trimmed) {
        return Err("Le nom contient des caractères non autorisés");
    }
    Ok(())
}

/// 学年格式 "2025-2026"，后一年必须紧接前一年
pub fn validate_school_year(school_year: &str) -> Result<(), &'static str> {
    let caps = SCHOOL_YEAR_RE
        .captures(school_year)
        .ok_or("Année scolaire invalide (format attendu: AAAA-AAAA)")?;
    let start: i32 = caps[1].parse().map_err(|_| "Année scolaire invalide")?;
    let end: i32 = caps[2].parse().map_err(|_| "Année scolaire invalide")?;
    if end != start + 1 {
        return Err("Année scolaire invalide (années non consécutives)");
    }
    Ok(())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| "Date invalide (format attendu: AAAA-MM-JJ)")
}

/// 严格的 "HH:MM"，不接受秒
pub fn parse_time(value: &str) -> Result<NaiveTime, &'static str> {
    if !TIME_RE.is_match(value) {
        return Err("Heure invalide (format attendu: HH:MM)");
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| "Heure invalide")
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Le mot de passe doit contenir au moins 8 caractères");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Le mot de passe doit contenir au moins une majuscule");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Le mot de passe doit contenir au moins une minuscule");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Le mot de passe doit contenir au moins un chiffre");
    }

    // 常见弱密码
    let weak_passwords = [
        "password1",
        "motdepasse1",
        "azerty123",
        "qwerty123",
        "admin123",
        "abcd1234",
        "bonjour1",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Mot de passe trop courant");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("Ecole2025x").is_valid);
    }

    #[test]
    fn test_password_rules() {
        let short = validate_password("Ab1");
        assert!(!short.is_valid);
        assert!(short.errors.len() == 1);

        assert!(!validate_password("abcd12345").is_valid);
        assert!(!validate_password("ABCD12345").is_valid);
        assert!(!validate_password("AbcdEfghi").is_valid);
        assert!(!validate_password("Azerty123").is_valid);
    }

    #[test]
    fn test_names() {
        assert!(validate_name("Anaïs").is_ok());
        assert!(validate_name("Jean-Baptiste").is_ok());
        assert!(validate_name("N'Diaye").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("R2D2").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("parent@example.fr").is_ok());
        assert!(validate_email("parent@example").is_err());
        assert!(validate_email("no-at.example.fr").is_err());
    }

    #[test]
    fn test_school_year() {
        assert!(validate_school_year("2025-2026").is_ok());
        assert!(validate_school_year("2025-2027").is_err());
        assert!(validate_school_year("25-26").is_err());
    }

    #[test]
    fn test_date_and_time() {
        assert_eq!(
            parse_date("2025-09-13").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
        );
        assert!(parse_date("13/09/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());

        assert!(parse_time("09:30").is_ok());
        assert!(parse_time("9:30").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("09:30:00").is_err());
    }
}
