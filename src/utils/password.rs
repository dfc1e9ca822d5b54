use crate::config::{AppConfig, Argon2Config};
use crate::errors::EdurootsError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 哈希密码（argon2id，参数来自配置）
pub fn hash_password(password: &str) -> Result<String, EdurootsError> {
    hash_password_with(password, &AppConfig::get().argon2)
}

pub fn hash_password_with(password: &str, cost: &Argon2Config) -> Result<String, EdurootsError> {
    let params = Params::new(cost.memory_cost, cost.time_cost, cost.parallelism, None)
        .map_err(|e| EdurootsError::validation(format!("Argon2 参数错误: {e}")))?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| EdurootsError::validation(format!("密码哈希失败: {e}")))
}

/// 验证密码，参数从哈希串本身读取；无法解析的哈希一律视为不匹配
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_cost() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password_with("Bonjour2025", &cheap_cost()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Bonjour2025", &hash));
        assert!(!verify_password("bonjour2025", &hash));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password_with("Bonjour2025", &cheap_cost()).unwrap();
        let b = hash_password_with("Bonjour2025", &cheap_cost()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("whatever", "not-a-hash"));
    }

    #[test]
    fn test_invalid_cost_is_reported() {
        let cost = Argon2Config {
            memory_cost: 1,
            time_cost: 1,
            parallelism: 1,
        };
        assert!(hash_password_with("Bonjour2025", &cost).is_err());
    }
}
