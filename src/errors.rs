//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_eduroots_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EdurootsError {
            $($variant(String),)*
        }

        impl EdurootsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EdurootsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EdurootsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EdurootsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EdurootsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EdurootsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_eduroots_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
}

impl EdurootsError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（各数据库驱动的报错文本不同）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }

    /// 数据库唯一约束或存储层事务检出的重复记录
    pub fn is_duplicate(&self) -> bool {
        matches!(self, EdurootsError::Conflict(_)) || self.is_unique_violation()
    }
}

impl fmt::Display for EdurootsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EdurootsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EdurootsError {
    fn from(err: sea_orm::DbErr) -> Self {
        EdurootsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EdurootsError {
    fn from(err: std::io::Error) -> Self {
        EdurootsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EdurootsError {
    fn from(err: serde_json::Error) -> Self {
        EdurootsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EdurootsError {
    fn from(err: chrono::ParseError) -> Self {
        EdurootsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EdurootsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EdurootsError::cache_connection("test").code(), "E001");
        assert_eq!(EdurootsError::database_config("test").code(), "E003");
        assert_eq!(EdurootsError::validation("test").code(), "E007");
        assert_eq!(EdurootsError::conflict("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EdurootsError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            EdurootsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = EdurootsError::validation("Données invalides");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Données invalides"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = EdurootsError::database_operation(
            "Execution Error: UNIQUE constraint failed: users.email",
        );
        let postgres = EdurootsError::database_operation(
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        let other = EdurootsError::database_operation("connection reset");
        assert!(sqlite.is_unique_violation());
        assert!(postgres.is_unique_violation());
        assert!(!other.is_unique_violation());
    }

    #[test]
    fn test_duplicate_covers_conflict() {
        assert!(EdurootsError::conflict("déjà saisi").is_duplicate());
        assert!(
            EdurootsError::database_operation("UNIQUE constraint failed: attendances.date")
                .is_duplicate()
        );
        assert!(!EdurootsError::not_found("absent").is_duplicate());
    }

    #[test]
    fn test_date_parse_conversion() {
        let err: EdurootsError = chrono::NaiveDate::parse_from_str("2025-13-40", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E011");
    }
}
