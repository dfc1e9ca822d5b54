use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// 数据校验失败时统一使用的提示语
pub const INVALID_DATA_MESSAGE: &str = "Données invalides";

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            success: code.is_success(),
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: code.is_success(),
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 数据校验失败：`{success: false, message: "Données invalides"}`
    pub fn invalid_data() -> Self {
        Self::error_empty(ErrorCode::InvalidData, INVALID_DATA_MESSAGE)
    }

    /// 带原因的数据校验失败
    pub fn invalid_data_with(reason: impl AsRef<str>) -> Self {
        Self::error_empty(
            ErrorCode::InvalidData,
            format!("{INVALID_DATA_MESSAGE}: {}", reason.as_ref()),
        )
    }
}

/// 旧版 `/api/users/*` 接口使用的响应信封
#[derive(Debug, Clone, Serialize)]
pub struct LegacyResponse<T> {
    pub status: u16,
    pub data: T,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl<T: Serialize> LegacyResponse<T> {
    pub fn new(status: u16, data: T, status_text: impl Into<String>) -> Self {
        Self {
            status,
            data,
            status_text: status_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_envelope() {
        let json = serde_json::to_value(ApiResponse::invalid_data()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Données invalides");
        assert_eq!(json["code"], ErrorCode::InvalidData as i32);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(42, "ok")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_legacy_envelope_uses_camel_case_status_text() {
        let json = serde_json::to_value(LegacyResponse::new(200, vec![1, 2], "OK")).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["statusText"], "OK");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
