//! 路径参数提取器
//!
//! 从路由匹配信息中读取指定名称的参数并解析为正整数 ID，
//! 解析失败时直接返回 400 "Données invalides"。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error};
use std::future::{Ready, ready};

use crate::models::ApiResponse;

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, error::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::invalid_data_with(format!("{name} invalide")));
            let message = format!("invalid {name}: {raw}");
            Err(error::InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = error::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_path_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeCourseIdI64 => "course_id",
    SafeSessionIdI64 => "session_id",
    SafeStudentIdI64 => "student_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let req = TestRequest::default()
            .param("session_id", "12")
            .to_http_request();
        let id = SafeSessionIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 12);
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_and_zero() {
        let req = TestRequest::default().param("id", "abc").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());

        let req = TestRequest::default().param("id", "0").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
