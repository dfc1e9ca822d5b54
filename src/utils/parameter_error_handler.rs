use actix_web::{HttpRequest, HttpResponse, error};
use tracing::debug;

use crate::models::ApiResponse;

// JSON 反序列化失败时返回 400，并附带原因
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    debug!("Invalid JSON payload on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::invalid_data_with(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

// 不附带原因，只返回 "Données invalides"
pub fn strict_json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    debug!("Invalid JSON payload on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::invalid_data());
    error::InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> error::Error {
    debug!("Invalid query string on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::invalid_data_with(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        rating: i32,
    }

    async fn accept(_body: web::Json<Payload>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn post_bad_payload(config: web::JsonConfig) -> serde_json::Value {
        let app = test::init_service(
            App::new()
                .app_data(config)
                .route("/", web::post().to(accept)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"rating": "cinq"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn test_strict_handler_hides_reason() {
        let body =
            post_bad_payload(web::JsonConfig::default().error_handler(strict_json_error_handler))
                .await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Données invalides");
    }

    #[actix_web::test]
    async fn test_default_handler_keeps_reason() {
        let body =
            post_bad_payload(web::JsonConfig::default().error_handler(json_error_handler)).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Données invalides: "));
    }
}
