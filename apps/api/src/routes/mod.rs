pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::formatting::handlers as formatting;
use crate::state::AppState;
use crate::webhook::handlers as webhook;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Formatting API
        .route("/api/v1/format", post(formatting::handle_format))
        // Webhook API
        .route(
            "/api/v1/webhook/contract",
            get(webhook::handle_get_contract),
        )
        .route(
            "/api/v1/webhook/requests",
            post(webhook::handle_prepare_request),
        )
        .route(
            "/api/v1/webhook/responses",
            post(webhook::handle_format_response),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_router() -> Router {
        build_router(AppState {
            config: Config {
                webhook_base_url: "https://workflows.example.com".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
            },
        })
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_format_generic() {
        let (status, body) = send(
            "POST",
            "/api/v1/format",
            Some(json!({"category": "generic", "content": "* **one**\n- *two*"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "generic");
        assert_eq!(body["content"], "• one\n• two");
    }

    #[tokio::test]
    async fn test_format_cover_letter_preserving_paragraphs() {
        let (status, body) = send(
            "POST",
            "/api/v1/format",
            Some(json!({
                "category": "cover-letter-paragraph",
                "content": "# Letter\nDear team,\n\nI   apply.",
                "paragraph_mode": "preserve_paragraphs"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Dear team,\n\nI apply.");
    }

    #[tokio::test]
    async fn test_format_rejects_paragraph_mode_for_resume() {
        let (status, body) = send(
            "POST",
            "/api/v1/format",
            Some(json!({
                "category": "resume",
                "content": "x",
                "paragraph_mode": "flatten"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_contract_uses_configured_base_url() {
        let (status, body) = send("GET", "/api/v1/webhook/contract", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["endpoints"]["cover_letter"],
            "https://workflows.example.com/webhook/cover-letter-generation"
        );
        assert_eq!(body["timeout_ms"], 70_000);
    }

    #[tokio::test]
    async fn test_prepare_request_roundtrip() {
        let (status, body) = send(
            "POST",
            "/api/v1/webhook/requests",
            Some(json!({
                "type": "resume",
                "user_id": "user-1",
                "user_email": "jane@example.com",
                "data": {
                    "job_title": "Engineer",
                    "company_name": "Acme",
                    "job_description": "Rust services"
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["url"],
            "https://workflows.example.com/webhook/resume-generation"
        );
        assert_eq!(body["payload"]["type"], "resume");
        assert!(body["payload"]["request_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_prepare_request_validation_error() {
        let (status, body) = send(
            "POST",
            "/api/v1/webhook/requests",
            Some(json!({
                "type": "cover-letter",
                "user_id": "",
                "user_email": "jane@example.com",
                "data": {
                    "job_title": "Engineer",
                    "company_name": "Acme",
                    "job_description": "Rust services"
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_format_response_success_resume() {
        let (status, body) = send(
            "POST",
            "/api/v1/webhook/responses",
            Some(json!({
                "request_id": "req-1",
                "type": "resume",
                "status": "success",
                "content": "## Skills\n* Rust",
                "processing_time": 12.5,
                "metadata": {"keywords_found": ["Rust"], "ats_score": 91.0, "suggestions_count": 2}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "resume");
        assert_eq!(
            body["content"],
            format!("Skills\n{}\n\n• Rust", "-".repeat(30))
        );
        assert_eq!(body["metadata"]["ats_score"], 91.0);
    }

    #[tokio::test]
    async fn test_format_response_cover_letter_is_flattened() {
        let (status, body) = send(
            "POST",
            "/api/v1/webhook/responses",
            Some(json!({
                "request_id": "req-2",
                "type": "cover-letter",
                "status": "success",
                "content": "Dear team,\n\nThanks."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "cover-letter-paragraph");
        assert_eq!(body["content"], "Dear team, Thanks.");
    }

    #[tokio::test]
    async fn test_format_response_error_status_is_bad_gateway() {
        let (status, body) = send(
            "POST",
            "/api/v1/webhook/responses",
            Some(json!({
                "request_id": "req-3",
                "type": "resume",
                "status": "error",
                "error_message": "quota exceeded"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "WEBHOOK_ERROR");
        assert_eq!(body["error"]["message"], "quota exceeded");
    }
}
