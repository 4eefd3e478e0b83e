//! Axum route handlers for the Webhook API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::formatting::normalizer::{normalize, ContentCategory};
use crate::models::webhook::{GenerationType, ResponseMetadata, WebhookResponse};
use crate::state::AppState;
use crate::webhook::{
    category_for, prepare_request, GenerationRequest, PreparedRequest, WebhookContract,
};

#[derive(Debug, Serialize)]
pub struct FormattedContentResponse {
    pub request_id: String,
    #[serde(rename = "type")]
    pub generation_type: GenerationType,
    pub category: ContentCategory,
    pub content: String,
    pub processing_time: Option<f64>,
    pub metadata: Option<ResponseMetadata>,
}

/// GET /api/v1/webhook/contract
///
/// Endpoints, headers and timings the front end uses to call the workflow.
pub async fn handle_get_contract(State(state): State<AppState>) -> Json<WebhookContract> {
    Json(WebhookContract::new(&state.config.webhook_base_url))
}

/// POST /api/v1/webhook/requests
///
/// Validates generation input and returns the fully stamped webhook call.
pub async fn handle_prepare_request(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<PreparedRequest>, AppError> {
    let prepared = prepare_request(&state.config.webhook_base_url, request)?;
    Ok(Json(prepared))
}

/// POST /api/v1/webhook/responses
///
/// Checks the workflow's status and normalizes the returned content for display.
pub async fn handle_format_response(
    Json(response): Json<WebhookResponse>,
) -> Result<Json<FormattedContentResponse>, AppError> {
    let raw = response.content()?;
    let category = category_for(response.generation_type);
    let content = normalize(category, raw);

    info!(
        "Formatted webhook response {} as {} ({} bytes)",
        response.request_id,
        category,
        content.len()
    );

    Ok(Json(FormattedContentResponse {
        request_id: response.request_id,
        generation_type: response.generation_type,
        category,
        content,
        processing_time: response.processing_time,
        metadata: response.metadata,
    }))
}
