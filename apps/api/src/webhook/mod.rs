//! Workflow webhook contract — fixed endpoints, headers and timings the front end must honor.
//!
//! This service never calls the webhook itself. It hands out the contract, prepares
//! validated request payloads, and formats the responses the caller brings back.

pub mod handlers;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::formatting::normalizer::ContentCategory;
use crate::models::webhook::{GenerationData, GenerationType, WebhookRequest};

/// Whole-request budget for a generation call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(70);
/// How often the caller polls the status endpoint while generation is running.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Duration the progress indicator is animated over. Shorter than the timeout.
pub const PROGRESS_DURATION: Duration = Duration::from_secs(65);

pub const RESUME_ENDPOINT: &str = "/webhook/resume-generation";
pub const COVER_LETTER_ENDPOINT: &str = "/webhook/cover-letter-generation";
pub const STATUS_ENDPOINT: &str = "/webhook/processing-status";

pub const USER_AGENT: &str = "ResumeFormatter-Web/1.0";
pub const SOURCE_HEADER: &str = "X-Request-Source";
pub const SOURCE_VALUE: &str = "resume-formatter-web";

/// Headers sent on every webhook request, in order.
pub const REQUEST_HEADERS: &[(&str, &str)] = &[
    ("Content-Type", "application/json"),
    ("User-Agent", USER_AGENT),
    (SOURCE_HEADER, SOURCE_VALUE),
];

pub fn endpoint_for(generation_type: GenerationType) -> &'static str {
    match generation_type {
        GenerationType::Resume => RESUME_ENDPOINT,
        GenerationType::CoverLetter => COVER_LETTER_ENDPOINT,
    }
}

/// Which normalizer a finished document goes through before display.
pub fn category_for(generation_type: GenerationType) -> ContentCategory {
    match generation_type {
        GenerationType::Resume => ContentCategory::Resume,
        GenerationType::CoverLetter => ContentCategory::CoverLetterParagraph,
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn headers() -> Vec<HeaderEntry> {
    REQUEST_HEADERS
        .iter()
        .map(|(name, value)| HeaderEntry {
            name: (*name).to_string(),
            value: (*value).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractEndpoints {
    pub resume: String,
    pub cover_letter: String,
    pub status: String,
}

/// Serializable view of the contract, with absolute URLs for the configured base.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookContract {
    pub endpoints: ContractEndpoints,
    pub headers: Vec<HeaderEntry>,
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub progress_duration_ms: u64,
}

impl WebhookContract {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoints: ContractEndpoints {
                resume: join_url(base_url, RESUME_ENDPOINT),
                cover_letter: join_url(base_url, COVER_LETTER_ENDPOINT),
                status: join_url(base_url, STATUS_ENDPOINT),
            },
            headers: headers(),
            timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
            poll_interval_ms: POLL_INTERVAL.as_millis() as u64,
            progress_duration_ms: PROGRESS_DURATION.as_millis() as u64,
        }
    }
}

/// What the caller supplies; id and timestamp are stamped on preparation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "type")]
    pub generation_type: GenerationType,
    pub user_id: String,
    pub user_email: String,
    pub data: GenerationData,
}

/// A ready-to-send webhook call. The caller performs the POST.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedRequest {
    pub url: String,
    pub method: &'static str,
    pub headers: Vec<HeaderEntry>,
    pub timeout_ms: u64,
    pub status_url: String,
    pub payload: WebhookRequest,
}

fn require_field(name: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Validates `request` and builds the webhook call for it.
pub fn prepare_request(
    base_url: &str,
    request: GenerationRequest,
) -> Result<PreparedRequest, AppError> {
    require_field("user_id", &request.user_id)?;
    require_field("user_email", &request.user_email)?;
    if !request.user_email.contains('@') {
        return Err(AppError::Validation(format!(
            "user_email '{}' is not a valid email address",
            request.user_email
        )));
    }
    require_field("data.job_title", &request.data.job_title)?;
    require_field("data.company_name", &request.data.company_name)?;
    require_field("data.job_description", &request.data.job_description)?;

    let payload = WebhookRequest::new(
        request.generation_type,
        request.user_id,
        request.user_email,
        request.data,
    );

    info!(
        "Prepared {:?} webhook request {} for user {}",
        payload.generation_type, payload.request_id, payload.user_id
    );

    Ok(PreparedRequest {
        url: join_url(base_url, endpoint_for(payload.generation_type)),
        method: "POST",
        headers: headers(),
        timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
        status_url: join_url(base_url, STATUS_ENDPOINT),
        payload,
    })
}
