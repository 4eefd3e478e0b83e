//! Payload schemas exchanged with the content-generation workflow webhook.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Which document the workflow is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationType {
    Resume,
    CoverLetter,
}

/// Job/company context plus the optional cover-letter fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationData {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_company: Option<String>,
}

/// Body POSTed to the resume or cover-letter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "type")]
    pub generation_type: GenerationType,
    pub user_id: String,
    pub user_email: String,
    pub request_id: String,
    /// ISO-8601, UTC.
    pub timestamp: String,
    pub data: GenerationData,
}

impl WebhookRequest {
    /// Builds a request with a fresh request id and the current timestamp.
    pub fn new(
        generation_type: GenerationType,
        user_id: String,
        user_email: String,
        data: GenerationData,
    ) -> Self {
        Self {
            generation_type,
            user_id,
            user_email,
            request_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_found: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions_count: Option<u32>,
}

/// What the workflow sends back once generation finishes (or fails).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub request_id: String,
    #[serde(rename = "type")]
    pub generation_type: GenerationType,
    pub status: ResponseStatus,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
}

impl WebhookResponse {
    /// Returns the raw content after checking `status`.
    ///
    /// The normalizer never inspects `status`; callers must go through this before formatting.
    pub fn content(&self) -> Result<&str, AppError> {
        match self.status {
            ResponseStatus::Error => Err(AppError::Webhook(
                self.error_message
                    .clone()
                    .unwrap_or_else(|| "generation failed without an error message".to_string()),
            )),
            ResponseStatus::Success => self.content.as_deref().ok_or_else(|| {
                AppError::UnprocessableEntity(format!(
                    "Webhook response {} reported success without content",
                    self.request_id
                ))
            }),
        }
    }
}
