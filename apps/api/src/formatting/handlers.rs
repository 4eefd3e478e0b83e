//! Axum route handlers for the Formatting API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::formatting::normalizer::{
    normalize, normalize_cover_letter_paragraph_with, ContentCategory, ParagraphMode,
};

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub category: ContentCategory,
    pub content: String,
    /// Only consulted for `cover-letter-paragraph`.
    #[serde(default)]
    pub paragraph_mode: Option<ParagraphMode>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub category: ContentCategory,
    pub content: String,
}

/// POST /api/v1/format
///
/// Normalizes raw AI output for the requested display category.
pub async fn handle_format(
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, AppError> {
    let content = match (request.category, request.paragraph_mode) {
        (ContentCategory::CoverLetterParagraph, Some(mode)) => {
            normalize_cover_letter_paragraph_with(&request.content, mode)
        }
        (category, None) => normalize(category, &request.content),
        (category, Some(_)) => {
            return Err(AppError::Validation(format!(
                "paragraph_mode only applies to cover-letter-paragraph, not {category}"
            )));
        }
    };

    Ok(Json(FormatResponse {
        category: request.category,
        content,
    }))
}
