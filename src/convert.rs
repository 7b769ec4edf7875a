use axum::http::StatusCode;

use crate::extract::extract_blocks;
use crate::fetch::ScraperClient;
use crate::models::Block;
use crate::naming::{domain_of, file_name_for};
use crate::render::{preview_text, render_docx};

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Please enter a valid URL.")]
    EmptyUrl,
    #[error("SCRAPER_API_KEY is not configured")]
    MissingApiKey,
    #[error("Error fetching webpage: upstream returned {0}")]
    Upstream(StatusCode),
    #[error("Error fetching webpage: {0}")]
    Request(String),
    #[error("Failed to build document: {0}")]
    Render(String),
}

impl ConvertError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::EmptyUrl => StatusCode::BAD_REQUEST,
            ConvertError::Upstream(_) | ConvertError::Request(_) => StatusCode::BAD_GATEWAY,
            ConvertError::MissingApiKey | ConvertError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// ── Public result type ───────────────────────────────────────────────────────

/// A finished document, held in memory for the duration of one request.
pub struct Generated {
    pub file_name: String,
    pub title: String,
    pub blocks: Vec<Block>,
    pub docx: Vec<u8>,
    pub preview: String,
}

// ── Public API ───────────────────────────────────────────────────────────────

pub async fn convert(client: &ScraperClient, url: &str) -> Result<Generated, ConvertError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConvertError::EmptyUrl);
    }

    let title = domain_of(url);
    tracing::info!(domain = %title, "converting page");

    let html = client.fetch_html(url).await?;
    let blocks = extract_blocks(&html);
    tracing::info!(blocks = blocks.len(), "extracted content");

    let docx = render_docx(&title, &blocks)?;
    let preview = preview_text(&docx)?;

    Ok(Generated {
        file_name: file_name_for(url),
        title,
        blocks,
        docx,
        preview,
    })
}
