//! PDF export — delegates to the headless-renderer collaborator, a service
//! that loads a URL in a headless browser and returns `application/pdf`
//! bytes. Nothing browser-shaped is reimplemented here.

pub mod handlers;

use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// The DOM marker the renderer waits for before capturing. Matches the
/// container id emitted by `templates::render`.
const CAPTURE_SELECTOR: &str = "#cv-preview-container";

/// Bound on the marker wait; the renderer captures anyway once it elapses
/// (best effort, not a hard failure).
const CAPTURE_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("renderer returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
    url: &'a str,
    wait_for_selector: &'a str,
    timeout_ms: u32,
}

/// Thin client for the render service. Cheap to clone; shared via `AppState`.
#[derive(Clone)]
pub struct RenderClient {
    client: Client,
    base_url: String,
}

impl RenderClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Renders `target_url` to PDF bytes.
    pub async fn render_pdf(&self, target_url: &str) -> Result<Bytes, RenderError> {
        let response = self
            .client
            .post(format!("{}/render", self.base_url))
            .json(&RenderRequest {
                url: target_url,
                wait_for_selector: CAPTURE_SELECTOR,
                timeout_ms: CAPTURE_TIMEOUT_MS,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}

/// `Content-Disposition` value for a CV download.
pub fn attachment_disposition(id: uuid::Uuid) -> String {
    format!("attachment; filename=\"cv-{id}.pdf\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_names_the_document_id() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            attachment_disposition(id),
            "attachment; filename=\"cv-00000000-0000-0000-0000-000000000000.pdf\""
        );
    }
}
