//! HTTP client for the campaign API.
//!
//! Provides the `SubmissionClient` seam with its reqwest implementation, the
//! mapping from wire responses to outcomes, and the two orchestrators that
//! drive the upload and generate flows. The CLI uses these directly.

pub mod generate;
pub mod response;
mod state;
pub mod transport;
pub mod upload;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use async_trait::async_trait;
use campaign_core::ClientConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

pub use generate::GenerateOrchestrator;
pub use response::{resolve_outcome, submit};
pub use transport::{
    Encoding, Endpoint, FormPart, Payload, SubmissionClient, TransportError, WireResponse,
};
pub use upload::UploadOrchestrator;

// Re-export domain types for convenience.
pub use campaign_core::models::{
    CampaignBrief, GenerateResponse, ImageFile, ProductEntry, UploadResponse,
};
pub use campaign_core::{AlreadyPending, FailureKind, SubmissionOutcome};

/// reqwest-backed `SubmissionClient` bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Create client from environment: CAMPAIGN_API_URL, CAMPAIGN_API_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        self.config.endpoint_url(path)
    }

    fn multipart_form(parts: Vec<FormPart>) -> std::result::Result<Form, TransportError> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, file } => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| TransportError::InvalidPayload(e.to_string()))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl SubmissionClient for ApiClient {
    async fn send(
        &self,
        endpoint: Endpoint,
        payload: Payload,
    ) -> std::result::Result<WireResponse, TransportError> {
        let url = self.build_url(endpoint.path());
        let request = match payload {
            Payload::Json(body) => self.client.post(&url).json(&body),
            Payload::Multipart(parts) => self.client.post(&url).multipart(Self::multipart_form(parts)?),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(url = %url, status, bytes = body.len(), "Received response");
        Ok(WireResponse { status, body })
    }
}
