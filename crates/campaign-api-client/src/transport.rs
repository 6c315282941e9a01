//! Wire-level types for the submission seam.
//!
//! A `SubmissionClient` performs one HTTP exchange and hands back the raw
//! status and body. Turning that into an outcome is done by
//! [`crate::response::resolve_outcome`].

use async_trait::async_trait;
use bytes::Bytes;
use campaign_core::models::ImageFile;
use serde::Serialize;
use std::fmt;

/// The two endpoints under the API base URL. Both are `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    Generate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Upload => "/upload",
            Endpoint::Generate => "/generate",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: ImageFile },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    /// Parts in the order they are written to the body.
    Multipart(Vec<FormPart>),
}

impl Payload {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(Payload::Json(serde_json::to_value(body)?))
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Payload::Json(_) => Encoding::Json,
            Payload::Multipart(_) => Encoding::Multipart,
        }
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: Bytes,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The exchange did not produce an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations do not guard against overlapping calls; orchestrators do.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn send(&self, endpoint: Endpoint, payload: Payload)
        -> Result<WireResponse, TransportError>;
}
