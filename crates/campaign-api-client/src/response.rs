//! Mapping a finished exchange to a submission outcome.

use campaign_core::models::ErrorBody;
use campaign_core::{FailureKind, SubmissionOutcome};
use serde::de::DeserializeOwned;

use crate::transport::{Endpoint, Payload, SubmissionClient, TransportError, WireResponse};

pub const UPLOAD_NETWORK_FAILURE_MESSAGE: &str = "Network error. Is the backend running?";
pub const GENERATE_NETWORK_FAILURE_MESSAGE: &str = "Failed to connect to server.";
pub const UPLOAD_REJECTED_MESSAGE: &str = "Upload failed";
pub const GENERATE_REJECTED_MESSAGE: &str = "Generation failed";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";

impl Endpoint {
    /// Shown when the request never reached the server.
    pub fn network_failure_message(&self) -> &'static str {
        match self {
            Endpoint::Upload => UPLOAD_NETWORK_FAILURE_MESSAGE,
            Endpoint::Generate => GENERATE_NETWORK_FAILURE_MESSAGE,
        }
    }

    /// Shown for a non-2xx response without a usable `error` string.
    pub fn rejected_message(&self) -> &'static str {
        match self {
            Endpoint::Upload => UPLOAD_REJECTED_MESSAGE,
            Endpoint::Generate => GENERATE_REJECTED_MESSAGE,
        }
    }
}

/// Send `payload` and resolve the exchange into an outcome.
pub async fn submit<T: DeserializeOwned>(
    client: &dyn SubmissionClient,
    endpoint: Endpoint,
    payload: Payload,
) -> SubmissionOutcome<T> {
    tracing::info!(
        endpoint = %endpoint,
        encoding = ?payload.encoding(),
        "Submitting request"
    );
    let result = client.send(endpoint, payload).await;
    resolve_outcome(endpoint, result)
}

/// Transition from `Pending` given what the exchange produced.
///
/// A 2xx body that does not parse as `T` is a failure, never a partial success.
pub fn resolve_outcome<T: DeserializeOwned>(
    endpoint: Endpoint,
    result: Result<WireResponse, TransportError>,
) -> SubmissionOutcome<T> {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(endpoint = %endpoint, error = %err, "Request did not reach the server");
            return SubmissionOutcome::failure(
                FailureKind::Network,
                endpoint.network_failure_message(),
            );
        }
    };

    let status = response.status;
    if response.is_success() {
        return match serde_json::from_slice::<T>(&response.body) {
            Ok(body) => {
                tracing::info!(endpoint = %endpoint, status, "Submission succeeded");
                SubmissionOutcome::Success(body)
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = %endpoint,
                    status,
                    error = %err,
                    "Success response did not match the expected shape"
                );
                SubmissionOutcome::failure(
                    FailureKind::MalformedResponse,
                    MALFORMED_RESPONSE_MESSAGE,
                )
            }
        };
    }

    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| endpoint.rejected_message().to_string());

    tracing::warn!(endpoint = %endpoint, status, error = %message, "Submission rejected by server");
    SubmissionOutcome::failure(FailureKind::Server { status }, message)
}
