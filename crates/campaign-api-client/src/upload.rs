//! Asset upload flow.
//!
//! Sends one file plus its product name as multipart to `/upload`. The
//! product name is the key the generation backend later matches exactly.
//! A successful upload clears the draft; a failed one leaves it untouched.

use std::sync::Arc;
use tokio::sync::watch;

use campaign_core::models::{ImageFile, UploadDraft, UploadResponse};
use campaign_core::validation::UPLOAD_INCOMPLETE_MESSAGE;
use campaign_core::{validate_upload, AlreadyPending, FailureKind, SubmissionOutcome};

use crate::response::submit;
use crate::state::OutcomeCell;
use crate::transport::{Endpoint, FormPart, Payload, SubmissionClient};

pub const FILE_FIELD: &str = "file";
pub const PRODUCT_NAME_FIELD: &str = "productName";

pub struct UploadOrchestrator {
    client: Arc<dyn SubmissionClient>,
    draft: UploadDraft,
    outcome: OutcomeCell<UploadResponse>,
}

impl UploadOrchestrator {
    pub fn new(client: Arc<dyn SubmissionClient>) -> Self {
        Self {
            client,
            draft: UploadDraft::default(),
            outcome: OutcomeCell::new(),
        }
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    /// Editable draft. Refused while a submission is pending.
    pub fn draft_mut(&mut self) -> Result<&mut UploadDraft, AlreadyPending> {
        if self.outcome.is_pending() {
            return Err(AlreadyPending);
        }
        Ok(&mut self.draft)
    }

    pub fn set_product_name(&mut self, product_name: impl Into<String>) -> Result<(), AlreadyPending> {
        self.draft_mut()?.set_product_name(product_name);
        Ok(())
    }

    pub fn select_file(&mut self, file: ImageFile) -> Result<(), AlreadyPending> {
        self.draft_mut()?.select_file(file);
        Ok(())
    }

    pub fn outcome(&self) -> SubmissionOutcome<UploadResponse> {
        self.outcome.get()
    }

    pub fn subscribe_outcome(&self) -> watch::Receiver<SubmissionOutcome<UploadResponse>> {
        self.outcome.subscribe()
    }

    pub fn acknowledge(&mut self) -> bool {
        self.outcome.acknowledge()
    }

    /// Submit the current draft.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome<UploadResponse>, AlreadyPending> {
        if self.outcome.is_pending() {
            return Err(AlreadyPending);
        }

        let request = match validate_upload(&self.draft)
            .ok()
            .and_then(|()| self.draft.to_request())
        {
            Some(request) => request,
            None => {
                tracing::debug!(
                    has_product_name = !self.draft.product_name.is_empty(),
                    has_file = self.draft.file.is_some(),
                    "Upload not submittable"
                );
                let outcome =
                    SubmissionOutcome::failure(FailureKind::Validation, UPLOAD_INCOMPLETE_MESSAGE);
                self.outcome.set(outcome.clone());
                return Ok(outcome);
            }
        };

        let pending = self.outcome.begin()?;
        tracing::info!(
            product_name = %request.product_name,
            file_name = %request.file.file_name,
            size = request.file.len(),
            "Uploading product asset"
        );

        let payload = Payload::Multipart(vec![
            FormPart::File {
                name: FILE_FIELD.to_string(),
                file: request.file,
            },
            FormPart::Text {
                name: PRODUCT_NAME_FIELD.to_string(),
                value: request.product_name,
            },
        ]);

        let outcome = submit::<UploadResponse>(self.client.as_ref(), Endpoint::Upload, payload).await;
        if outcome.is_success() {
            self.draft.clear();
        }
        pending.complete(outcome.clone());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeClient;
    use crate::transport::{TransportError, WireResponse};

    fn soda_png() -> ImageFile {
        ImageFile::new("soda.png", b"PNGDATA".to_vec())
    }

    #[tokio::test]
    async fn success_clears_draft() {
        let client = FakeClient::new(vec![Ok(WireResponse::new(200, r#"{"message":"Stored"}"#))]);
        let mut orchestrator = UploadOrchestrator::new(client.clone());
        orchestrator.set_product_name("Citrus_Spark_Soda").unwrap();
        orchestrator.select_file(soda_png()).unwrap();

        let outcome = orchestrator.submit().await.unwrap();
        assert_eq!(outcome.success().unwrap().message, "Stored");
        assert_eq!(orchestrator.draft().product_name, "");
        assert!(orchestrator.draft().file.is_none());

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Endpoint::Upload);
        assert_eq!(
            calls[0].1,
            Payload::Multipart(vec![
                FormPart::File {
                    name: "file".to_string(),
                    file: soda_png(),
                },
                FormPart::Text {
                    name: "productName".to_string(),
                    value: "Citrus_Spark_Soda".to_string(),
                },
            ])
        );
    }

    #[tokio::test]
    async fn empty_product_name_short_circuits() {
        let client = FakeClient::new(vec![]);
        let mut orchestrator = UploadOrchestrator::new(client.clone());
        orchestrator.select_file(soda_png()).unwrap();

        let outcome = orchestrator.submit().await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
        assert_eq!(outcome.failure_message(), Some(UPLOAD_INCOMPLETE_MESSAGE));
        assert!(client.calls().is_empty());
        assert!(orchestrator.draft().file.is_some());
    }

    #[tokio::test]
    async fn missing_file_short_circuits() {
        let client = FakeClient::new(vec![]);
        let mut orchestrator = UploadOrchestrator::new(client.clone());
        orchestrator.set_product_name("Citrus_Spark_Soda").unwrap();

        let outcome = orchestrator.submit().await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn failure_preserves_draft() {
        let client = FakeClient::new(vec![
            Ok(WireResponse::new(500, r#"{"status":"ERROR","error":"Failed to save file: disk full"}"#)),
            Err(TransportError::Timeout),
        ]);
        let mut orchestrator = UploadOrchestrator::new(client);
        orchestrator.set_product_name("Citrus_Spark_Soda").unwrap();
        orchestrator.select_file(soda_png()).unwrap();

        let outcome = orchestrator.submit().await.unwrap();
        assert_eq!(outcome.failure_message(), Some("Failed to save file: disk full"));
        assert_eq!(orchestrator.draft().product_name, "Citrus_Spark_Soda");
        assert_eq!(orchestrator.draft().file, Some(soda_png()));

        let outcome = orchestrator.submit().await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Network));
        assert_eq!(orchestrator.draft().product_name, "Citrus_Spark_Soda");
    }

    #[tokio::test]
    async fn pending_is_observable_during_upload() {
        let (client, release) =
            FakeClient::gated(vec![Ok(WireResponse::new(200, r#"{"message":"Stored"}"#))]);
        let mut orchestrator = UploadOrchestrator::new(client);
        orchestrator.set_product_name("Citrus_Spark_Soda").unwrap();
        orchestrator.select_file(soda_png()).unwrap();
        let mut rx = orchestrator.subscribe_outcome();

        let observer = async {
            rx.changed().await.unwrap();
            let pending = rx.borrow_and_update().is_pending();
            release.notify_one();
            pending
        };
        let (outcome, saw_pending) = tokio::join!(orchestrator.submit(), observer);
        assert!(saw_pending);
        assert!(outcome.unwrap().is_success());
        assert!(orchestrator.draft_mut().is_ok());
    }

    #[tokio::test]
    async fn pending_blocks_edits_and_resubmission() {
        let client = FakeClient::new(vec![]);
        let mut orchestrator = UploadOrchestrator::new(client.clone());
        orchestrator.outcome.set(SubmissionOutcome::Pending);

        assert_eq!(orchestrator.set_product_name("x"), Err(AlreadyPending));
        assert_eq!(orchestrator.submit().await, Err(AlreadyPending));
        assert!(client.calls().is_empty());
        assert!(!orchestrator.acknowledge());
    }
}
