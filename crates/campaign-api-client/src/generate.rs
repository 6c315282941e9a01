//! Campaign generation flow.
//!
//! Validates the brief, sends it as one JSON document to `/generate` and
//! keeps the brief intact whatever the result, so a similar brief can be
//! tweaked and resubmitted.

use std::sync::Arc;
use tokio::sync::watch;

use campaign_core::models::{CampaignBrief, GenerateResponse};
use campaign_core::{validate_brief, AlreadyPending, BriefModel, FailureKind, SubmissionOutcome};

use crate::response::submit;
use crate::state::OutcomeCell;
use crate::transport::{Endpoint, Payload, SubmissionClient};

pub struct GenerateOrchestrator {
    client: Arc<dyn SubmissionClient>,
    brief: BriefModel,
    outcome: OutcomeCell<GenerateResponse>,
}

impl GenerateOrchestrator {
    pub fn new(client: Arc<dyn SubmissionClient>) -> Self {
        Self::with_brief(client, CampaignBrief::default())
    }

    pub fn with_brief(client: Arc<dyn SubmissionClient>, brief: CampaignBrief) -> Self {
        Self {
            client,
            brief: BriefModel::from_brief(brief),
            outcome: OutcomeCell::new(),
        }
    }

    pub fn brief(&self) -> &BriefModel {
        &self.brief
    }

    /// Editable brief. Refused while a submission is pending.
    pub fn brief_mut(&mut self) -> Result<&mut BriefModel, AlreadyPending> {
        if self.outcome.is_pending() {
            return Err(AlreadyPending);
        }
        Ok(&mut self.brief)
    }

    pub fn outcome(&self) -> SubmissionOutcome<GenerateResponse> {
        self.outcome.get()
    }

    pub fn subscribe_outcome(&self) -> watch::Receiver<SubmissionOutcome<GenerateResponse>> {
        self.outcome.subscribe()
    }

    /// Clear a finished outcome back to `Idle`.
    pub fn acknowledge(&mut self) -> bool {
        self.outcome.acknowledge()
    }

    /// Submit the current brief.
    ///
    /// An incomplete brief resolves to a validation failure without any
    /// request. The only error is a call made while another submission on
    /// this orchestrator is still pending.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome<GenerateResponse>, AlreadyPending> {
        if self.outcome.is_pending() {
            return Err(AlreadyPending);
        }

        let snapshot = self.brief.snapshot();
        if let Err(failure) = validate_brief(&snapshot) {
            tracing::debug!(problems = ?failure.problems(), "Brief not submittable");
            let outcome = SubmissionOutcome::failure(FailureKind::Validation, failure.summary());
            self.outcome.set(outcome.clone());
            return Ok(outcome);
        }

        let payload = match Payload::json(snapshot.as_ref()) {
            Ok(payload) => payload,
            Err(err) => {
                let outcome = SubmissionOutcome::failure(
                    FailureKind::Validation,
                    format!("Could not encode brief: {}", err),
                );
                self.outcome.set(outcome.clone());
                return Ok(outcome);
            }
        };

        let pending = self.outcome.begin()?;
        tracing::info!(
            campaign = %snapshot.campaign_name,
            products = snapshot.products.len(),
            brief_version = self.brief.version(),
            "Submitting campaign brief"
        );

        let outcome = submit::<GenerateResponse>(self.client.as_ref(), Endpoint::Generate, payload).await;
        pending.complete(outcome.clone());
        Ok(outcome)
    }
}
