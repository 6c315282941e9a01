use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use campaign_core::models::{CampaignBrief, ProductEntry};

use crate::transport::{Endpoint, Payload, SubmissionClient, TransportError, WireResponse};

/// Scripted client: replays queued results and records every request.
pub(crate) struct FakeClient {
    responses: Mutex<VecDeque<Result<WireResponse, TransportError>>>,
    calls: Mutex<Vec<(Endpoint, Payload)>>,
    gate: Option<Arc<Notify>>,
}

impl FakeClient {
    pub(crate) fn new(responses: Vec<Result<WireResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Each request waits for a `notify_one` on the returned handle.
    pub(crate) fn gated(
        responses: Vec<Result<WireResponse, TransportError>>,
    ) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            gate: Some(Arc::clone(&gate)),
        });
        (client, gate)
    }

    pub(crate) fn calls(&self) -> Vec<(Endpoint, Payload)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for FakeClient {
    async fn send(
        &self,
        endpoint: Endpoint,
        payload: Payload,
    ) -> Result<WireResponse, TransportError> {
        self.calls.lock().unwrap().push((endpoint, payload));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no response queued".to_string())))
    }
}

pub(crate) fn summer_launch_brief() -> CampaignBrief {
    CampaignBrief {
        campaign_name: "Summer Launch".to_string(),
        target_region: "Europe".to_string(),
        target_audience: "Gen Z".to_string(),
        campaign_message: "Cool Down".to_string(),
        products: vec![ProductEntry::new(
            "Citrus_Spark_Soda",
            "Sparkling citrus drink",
            "Neon",
        )],
    }
}
