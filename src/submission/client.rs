//! Simulated submission client
//!
//! Stands in for an HTTP call: waits for a configurable delay and always
//! succeeds with a receipt.

use super::traits::SubmissionClientTrait;
use crate::state::FormRecord;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Default simulated round trip
const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Acknowledgement returned by a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new(message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.to_string(),
            received_at: Utc::now(),
        }
    }
}

/// Client that pretends to talk to a server
#[derive(Debug, Clone)]
pub struct SimulatedSubmissionClient {
    delay: Duration,
}

impl SimulatedSubmissionClient {
    /// Create a client with the given round-trip delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSubmissionClient {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmissionClientTrait for SimulatedSubmissionClient {
    async fn submit(&self, record: &FormRecord) -> Result<SubmissionReceipt> {
        tracing::debug!("Simulating submission of {} fields", record.len());
        tokio::time::sleep(self.delay).await;
        let receipt = SubmissionReceipt::new("Form submitted successfully");
        tracing::info!("Form data submitted, receipt {}", receipt.id);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormDefinition;

    #[test]
    fn test_default_delay() {
        assert_eq!(
            SimulatedSubmissionClient::default().delay(),
            Duration::from_millis(1500)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_delay_then_succeeds() {
        let client = SimulatedSubmissionClient::default();
        let record = FormRecord::for_fields(FormDefinition::registration().fields());
        let started = tokio::time::Instant::now();

        let receipt = client.submit(&record).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(receipt.message, "Form submitted successfully");
    }

    #[test]
    fn test_receipt_ids_are_unique() {
        let a = SubmissionReceipt::new("ok");
        let b = SubmissionReceipt::new("ok");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = SubmissionReceipt::new("ok");
        let json = serde_json::to_string(&receipt).unwrap();
        let parsed: SubmissionReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, receipt);
    }
}
