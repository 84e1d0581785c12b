//! Trait abstraction for the submission client to enable mocking in tests

use super::client::SubmissionReceipt;
use crate::state::FormRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for sending a completed form somewhere, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClientTrait: Send + Sync {
    /// Submit the record once; no retries
    async fn submit(&self, record: &FormRecord) -> Result<SubmissionReceipt>;
}
