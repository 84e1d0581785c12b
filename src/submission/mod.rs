//! Submission client module
//!
//! There is no real backend: the client simulates a network round trip
//! with a fixed delay.

mod client;
mod traits;

pub use client::{SimulatedSubmissionClient, SubmissionReceipt};
pub use traits::SubmissionClientTrait;

#[cfg(test)]
pub use traits::MockSubmissionClientTrait;
