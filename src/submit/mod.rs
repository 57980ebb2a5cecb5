pub mod client;
pub mod payload;
pub mod pending;

pub use client::{SheetClient, SubmitMethod, DEFAULT_TIMEOUT};
pub use payload::Payload;
pub use pending::PendingRequests;

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Terminal failure classes for one submission attempt.
///
/// The caller distinguishes these for user messaging only; the client never
/// retries, so a failed call is resubmitted in full by the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Transport-level failure before any response arrived.
    #[error("network error: {0}")]
    Network(String),
    /// The remote store explicitly reported a failure.
    #[error("remote store error: {0}")]
    Remote(String),
    /// Neither a response nor a transport error within the bound.
    #[error("no response from the remote store within {0:?}")]
    Timeout(Duration),
}

/// Status object the remote store returns for one append.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Failure message to surface, with a fallback when the store sent none.
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "submission failed".to_string())
    }
}

/// What one registered handler eventually receives.
pub type SubmitOutcome = Result<RemoteResponse, SubmitError>;
