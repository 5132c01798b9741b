//! Submission models shared across the pipeline.

use serde::{Deserialize, Serialize};

/// One end-user submission action. Immutable once constructed; lives for the
/// duration of a single orchestrator call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub owner_id: String,
    pub file_id: u64,
    /// Free-text comment attached by the user. Logged with the submission but
    /// not forwarded to the remote endpoint (the remote protocol has no field
    /// for it).
    #[serde(default)]
    pub comment: String,
}

/// Successful submission: the identifier the remote endpoint assigned.
///
/// The remote is expected to echo an identifier on every true success; an HTTP
/// 200 without one is treated as a protocol failure upstream, so this type
/// always carries the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub remote_id: String,
}
