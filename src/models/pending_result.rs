use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A submitted match outcome waiting for admin review.
///
/// Terminal on approval (converted into a completed match and removed from
/// the pending set) or rejection (removed). Several submissions may exist for
/// the same match; the last approved one wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingResult {
    pub id: Uuid,
    pub match_id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: Uuid,
    pub status: ResultStatus,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResultRequest {
    pub match_id: Uuid,
    pub home_score: u32,
    pub away_score: u32,
    /// Base64 data URL of the evidence image, if any.
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

/// Submitter-only edit of a still-pending submission.
#[derive(Debug, Deserialize)]
pub struct EditPendingRequest {
    pub home_score: u32,
    pub away_score: u32,
    pub screenshot: Option<String>,
}
