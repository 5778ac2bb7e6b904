use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled or completed fixture.
///
/// Home and away teams are referenced by display name, not id. Display names
/// can carry decorations (e.g. a parenthetical qualifier), so every consumer
/// goes through the name resolver in `crate::league::resolver`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub matchday: u32,
    pub status: MatchStatus,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Evidence reference produced by the evidence store.
    #[serde(default)]
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

/// Manual fixture creation by an admin, outside schedule generation.
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub matchday: u32,
}

/// Admin edit of a match outcome. Completing a scheduled match directly and
/// correcting an already-completed score both go through this request.
#[derive(Debug, Deserialize)]
pub struct EditMatchRequest {
    pub home_score: u32,
    pub away_score: u32,
    pub notes: Option<String>,
    /// Base64 data URL; stored through the evidence store before the edit
    /// reaches the lifecycle service.
    pub screenshot: Option<String>,
}
