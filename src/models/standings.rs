use serde::Serialize;
use uuid::Uuid;

/// One row of the computed league table. Derived, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
    pub points: u32,
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub table: Vec<StandingsRow>,
    /// Completed matches whose team names could not be resolved; their
    /// contribution is skipped, not fatal.
    pub skipped_matches: u32,
}
