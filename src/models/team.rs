use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A league team with its stored aggregate statistics.
///
/// The aggregates are mutable running totals kept in sync by the result
/// lifecycle; they can always be recomputed from scratch by replaying the
/// completed matches, and both paths must agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub owner_user_id: Option<Uuid>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub drawn: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
}

impl Team {
    pub fn new(name: String, owner_user_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            owner_user_id,
            whatsapp: None,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn reset_stats(&mut self) {
        self.played = 0;
        self.won = 0;
        self.drawn = 0;
        self.lost = 0;
        self.goals_for = 0;
        self.goals_against = 0;
    }

    pub fn points(&self) -> u32 {
        self.won * 3 + self.drawn
    }

    pub fn goal_diff(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameTeamRequest {
    pub name: String,
}
