use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LeagueError;
use crate::models::matches::{Match, MatchStatus};
use crate::store::JsonStore;

/// Parameters for a full schedule generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleParams {
    pub start_date: NaiveDate,
    pub matches_per_matchday: u32,
    pub matchday_interval_days: u32,
    pub kickoff: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct ScheduleSummary {
    pub total_matches: usize,
    pub matchdays: u32,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Every ordered pair (home, away) of distinct teams: a double round-robin
/// where each unordered pair meets twice with venues swapped, `n·(n-1)`
/// fixtures total.
pub fn fixtures(team_names: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(team_names.len() * team_names.len().saturating_sub(1));
    for (i, home) in team_names.iter().enumerate() {
        for (j, away) in team_names.iter().enumerate() {
            if i == j {
                continue;
            }
            pairs.push((home.clone(), away.clone()));
        }
    }
    pairs
}

/// Service generating the league fixture list.
#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<JsonStore>,
}

impl ScheduleService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Generate a double round-robin schedule over the current team roster.
    ///
    /// Destructive: deletes the previous match set first. Team aggregates are
    /// left untouched; resetting them is the caller's decision.
    pub async fn generate(&self, params: ScheduleParams) -> Result<ScheduleSummary, LeagueError> {
        if params.matches_per_matchday == 0 {
            return Err(LeagueError::InvalidState(
                "matches per matchday must be at least 1".into(),
            ));
        }
        if params.matchday_interval_days == 0 {
            return Err(LeagueError::InvalidState(
                "matchday interval must be at least 1 day".into(),
            ));
        }

        let teams = self.store.teams.list().await;
        if teams.len() < 2 {
            return Err(LeagueError::InsufficientTeams(teams.len()));
        }

        let removed = self.store.matches.clear().await?;
        if removed > 0 {
            tracing::info!("cleared {} existing matches before regeneration", removed);
        }

        let names: Vec<String> = teams.iter().map(|t| t.name.clone()).collect();
        let pairs = fixtures(&names);
        tracing::info!(
            "generating double round-robin schedule: {} teams, {} fixtures",
            names.len(),
            pairs.len()
        );

        // Sequential packing: fill each matchday up to the limit, then
        // advance the date by the interval.
        let mut matchday: u32 = 1;
        let mut in_current_day: u32 = 0;
        let mut current_date = params.start_date;
        let mut last_date = params.start_date;

        for (home, away) in &pairs {
            self.store
                .matches
                .insert(Match {
                    id: Uuid::new_v4(),
                    home_team: home.clone(),
                    away_team: away.clone(),
                    date: current_date,
                    time: params.kickoff,
                    matchday,
                    status: MatchStatus::Scheduled,
                    home_score: None,
                    away_score: None,
                    notes: None,
                    screenshot: None,
                })
                .await?;
            last_date = current_date;

            in_current_day += 1;
            if in_current_day >= params.matches_per_matchday {
                matchday += 1;
                in_current_day = 0;
                current_date += Duration::days(params.matchday_interval_days as i64);
            }
        }

        let matchdays = if in_current_day > 0 { matchday } else { matchday - 1 };
        let summary = ScheduleSummary {
            total_matches: pairs.len(),
            matchdays,
            first_date: params.start_date,
            last_date,
        };
        tracing::info!(
            "schedule generation complete: {} matches across {} matchdays",
            summary.total_matches,
            summary.matchdays
        );
        Ok(summary)
    }

    pub async fn clear_all(&self) -> Result<usize, LeagueError> {
        let removed = self.store.matches.clear().await?;
        tracing::info!("cleared all {} matches", removed);
        Ok(removed)
    }
}
