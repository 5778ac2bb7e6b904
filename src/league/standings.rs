use std::sync::Arc;

use crate::errors::LeagueError;
use crate::league::resolver::find_team_by_name;
use crate::models::matches::{Match, MatchStatus};
use crate::models::standings::{StandingsRow, StandingsResponse};
use crate::models::team::Team;
use crate::store::JsonStore;

/// One result's contribution to the two involved teams' aggregates.
#[derive(Debug, Clone)]
pub struct ResultTuple {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Apply a result to both teams' aggregates: one played each, goals both
/// directions, win/draw/loss attribution.
pub fn apply_result(home: &mut Team, away: &mut Team, home_score: u32, away_score: u32) {
    home.played += 1;
    away.played += 1;

    home.goals_for += home_score;
    home.goals_against += away_score;
    away.goals_for += away_score;
    away.goals_against += home_score;

    if home_score > away_score {
        home.won += 1;
        away.lost += 1;
    } else if home_score < away_score {
        away.won += 1;
        home.lost += 1;
    } else {
        home.drawn += 1;
        away.drawn += 1;
    }
}

/// Exact additive inverse of [`apply_result`]. Decrements floor at zero so an
/// inconsistent history can never drive an aggregate negative.
pub fn revert_result(home: &mut Team, away: &mut Team, home_score: u32, away_score: u32) {
    home.played = home.played.saturating_sub(1);
    away.played = away.played.saturating_sub(1);

    home.goals_for = home.goals_for.saturating_sub(home_score);
    home.goals_against = home.goals_against.saturating_sub(away_score);
    away.goals_for = away.goals_for.saturating_sub(away_score);
    away.goals_against = away.goals_against.saturating_sub(home_score);

    if home_score > away_score {
        home.won = home.won.saturating_sub(1);
        away.lost = away.lost.saturating_sub(1);
    } else if home_score < away_score {
        away.won = away.won.saturating_sub(1);
        home.lost = home.lost.saturating_sub(1);
    } else {
        home.drawn = home.drawn.saturating_sub(1);
        away.drawn = away.drawn.saturating_sub(1);
    }
}

/// Full recomputation path: zero every aggregate, replay all completed
/// matches, rank. Side-effect-free on the persisted teams and idempotent.
/// Returns the ranked table plus the count of matches skipped because a team
/// name would not resolve.
pub fn compute_table(teams: &[Team], matches: &[Match]) -> (Vec<StandingsRow>, u32) {
    let mut scratch: Vec<Team> = teams
        .iter()
        .map(|t| {
            let mut zeroed = t.clone();
            zeroed.reset_stats();
            zeroed
        })
        .collect();

    let mut skipped = 0u32;
    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        let home_idx = find_team_by_name(&scratch, &m.home_team).map(|t| t.id);
        let away_idx = find_team_by_name(&scratch, &m.away_team).map(|t| t.id);
        let (Some(home_id), Some(away_id)) = (home_idx, away_idx) else {
            tracing::warn!(
                "skipping completed match {} in standings: cannot resolve {:?} vs {:?}",
                m.id,
                m.home_team,
                m.away_team
            );
            skipped += 1;
            continue;
        };
        if home_id == away_id {
            tracing::warn!(
                "skipping completed match {}: both names resolve to the same team",
                m.id
            );
            skipped += 1;
            continue;
        }

        let home_pos = scratch.iter().position(|t| t.id == home_id).unwrap();
        let away_pos = scratch.iter().position(|t| t.id == away_id).unwrap();
        let (home_score, away_score) = (m.home_score.unwrap_or(0), m.away_score.unwrap_or(0));

        // Split borrows for the two distinct rows.
        let (first, second) = if home_pos < away_pos {
            let (a, b) = scratch.split_at_mut(away_pos);
            (&mut a[home_pos], &mut b[0])
        } else {
            let (a, b) = scratch.split_at_mut(home_pos);
            (&mut b[0], &mut a[away_pos])
        };
        apply_result(first, second, home_score, away_score);
    }

    let mut rows: Vec<StandingsRow> = scratch
        .into_iter()
        .map(|t| StandingsRow {
            team_id: t.id,
            team_name: t.name.clone(),
            played: t.played,
            won: t.won,
            drawn: t.drawn,
            lost: t.lost,
            goals_for: t.goals_for,
            goals_against: t.goals_against,
            goal_diff: t.goal_diff(),
            points: t.points(),
        })
        .collect();

    // Stable sort: equal points and goal difference keep their prior order.
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_diff.cmp(&a.goal_diff))
    });

    (rows, skipped)
}

/// Store-backed standings operations: the rendering path (full recompute) and
/// the fast path mutating the persisted team aggregates.
#[derive(Clone)]
pub struct StandingsService {
    store: Arc<JsonStore>,
}

impl StandingsService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Compute a fresh table from the completed matches. Never writes back.
    pub async fn table(&self) -> Result<StandingsResponse, LeagueError> {
        let teams = self.store.teams.list().await;
        let matches = self.store.matches.list().await;
        let (table, skipped_matches) = compute_table(&teams, &matches);
        if skipped_matches > 0 {
            tracing::warn!(
                "standings computed with {} unresolvable match(es) skipped",
                skipped_matches
            );
        }
        Ok(StandingsResponse {
            table,
            skipped_matches,
        })
    }

    /// Incremental update: add one result's contribution to the persisted
    /// aggregates. Caller must hold the store's stats gate.
    pub async fn apply(&self, result: &ResultTuple) -> Result<(), LeagueError> {
        self.adjust(result, apply_result).await
    }

    /// Incremental revert: subtract one result's contribution. Caller must
    /// hold the store's stats gate, and for an edit the revert persists fully
    /// before the reapply starts.
    pub async fn revert(&self, result: &ResultTuple) -> Result<(), LeagueError> {
        self.adjust(result, revert_result).await
    }

    async fn adjust(
        &self,
        result: &ResultTuple,
        mutate: fn(&mut Team, &mut Team, u32, u32),
    ) -> Result<(), LeagueError> {
        let teams = self.store.teams.list().await;
        let home = find_team_by_name(&teams, &result.home_team).cloned();
        let away = find_team_by_name(&teams, &result.away_team).cloned();
        let (Some(mut home), Some(mut away)) = (home, away) else {
            // Soft failure: the stored aggregates stay stale for this result,
            // but the recomputation path remains the source of truth.
            tracing::warn!(
                "cannot resolve {:?} / {:?} to stored teams, skipping aggregate update",
                result.home_team,
                result.away_team
            );
            return Ok(());
        };
        if home.id == away.id {
            tracing::warn!(
                "{:?} and {:?} resolve to the same team, skipping aggregate update",
                result.home_team,
                result.away_team
            );
            return Ok(());
        }

        mutate(&mut home, &mut away, result.home_score, result.away_score);

        // Fixed order: home before away. Each write is retried once before
        // the failure surfaces; there is no cross-entity rollback.
        self.persist_team(home).await?;
        self.persist_team(away).await?;
        Ok(())
    }

    async fn persist_team(&self, team: Team) -> Result<(), LeagueError> {
        if let Err(first) = self.store.teams.replace(team.clone()).await {
            tracing::warn!(
                "aggregate write for team {:?} failed, retrying once: {}",
                team.name,
                first
            );
            self.store.teams.replace(team).await?;
        }
        Ok(())
    }
}
