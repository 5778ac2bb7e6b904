use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::LeagueError;
use crate::league::standings::{ResultTuple, StandingsService};
use crate::middleware::auth::Claims;
use crate::models::matches::{Match, MatchStatus};
use crate::models::pending_result::{PendingResult, ResultStatus};
use crate::store::JsonStore;

/// A submission about to enter the pending set. Evidence has already been
/// turned into a reference string by the handler layer.
#[derive(Debug)]
pub struct NewResult {
    pub match_id: Uuid,
    pub home_score: u32,
    pub away_score: u32,
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct MatchEdit {
    pub home_score: u32,
    pub away_score: u32,
    pub notes: Option<String>,
    pub screenshot: Option<String>,
}

#[derive(Debug)]
pub struct PendingEdit {
    pub home_score: u32,
    pub away_score: u32,
    pub screenshot: Option<String>,
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub result: PendingResult,
    pub auto_approved: bool,
}

/// The result lifecycle state machine: pending → approved/rejected, plus the
/// revert-then-reapply edit path for completed matches.
///
/// Approval touches four records (match, two teams, pending result) with no
/// cross-entity transaction; steps run in a fixed order and partial failures
/// are logged and surfaced, never silently swallowed. Aggregate mutations
/// take the store's stats gate so two approvals cannot interleave.
#[derive(Clone)]
pub struct ResultService {
    store: Arc<JsonStore>,
    standings: StandingsService,
    /// Policy flag: submissions by privileged users chain straight into
    /// approval without an observable pending state.
    auto_approve_privileged: bool,
}

impl ResultService {
    pub fn new(store: Arc<JsonStore>, auto_approve_privileged: bool) -> Self {
        let standings = StandingsService::new(store.clone());
        Self {
            store,
            standings,
            auto_approve_privileged,
        }
    }

    /// Submit a result against a scheduled match.
    pub async fn submit(
        &self,
        actor: &Claims,
        new: NewResult,
    ) -> Result<SubmitOutcome, LeagueError> {
        let submitter = actor
            .user_id()
            .ok_or(LeagueError::Unauthorized("invalid user id in token"))?;
        let mat = self
            .store
            .matches
            .get(new.match_id)
            .await
            .ok_or(LeagueError::NotFound("match"))?;

        let result = PendingResult {
            id: Uuid::new_v4(),
            match_id: mat.id,
            home_team: mat.home_team.clone(),
            away_team: mat.away_team.clone(),
            home_score: new.home_score,
            away_score: new.away_score,
            submitted_at: Utc::now(),
            submitted_by: submitter,
            status: ResultStatus::Pending,
            screenshot: new.screenshot,
            notes: new.notes,
        };
        self.store.pending_results.insert(result.clone()).await?;
        tracing::info!(
            "result submitted for match {}: {} {} - {} {}",
            mat.id,
            result.home_team,
            result.home_score,
            result.away_score,
            result.away_team
        );

        if self.auto_approve_privileged && actor.is_admin() {
            self.approve(actor, result.id).await?;
            let approved = PendingResult {
                status: ResultStatus::Approved,
                ..result
            };
            return Ok(SubmitOutcome {
                result: approved,
                auto_approved: true,
            });
        }

        Ok(SubmitOutcome {
            result,
            auto_approved: false,
        })
    }

    /// Approve a pending result: complete the match, fold the score into the
    /// team aggregates, drop the submission from the pending set.
    pub async fn approve(&self, actor: &Claims, result_id: Uuid) -> Result<Match, LeagueError> {
        if !actor.is_admin() {
            return Err(LeagueError::Unauthorized("only admins may approve results"));
        }
        let pending = self
            .store
            .pending_results
            .get(result_id)
            .await
            .ok_or(LeagueError::NotFound("pending result"))?;
        if pending.status != ResultStatus::Pending {
            return Err(LeagueError::InvalidState(format!(
                "result {} has already been decided",
                result_id
            )));
        }
        // Serialize against other aggregate mutations for the whole saga. The
        // match is read under the gate: a concurrent approval of a second
        // submission for the same match must see it already completed, or
        // both scores would count.
        let _gate = self.store.stats_gate().lock().await;

        let mat = self
            .store
            .matches
            .get(pending.match_id)
            .await
            .ok_or(LeagueError::NotFound("match"))?;

        // A re-approval against an already-completed match must first revert
        // the stored score, or the aggregates would double-count.
        let prior = (mat.status == MatchStatus::Completed).then(|| ResultTuple {
            home_team: mat.home_team.clone(),
            away_team: mat.away_team.clone(),
            home_score: mat.home_score.unwrap_or(0),
            away_score: mat.away_score.unwrap_or(0),
        });

        // Fixed saga order: match → home team → away team → pending removal.
        let updated = self
            .store
            .matches
            .update(mat.id, |m| {
                m.status = MatchStatus::Completed;
                m.home_score = Some(pending.home_score);
                m.away_score = Some(pending.away_score);
                if pending.notes.is_some() {
                    m.notes = pending.notes.clone();
                }
                if pending.screenshot.is_some() {
                    m.screenshot = pending.screenshot.clone();
                }
            })
            .await?;

        if let Some(prior) = &prior {
            self.standings.revert(prior).await?;
        }
        self.standings
            .apply(&ResultTuple {
                home_team: pending.home_team.clone(),
                away_team: pending.away_team.clone(),
                home_score: pending.home_score,
                away_score: pending.away_score,
            })
            .await?;

        self.store
            .pending_results
            .update(result_id, |r| r.status = ResultStatus::Approved)
            .await?;
        if let Err(e) = self.store.pending_results.delete(result_id).await {
            // The stats are already applied; an orphaned approved entry is
            // reported, not rolled back.
            tracing::error!(
                "approved result {} could not be removed from the pending set: {}",
                result_id,
                e
            );
            return Err(e.into());
        }

        tracing::info!(
            "result {} approved by {}: match {} completed {} - {}",
            result_id,
            actor.username,
            updated.id,
            pending.home_score,
            pending.away_score
        );
        Ok(updated)
    }

    /// Reject a pending result. No match or aggregate mutation.
    pub async fn reject(&self, actor: &Claims, result_id: Uuid) -> Result<(), LeagueError> {
        if !actor.is_admin() {
            return Err(LeagueError::Unauthorized("only admins may reject results"));
        }
        let pending = self
            .store
            .pending_results
            .get(result_id)
            .await
            .ok_or(LeagueError::NotFound("pending result"))?;
        if pending.status != ResultStatus::Pending {
            return Err(LeagueError::InvalidState(format!(
                "result {} has already been decided",
                result_id
            )));
        }
        self.store
            .pending_results
            .update(result_id, |r| r.status = ResultStatus::Rejected)
            .await?;
        self.store.pending_results.delete(result_id).await?;
        tracing::info!("result {} rejected by {}", result_id, actor.username);
        Ok(())
    }

    /// Admin edit of a match outcome.
    ///
    /// For an already-completed match the previous score's contribution is
    /// reverted before the new one is applied; revert and reapply run under
    /// one stats-gate acquisition so no other aggregate mutation interleaves.
    pub async fn edit_match(
        &self,
        actor: &Claims,
        match_id: Uuid,
        edit: MatchEdit,
    ) -> Result<Match, LeagueError> {
        if !actor.is_admin() {
            return Err(LeagueError::Unauthorized("only admins may edit matches"));
        }

        // The prior-score snapshot must happen under the gate, same as in
        // approval, so a concurrent edit's completion is observed.
        let _gate = self.store.stats_gate().lock().await;

        let mat = self
            .store
            .matches
            .get(match_id)
            .await
            .ok_or(LeagueError::NotFound("match"))?;

        let prior = (mat.status == MatchStatus::Completed).then(|| ResultTuple {
            home_team: mat.home_team.clone(),
            away_team: mat.away_team.clone(),
            home_score: mat.home_score.unwrap_or(0),
            away_score: mat.away_score.unwrap_or(0),
        });

        let updated = self
            .store
            .matches
            .update(match_id, |m| {
                m.status = MatchStatus::Completed;
                m.home_score = Some(edit.home_score);
                m.away_score = Some(edit.away_score);
                m.notes = edit.notes.clone();
                if edit.screenshot.is_some() {
                    m.screenshot = edit.screenshot.clone();
                }
            })
            .await?;

        // Revert persists fully before the reapply starts.
        if let Some(prior) = &prior {
            self.standings.revert(prior).await?;
        }
        self.standings
            .apply(&ResultTuple {
                home_team: updated.home_team.clone(),
                away_team: updated.away_team.clone(),
                home_score: edit.home_score,
                away_score: edit.away_score,
            })
            .await?;

        tracing::info!(
            "match {} edited by {}: now {} - {}",
            match_id,
            actor.username,
            edit.home_score,
            edit.away_score
        );
        Ok(updated)
    }

    /// Submitter-only edit of a still-pending submission. No aggregate effect
    /// until approval.
    pub async fn edit_pending(
        &self,
        actor: &Claims,
        result_id: Uuid,
        edit: PendingEdit,
    ) -> Result<PendingResult, LeagueError> {
        let actor_id = actor
            .user_id()
            .ok_or(LeagueError::Unauthorized("invalid user id in token"))?;
        let pending = self
            .store
            .pending_results
            .get(result_id)
            .await
            .ok_or(LeagueError::NotFound("pending result"))?;
        if pending.submitted_by != actor_id {
            return Err(LeagueError::Unauthorized(
                "only the submitter may edit a pending result",
            ));
        }
        if pending.status != ResultStatus::Pending {
            return Err(LeagueError::InvalidState(format!(
                "result {} is no longer pending",
                result_id
            )));
        }
        let updated = self
            .store
            .pending_results
            .update(result_id, |r| {
                r.home_score = edit.home_score;
                r.away_score = edit.away_score;
                if edit.screenshot.is_some() {
                    r.screenshot = edit.screenshot.clone();
                }
            })
            .await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::team::Team;
    use crate::models::user::UserRole;

    fn claims(role: UserRole) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: "tester".to_string(),
            role,
            exp: 0,
        }
    }

    async fn fixture() -> (Arc<JsonStore>, Uuid, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("liga-results-test-{}", Uuid::new_v4()));
        let store = Arc::new(JsonStore::load(&dir).await.unwrap());
        store.teams.insert(Team::new("alpha".into(), None)).await.unwrap();
        store.teams.insert(Team::new("beta".into(), None)).await.unwrap();
        let mat = Match {
            id: Uuid::new_v4(),
            home_team: "alpha".to_string(),
            away_team: "beta".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            matchday: 1,
            status: MatchStatus::Scheduled,
            home_score: None,
            away_score: None,
            notes: None,
            screenshot: None,
        };
        let match_id = mat.id;
        store.matches.insert(mat).await.unwrap();
        (store, match_id, dir)
    }

    fn new_result(match_id: Uuid, home: u32, away: u32) -> NewResult {
        NewResult {
            match_id,
            home_score: home,
            away_score: away,
            screenshot: None,
            notes: None,
        }
    }

    async fn team_by_name(store: &JsonStore, name: &str) -> Team {
        store
            .teams
            .list()
            .await
            .into_iter()
            .find(|t| t.name == name)
            .unwrap()
    }

    #[tokio::test]
    async fn approve_completes_match_and_consumes_pending() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);

        let outcome = service
            .submit(&claims(UserRole::User), new_result(match_id, 2, 1))
            .await
            .unwrap();
        assert!(!outcome.auto_approved);

        let admin = claims(UserRole::Admin);
        let updated = service.approve(&admin, outcome.result.id).await.unwrap();
        assert_eq!(updated.status, MatchStatus::Completed);
        assert_eq!(updated.home_score, Some(2));

        let alpha = team_by_name(&store, "alpha").await;
        assert_eq!((alpha.played, alpha.won, alpha.points()), (1, 1, 3));
        assert_eq!(store.pending_results.len().await, 0);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn reapproval_of_completed_match_does_not_double_count() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);
        let admin = claims(UserRole::Admin);
        let user = claims(UserRole::User);

        // Two submissions for the same match; both get approved in turn.
        let first = service.submit(&user, new_result(match_id, 2, 0)).await.unwrap();
        let second = service.submit(&user, new_result(match_id, 1, 1)).await.unwrap();
        service.approve(&admin, first.result.id).await.unwrap();
        service.approve(&admin, second.result.id).await.unwrap();

        // Only the last approved score counts.
        let alpha = team_by_name(&store, "alpha").await;
        let beta = team_by_name(&store, "beta").await;
        assert_eq!((alpha.played, alpha.won, alpha.drawn), (1, 0, 1));
        assert_eq!((beta.played, beta.drawn, beta.points()), (1, 1, 1));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_approvals_of_one_match_count_it_once() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);
        let admin = claims(UserRole::Admin);
        let user = claims(UserRole::User);

        let first = service.submit(&user, new_result(match_id, 2, 0)).await.unwrap();
        let second = service.submit(&user, new_result(match_id, 0, 2)).await.unwrap();

        let (id1, id2) = (first.result.id, second.result.id);
        let (s1, s2) = (service.clone(), service.clone());
        let (a1, a2) = (admin.clone(), admin.clone());
        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.approve(&a1, id1).await }),
            tokio::spawn(async move { s2.approve(&a2, id2).await }),
        );
        r1.unwrap().unwrap();
        r2.unwrap().unwrap();

        // Whichever approval lands second reverts the first; the aggregates
        // must reflect exactly one played match, never both scores.
        let alpha = team_by_name(&store, "alpha").await;
        let beta = team_by_name(&store, "beta").await;
        assert_eq!(alpha.played, 1);
        assert_eq!(beta.played, 1);
        assert_eq!(alpha.won + alpha.lost, 1);
        assert_eq!(beta.won + beta.lost, 1);
        assert_eq!(alpha.goals_for + alpha.goals_against, 2);
        assert_eq!(beta.goals_for + beta.goals_against, 2);
        assert_eq!(store.pending_results.len().await, 0);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn reject_touches_nothing_but_the_pending_set() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);

        let outcome = service
            .submit(&claims(UserRole::User), new_result(match_id, 5, 0))
            .await
            .unwrap();
        service
            .reject(&claims(UserRole::Admin), outcome.result.id)
            .await
            .unwrap();

        let mat = store.matches.get(match_id).await.unwrap();
        assert_eq!(mat.status, MatchStatus::Scheduled);
        let alpha = team_by_name(&store, "alpha").await;
        assert_eq!(alpha.played, 0);
        assert_eq!(store.pending_results.len().await, 0);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn approval_requires_the_admin_role() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);

        let user = claims(UserRole::User);
        let outcome = service.submit(&user, new_result(match_id, 1, 0)).await.unwrap();
        let err = service.approve(&user, outcome.result.id).await.unwrap_err();
        assert!(matches!(err, LeagueError::Unauthorized(_)));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn privileged_submission_chains_into_approval() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), true);

        let outcome = service
            .submit(&claims(UserRole::Admin), new_result(match_id, 3, 3))
            .await
            .unwrap();
        assert!(outcome.auto_approved);
        assert_eq!(outcome.result.status, ResultStatus::Approved);

        let mat = store.matches.get(match_id).await.unwrap();
        assert_eq!(mat.status, MatchStatus::Completed);
        assert_eq!(store.pending_results.len().await, 0);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn pending_edit_is_submitter_only() {
        let (store, match_id, dir) = fixture().await;
        let service = ResultService::new(store.clone(), false);

        let submitter = claims(UserRole::User);
        let outcome = service
            .submit(&submitter, new_result(match_id, 1, 0))
            .await
            .unwrap();

        let stranger = claims(UserRole::User);
        let err = service
            .edit_pending(
                &stranger,
                outcome.result.id,
                PendingEdit {
                    home_score: 9,
                    away_score: 9,
                    screenshot: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::Unauthorized(_)));

        let updated = service
            .edit_pending(
                &submitter,
                outcome.result.id,
                PendingEdit {
                    home_score: 2,
                    away_score: 2,
                    screenshot: None,
                },
            )
            .await
            .unwrap();
        assert_eq!((updated.home_score, updated.away_score), (2, 2));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
