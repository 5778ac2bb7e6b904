use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::league::resolver::normalize_team_name;
use crate::middleware::auth::Claims;
use crate::models::team::RenameTeamRequest;
use crate::store::JsonStore;

/// Rename a team and cascade the new display name into every match and
/// pending result that references the old one.
#[tracing::instrument(
    name = "Rename team",
    skip(request, store, claims),
    fields(username = %claims.username, team_id = %team_id)
)]
pub async fn rename_team(
    team_id: Uuid,
    request: web::Json<RenameTeamRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let new_name = request.name.trim().to_string();
    if new_name.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Team name must not be empty",
        }));
    }

    let Some(team) = store.teams.get(team_id).await else {
        return HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "team not found",
        }));
    };
    let teams = store.teams.list().await;
    let normalized = normalize_team_name(&new_name);
    if teams
        .iter()
        .any(|t| t.id != team_id && normalize_team_name(&t.name) == normalized)
    {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Team name is already taken",
        }));
    }

    let old_name = team.name.clone();
    let updated = match store.teams.update(team_id, |t| t.name = new_name.clone()).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("team rename failed: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Matches and pending results carry display names; keep them in step so
    // the resolver's exact stage keeps hitting.
    let matches_changed = store
        .matches
        .update_each(|m| {
            let mut changed = false;
            if m.home_team == old_name {
                m.home_team = new_name.clone();
                changed = true;
            }
            if m.away_team == old_name {
                m.away_team = new_name.clone();
                changed = true;
            }
            changed
        })
        .await;
    if let Err(e) = matches_changed {
        tracing::error!("cascade rename into matches failed: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    let pending_changed = store
        .pending_results
        .update_each(|r| {
            let mut changed = false;
            if r.home_team == old_name {
                r.home_team = new_name.clone();
                changed = true;
            }
            if r.away_team == old_name {
                r.away_team = new_name.clone();
                changed = true;
            }
            changed
        })
        .await;
    if let Err(e) = pending_changed {
        tracing::error!("cascade rename into pending results failed: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    if let Some(owner) = updated.owner_user_id {
        if let Err(e) = store
            .users
            .update(owner, |u| u.team_name = Some(new_name.clone()))
            .await
        {
            tracing::warn!("owner record not updated on rename: {}", e);
        }
    }

    tracing::info!("renamed team {:?} to {:?}", old_name, updated.name);
    HttpResponse::Ok().json(json!({
        "success": true,
        "team": updated,
    }))
}
