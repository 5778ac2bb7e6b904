use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::league::league::LeagueService;
use crate::league::results::MatchEdit;
use crate::middleware::auth::Claims;
use crate::models::matches::{CreateMatchRequest, EditMatchRequest, Match, MatchStatus};
use crate::services::evidence::EvidenceStore;
use crate::store::JsonStore;

#[tracing::instrument(
    name = "Create match manually",
    skip(request, store, claims),
    fields(username = %claims.username)
)]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let new_match = Match {
        id: Uuid::new_v4(),
        home_team: request.home_team,
        away_team: request.away_team,
        date: request.date,
        time: request.time,
        matchday: request.matchday,
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
        notes: None,
        screenshot: None,
    };
    if let Err(e) = store.matches.insert(new_match.clone()).await {
        tracing::error!("Failed to persist manual match: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "match": new_match,
    }))
}

#[tracing::instrument(
    name = "Edit match result",
    skip(request, league, evidence, claims),
    fields(
        username = %claims.username,
        match_id = %match_id
    )
)]
pub async fn edit_match(
    match_id: Uuid,
    request: web::Json<EditMatchRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let screenshot = match request.screenshot {
        Some(raw) => match evidence.store_image(Uuid::new_v4(), &raw).await {
            Ok(Some(stored)) => Some(stored),
            Ok(None) => Some(raw),
            Err(e) => {
                tracing::error!("Failed to store evidence image: {}", e);
                return HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Failed to store screenshot",
                }));
            }
        },
        None => None,
    };

    let edit = MatchEdit {
        home_score: request.home_score,
        away_score: request.away_score,
        notes: request.notes,
        screenshot,
    };
    match league.results.edit_match(&claims, match_id, edit).await {
        Ok(updated) => HttpResponse::Ok().json(json!({
            "success": true,
            "match": updated,
        })),
        Err(e) => e.to_response(),
    }
}
