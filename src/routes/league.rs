// src/routes/league.rs
use actix_web::{get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::handlers::league::{
    evidence_handler, match_handler, result_handler, standings_handler, team_handler,
};
use crate::league::league::LeagueService;
use crate::middleware::auth::Claims;
use crate::models::pending_result::{EditPendingRequest, SubmitResultRequest};
use crate::services::evidence::EvidenceStore;
use crate::store::JsonStore;

/// Get all teams with their aggregate statistics
#[get("/teams")]
async fn get_teams(store: web::Data<JsonStore>) -> HttpResponse {
    team_handler::get_teams(store).await
}

/// Get a single team by id
#[get("/teams/{team_id}")]
async fn get_team(path: web::Path<Uuid>, store: web::Data<JsonStore>) -> HttpResponse {
    let team_id = path.into_inner();
    team_handler::get_team(team_id, store).await
}

/// Get the full match schedule
#[get("/matches")]
async fn get_matches(store: web::Data<JsonStore>) -> HttpResponse {
    match_handler::get_matches(store).await
}

/// Get the current standings table
#[get("/standings")]
async fn get_standings(league: web::Data<LeagueService>) -> HttpResponse {
    standings_handler::get_standings(league).await
}

/// Submit a match result for review
#[post("/results")]
async fn submit_result(
    request: web::Json<SubmitResultRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    result_handler::submit_result(request, league, evidence, claims).await
}

/// Get the caller's own submitted results
#[get("/results/mine")]
async fn get_my_results(
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    result_handler::get_my_results(store, claims).await
}

/// Edit an own, still-pending result submission
#[put("/results/{result_id}")]
async fn edit_pending_result(
    path: web::Path<Uuid>,
    request: web::Json<EditPendingRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let result_id = path.into_inner();
    result_handler::edit_pending_result(result_id, request, league, evidence, claims).await
}

/// Serve a stored evidence screenshot
#[get("/evidence/{name}")]
async fn get_evidence(path: web::Path<String>, evidence: web::Data<EvidenceStore>) -> HttpResponse {
    let name = path.into_inner();
    evidence_handler::get_evidence(name, evidence).await
}
