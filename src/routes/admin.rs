// src/routes/admin.rs
use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::handlers::admin::{
    match_handler, result_handler, schedule_handler, settings_handler, team_handler, user_handler,
};
use crate::league::league::LeagueService;
use crate::league::schedule::ScheduleParams;
use crate::middleware::auth::Claims;
use crate::models::matches::{CreateMatchRequest, EditMatchRequest};
use crate::models::settings::{UpdateSettingsRequest, UpdateTokenRequest};
use crate::models::team::RenameTeamRequest;
use crate::models::user::{CreateUserRequest, UpdateUserRequest};
use crate::services::evidence::EvidenceStore;
use crate::store::JsonStore;

/// Generate a fresh double round-robin schedule (destructive)
#[post("/schedule/generate")]
async fn generate_schedule(
    params: web::Json<ScheduleParams>,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    schedule_handler::generate_schedule(params, league, claims).await
}

/// Remove every match
#[delete("/matches")]
async fn clear_matches(
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    schedule_handler::clear_matches(league, claims).await
}

/// Create a single match outside schedule generation
#[post("/matches")]
async fn create_match(
    request: web::Json<CreateMatchRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    match_handler::create_match(request, store, claims).await
}

/// Set or correct a match result
#[put("/matches/{match_id}")]
async fn edit_match(
    path: web::Path<Uuid>,
    request: web::Json<EditMatchRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let match_id = path.into_inner();
    match_handler::edit_match(match_id, request, league, evidence, claims).await
}

/// List all pending result submissions
#[get("/results")]
async fn get_pending_results(
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    result_handler::get_pending_results(store, claims).await
}

/// Approve a pending result
#[post("/results/{result_id}/approve")]
async fn approve_result(
    path: web::Path<Uuid>,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let result_id = path.into_inner();
    result_handler::approve_result(result_id, league, claims).await
}

/// Reject a pending result
#[post("/results/{result_id}/reject")]
async fn reject_result(
    path: web::Path<Uuid>,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let result_id = path.into_inner();
    result_handler::reject_result(result_id, league, claims).await
}

/// List all user accounts
#[get("/users")]
async fn get_users(store: web::Data<JsonStore>, claims: web::ReqData<Claims>) -> HttpResponse {
    user_handler::get_users(store, claims).await
}

/// Create a user together with their team
#[post("/users")]
async fn create_user(
    request: web::Json<CreateUserRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    user_handler::create_user(request, store, claims).await
}

/// Update a user account
#[put("/users/{user_id}")]
async fn update_user(
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = path.into_inner();
    user_handler::update_user(user_id, request, store, claims).await
}

/// Delete a user and cascade their team, matches and pending results
#[delete("/users/{user_id}")]
async fn delete_user(
    path: web::Path<Uuid>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = path.into_inner();
    user_handler::delete_user(user_id, store, claims).await
}

/// Rename a team, cascading the display name everywhere
#[put("/teams/{team_id}")]
async fn rename_team(
    path: web::Path<Uuid>,
    request: web::Json<RenameTeamRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let team_id = path.into_inner();
    team_handler::rename_team(team_id, request, store, claims).await
}

/// Get the league settings
#[get("/settings")]
async fn get_settings(store: web::Data<JsonStore>, claims: web::ReqData<Claims>) -> HttpResponse {
    settings_handler::get_settings(store, claims).await
}

/// Update the league settings
#[put("/settings")]
async fn update_settings(
    request: web::Json<UpdateSettingsRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    settings_handler::update_settings(request, store, claims).await
}

/// Set or rotate the registration token
#[put("/settings/token")]
async fn update_token(
    request: web::Json<UpdateTokenRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    settings_handler::update_token(request, store, claims).await
}
