use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::store::JsonStore;

#[tracing::instrument(name = "Get all teams", skip(store))]
pub async fn get_teams(store: web::Data<JsonStore>) -> HttpResponse {
    let mut teams = store.teams.list().await;
    teams.sort_by(|a, b| a.name.cmp(&b.name));
    HttpResponse::Ok().json(json!({
        "success": true,
        "teams": teams,
    }))
}

#[tracing::instrument(name = "Get team by id", skip(store))]
pub async fn get_team(team_id: Uuid, store: web::Data<JsonStore>) -> HttpResponse {
    match store.teams.get(team_id).await {
        Some(team) => HttpResponse::Ok().json(json!({
            "success": true,
            "team": team,
        })),
        None => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "team not found",
        })),
    }
}
