use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::league::league::LeagueService;
use crate::middleware::auth::Claims;
use crate::store::JsonStore;

#[tracing::instrument(name = "List pending results", skip(store, claims), fields(username = %claims.username))]
pub async fn get_pending_results(
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let mut results = store.pending_results.list().await;
    results.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
    HttpResponse::Ok().json(json!({
        "success": true,
        "results": results,
    }))
}

#[tracing::instrument(
    name = "Approve pending result",
    skip(league, claims),
    fields(
        username = %claims.username,
        result_id = %result_id
    )
)]
pub async fn approve_result(
    result_id: Uuid,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    match league.results.approve(&claims, result_id).await {
        Ok(updated) => HttpResponse::Ok().json(json!({
            "success": true,
            "match": updated,
        })),
        Err(e) => e.to_response(),
    }
}

#[tracing::instrument(
    name = "Reject pending result",
    skip(league, claims),
    fields(
        username = %claims.username,
        result_id = %result_id
    )
)]
pub async fn reject_result(
    result_id: Uuid,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    match league.results.reject(&claims, result_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
        })),
        Err(e) => e.to_response(),
    }
}
