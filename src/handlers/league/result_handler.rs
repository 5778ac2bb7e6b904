use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::league::league::LeagueService;
use crate::league::results::{NewResult, PendingEdit};
use crate::middleware::auth::Claims;
use crate::models::pending_result::{EditPendingRequest, SubmitResultRequest};
use crate::services::evidence::EvidenceStore;
use crate::store::JsonStore;

/// Turn an inline screenshot into a stored evidence reference. Values that are
/// not data URLs pass through unchanged.
async fn store_screenshot(
    evidence: &EvidenceStore,
    key: Uuid,
    screenshot: Option<String>,
) -> Result<Option<String>, HttpResponse> {
    let Some(raw) = screenshot else {
        return Ok(None);
    };
    match evidence.store_image(key, &raw).await {
        Ok(Some(stored)) => Ok(Some(stored)),
        Ok(None) => Ok(Some(raw)),
        Err(e) => {
            tracing::error!("Failed to store evidence image: {}", e);
            Err(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to store screenshot",
            })))
        }
    }
}

#[tracing::instrument(
    name = "Submit match result",
    skip(request, league, evidence, claims),
    fields(
        username = %claims.username,
        match_id = %request.match_id
    )
)]
pub async fn submit_result(
    request: web::Json<SubmitResultRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let evidence_key = Uuid::new_v4();
    let screenshot = match store_screenshot(&evidence, evidence_key, request.screenshot).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let new = NewResult {
        match_id: request.match_id,
        home_score: request.home_score,
        away_score: request.away_score,
        screenshot,
        notes: request.notes,
    };
    match league.results.submit(&claims, new).await {
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "success": true,
            "result": outcome.result,
            "auto_approved": outcome.auto_approved,
        })),
        Err(e) => e.to_response(),
    }
}

#[tracing::instrument(
    name = "Get own submitted results",
    skip(store, claims),
    fields(username = %claims.username)
)]
pub async fn get_my_results(
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let Some(user_id) = claims.user_id() else {
        return HttpResponse::Unauthorized().finish();
    };
    let mut results = store.pending_results.list().await;
    results.retain(|r| r.submitted_by == user_id);
    results.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    HttpResponse::Ok().json(json!({
        "success": true,
        "results": results,
    }))
}

#[tracing::instrument(
    name = "Edit own pending result",
    skip(request, league, evidence, claims),
    fields(
        username = %claims.username,
        result_id = %result_id
    )
)]
pub async fn edit_pending_result(
    result_id: Uuid,
    request: web::Json<EditPendingRequest>,
    league: web::Data<LeagueService>,
    evidence: web::Data<EvidenceStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let screenshot = match store_screenshot(&evidence, Uuid::new_v4(), request.screenshot).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let edit = PendingEdit {
        home_score: request.home_score,
        away_score: request.away_score,
        screenshot,
    };
    match league.results.edit_pending(&claims, result_id, edit).await {
        Ok(updated) => HttpResponse::Ok().json(json!({
            "success": true,
            "result": updated,
        })),
        Err(e) => e.to_response(),
    }
}
