use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::league::league::LeagueService;
use crate::league::schedule::ScheduleParams;
use crate::middleware::auth::Claims;

#[tracing::instrument(
    name = "Generate league schedule",
    skip(params, league, claims),
    fields(username = %claims.username)
)]
pub async fn generate_schedule(
    params: web::Json<ScheduleParams>,
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    match league.schedule.generate(params.into_inner()).await {
        Ok(summary) => HttpResponse::Ok().json(json!({
            "success": true,
            "schedule": summary,
        })),
        Err(e) => e.to_response(),
    }
}

#[tracing::instrument(
    name = "Clear all matches",
    skip(league, claims),
    fields(username = %claims.username)
)]
pub async fn clear_matches(
    league: web::Data<LeagueService>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    match league.schedule.clear_all().await {
        Ok(removed) => HttpResponse::Ok().json(json!({
            "success": true,
            "removed": removed,
        })),
        Err(e) => e.to_response(),
    }
}
