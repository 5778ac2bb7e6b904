use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::league::league::LeagueService;

#[tracing::instrument(name = "Get league standings", skip(league))]
pub async fn get_standings(league: web::Data<LeagueService>) -> HttpResponse {
    match league.standings.table().await {
        Ok(response) => HttpResponse::Ok().json(json!({
            "success": true,
            "standings": response.table,
            "skipped_matches": response.skipped_matches,
        })),
        Err(e) => e.to_response(),
    }
}
