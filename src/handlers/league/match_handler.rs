use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::store::JsonStore;

#[tracing::instrument(name = "Get match schedule", skip(store))]
pub async fn get_matches(store: web::Data<JsonStore>) -> HttpResponse {
    let mut matches = store.matches.list().await;
    matches.sort_by(|a, b| {
        a.matchday
            .cmp(&b.matchday)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.time.cmp(&b.time))
    });
    HttpResponse::Ok().json(json!({
        "success": true,
        "matches": matches,
    }))
}
