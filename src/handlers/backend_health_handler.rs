use actix_web::HttpResponse;
use chrono::Utc;
use serde_json::json;

pub async fn check_backend_health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
