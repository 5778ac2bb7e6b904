use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::evidence::EvidenceStore;

#[tracing::instrument(name = "Serve evidence image", skip(evidence))]
pub async fn get_evidence(name: String, evidence: web::Data<EvidenceStore>) -> HttpResponse {
    match evidence.read(&name).await {
        Ok((bytes, content_type)) => HttpResponse::Ok().content_type(content_type).body(bytes),
        Err(e) => {
            tracing::info!("Evidence {:?} not readable: {}", name, e);
            HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "screenshot not found",
            }))
        }
    }
}
