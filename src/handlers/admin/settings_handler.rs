use actix_web::{web, HttpResponse};
use rand::Rng;
use serde_json::json;

use crate::middleware::auth::Claims;
use crate::models::settings::{UpdateSettingsRequest, UpdateTokenRequest};
use crate::store::JsonStore;

fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..10).to_string()).collect()
}

#[tracing::instrument(name = "Get league settings", skip(store, claims), fields(username = %claims.username))]
pub async fn get_settings(
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let settings = store.settings().await;
    HttpResponse::Ok().json(json!({
        "success": true,
        "settings": settings,
    }))
}

#[tracing::instrument(
    name = "Update league settings",
    skip(request, store, claims),
    fields(username = %claims.username)
)]
pub async fn update_settings(
    request: web::Json<UpdateSettingsRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let mut settings = store.settings().await;
    settings.allow_registration = request.allow_registration;
    if let Some(token) = request.registration_token {
        settings.registration_token = token;
    }
    if let Err(e) = store.put_settings(settings.clone()).await {
        tracing::error!("settings write failed: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    tracing::info!(
        "settings updated: registration {}",
        if settings.allow_registration { "open" } else { "closed" }
    );
    HttpResponse::Ok().json(json!({
        "success": true,
        "settings": settings,
    }))
}

/// Set or rotate the registration token. An omitted token means "generate a
/// fresh one".
#[tracing::instrument(
    name = "Rotate registration token",
    skip(request, store, claims),
    fields(username = %claims.username)
)]
pub async fn update_token(
    request: web::Json<UpdateTokenRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let token = request
        .into_inner()
        .registration_token
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(generate_token);

    let mut settings = store.settings().await;
    settings.registration_token = token;
    if let Err(e) = store.put_settings(settings.clone()).await {
        tracing::error!("settings write failed: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "registration_token": settings.registration_token,
    }))
}
