use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde_json::json;
use uuid::Uuid;

use crate::league::resolver::normalize_team_name;
use crate::models::team::Team;
use crate::models::user::{RegistrationRequest, User, UserResponse, UserRole};
use crate::store::JsonStore;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, store),
    fields(
        registration = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    store: web::Data<JsonStore>,
) -> HttpResponse {
    let settings = store.settings().await;
    if !settings.allow_registration {
        tracing::info!("Registration attempt while registration is closed");
        return HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Registration is currently closed",
        }));
    }
    match &user_form.registration_token {
        Some(token) if *token == settings.registration_token => {}
        _ => {
            tracing::info!("Registration attempt with missing or invalid token");
            return HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Invalid registration token",
            }));
        }
    }

    let username = user_form.username.trim();
    let team_name = user_form.team_name.trim();
    if username.is_empty() || team_name.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username and team name must not be empty",
        }));
    }

    let users = store.users.list().await;
    if users
        .iter()
        .any(|u| u.username.eq_ignore_ascii_case(username))
    {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username is already taken",
        }));
    }
    let teams = store.teams.list().await;
    let normalized = normalize_team_name(team_name);
    if teams
        .iter()
        .any(|t| normalize_team_name(&t.name) == normalized)
    {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Team name is already taken",
        }));
    }

    let password_hash = match hash_password(user_form.password.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash,
        role: UserRole::User,
        team_name: Some(team_name.to_string()),
        created_at: Utc::now(),
    };
    let team = Team::new(team_name.to_string(), Some(user.id));

    if let Err(e) = store.users.insert(user.clone()).await {
        tracing::error!("Failed to persist new user: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    if let Err(e) = store.teams.insert(team).await {
        // The user exists without a team; surface the failure rather than
        // leaving the client believing registration succeeded.
        tracing::error!("Failed to persist team for new user {}: {}", user.id, e);
        return HttpResponse::InternalServerError().finish();
    }

    tracing::info!("Registered user {} with team {:?}", user.username, user.team_name);
    HttpResponse::Ok().json(json!({
        "success": true,
        "user": UserResponse::from(&user),
    }))
}
