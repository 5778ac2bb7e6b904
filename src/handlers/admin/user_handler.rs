use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde_json::json;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::team::Team;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
use crate::store::JsonStore;
use crate::utils::password::hash_password;

#[tracing::instrument(name = "List users", skip(store, claims), fields(username = %claims.username))]
pub async fn get_users(store: web::Data<JsonStore>, claims: web::ReqData<Claims>) -> HttpResponse {
    let users = store.users.list().await;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    HttpResponse::Ok().json(json!({
        "success": true,
        "users": users,
    }))
}

#[tracing::instrument(
    name = "Create user",
    skip(request, store, claims),
    fields(username = %claims.username, new_user = %request.username)
)]
pub async fn create_user(
    request: web::Json<CreateUserRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();
    let users = store.users.list().await;
    if users
        .iter()
        .any(|u| u.username.eq_ignore_ascii_case(&request.username))
    {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username is already taken",
        }));
    }

    let password_hash = match hash_password(request.password.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        username: request.username,
        password_hash,
        role: request.role,
        team_name: Some(request.team_name.clone()),
        created_at: Utc::now(),
    };
    let team = Team::new(request.team_name, Some(user.id));

    if let Err(e) = store.users.insert(user.clone()).await {
        tracing::error!("Failed to persist new user: {}", e);
        return HttpResponse::InternalServerError().finish();
    }
    if let Err(e) = store.teams.insert(team).await {
        tracing::error!("Failed to persist team for new user {}: {}", user.id, e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(json!({
        "success": true,
        "user": UserResponse::from(&user),
    }))
}

#[tracing::instrument(
    name = "Update user",
    skip(request, store, claims),
    fields(username = %claims.username, user_id = %user_id)
)]
pub async fn update_user(
    user_id: Uuid,
    request: web::Json<UpdateUserRequest>,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let request = request.into_inner();

    let password_hash = match &request.password {
        Some(password) => match hash_password(password.expose_secret()) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("Failed to hash password: {:?}", e);
                return HttpResponse::InternalServerError().finish();
            }
        },
        None => None,
    };

    if let Some(new_name) = &request.username {
        let users = store.users.list().await;
        if users
            .iter()
            .any(|u| u.id != user_id && u.username.eq_ignore_ascii_case(new_name))
        {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Username is already taken",
            }));
        }
    }

    let updated = store
        .users
        .update(user_id, |u| {
            if let Some(username) = &request.username {
                u.username = username.clone();
            }
            if let Some(hash) = &password_hash {
                u.password_hash = hash.clone();
            }
            if let Some(role) = request.role {
                u.role = role;
            }
        })
        .await;

    match updated {
        Ok(user) => HttpResponse::Ok().json(json!({
            "success": true,
            "user": UserResponse::from(&user),
        })),
        Err(e) => {
            tracing::info!("User update failed: {}", e);
            HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "user not found",
            }))
        }
    }
}

/// Delete a user and cascade: the owned team goes too, along with every match
/// and pending result involving that team. The bootstrap "admin" account is
/// not deletable.
#[tracing::instrument(
    name = "Delete user",
    skip(store, claims),
    fields(username = %claims.username, user_id = %user_id)
)]
pub async fn delete_user(
    user_id: Uuid,
    store: web::Data<JsonStore>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let Some(user) = store.users.get(user_id).await else {
        return HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "user not found",
        }));
    };
    if user.username == "admin" {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "The admin account cannot be deleted",
        }));
    }

    let owned_team = store
        .teams
        .list()
        .await
        .into_iter()
        .find(|t| t.owner_user_id == Some(user_id));

    if let Some(team) = &owned_team {
        let team_name = team.name.clone();
        match store
            .matches
            .retain(|m| m.home_team != team_name && m.away_team != team_name)
            .await
        {
            Ok(removed) if removed > 0 => {
                tracing::info!("cascade removed {} matches of team {:?}", removed, team_name)
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("cascade match removal failed: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        }
        if let Err(e) = store
            .pending_results
            .retain(|r| r.home_team != team_name && r.away_team != team_name)
            .await
        {
            tracing::error!("cascade pending-result removal failed: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
        if let Err(e) = store.teams.delete(team.id).await {
            tracing::error!("cascade team removal failed: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    if let Err(e) = store.users.delete(user_id).await {
        tracing::error!("user removal failed: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    tracing::info!(
        "deleted user {:?} and cascaded team {:?}",
        user.username,
        owned_team.map(|t| t.name)
    );
    HttpResponse::Ok().json(json!({
        "success": true,
    }))
}
