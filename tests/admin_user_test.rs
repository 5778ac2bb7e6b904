use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::{admin_login, generate_schedule, register_and_login, spawn_app};

#[tokio::test]
async fn admin_can_create_and_list_users() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;

    let response = client
        .post(format!("{}/admin/users", &test_app.address))
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "coach",
            "password": "coach-pw-123",
            "team_name": "Coach FC",
            "role": "user",
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/admin/users", &test_app.address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2); // bootstrap admin + coach
    assert!(users.iter().any(|u| u["username"] == "coach"));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    // The created user can log straight in, and their team exists.
    common::utils::login(&test_app.address, "coach", "coach-pw-123").await;
    assert!(test_app
        .store
        .teams
        .list()
        .await
        .iter()
        .any(|t| t.name == "Coach FC"));
}

#[tokio::test]
async fn admin_can_update_role_and_password() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;
    let (username, _, _) = register_and_login(&test_app.address).await;

    let user_id = test_app
        .store
        .users
        .list()
        .await
        .iter()
        .find(|u| u.username == username)
        .unwrap()
        .id;

    let response = client
        .put(format!("{}/admin/users/{}", &test_app.address, user_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "admin", "password": "rotated-pw-456" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["role"], "admin");

    // Old password is gone, new one works.
    let response = client
        .post(format!("{}/login", &test_app.address))
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
    common::utils::login(&test_app.address, &username, "rotated-pw-456").await;
}

#[tokio::test]
async fn deleting_a_user_cascades_to_team_and_matches() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;

    let (doomed_user, doomed_team, _) = register_and_login(&test_app.address).await;
    let (_, surviving_team, _) = register_and_login(&test_app.address).await;
    let (_, third_team, _) = register_and_login(&test_app.address).await;
    generate_schedule(&test_app.address, &admin_token).await;
    assert_eq!(test_app.store.matches.len().await, 6);

    let user_id = test_app
        .store
        .users
        .list()
        .await
        .iter()
        .find(|u| u.username == doomed_user)
        .unwrap()
        .id;

    let response = client
        .delete(format!("{}/admin/users/{}", &test_app.address, user_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    // User and team are gone; only fixtures between the survivors remain.
    assert!(test_app
        .store
        .users
        .list()
        .await
        .iter()
        .all(|u| u.username != doomed_user));
    assert!(test_app
        .store
        .teams
        .list()
        .await
        .iter()
        .all(|t| t.name != doomed_team));
    let matches = test_app.store.matches.list().await;
    assert_eq!(matches.len(), 2);
    for m in &matches {
        assert!([&surviving_team, &third_team].contains(&&m.home_team));
        assert!([&surviving_team, &third_team].contains(&&m.away_team));
    }
}

#[tokio::test]
async fn the_bootstrap_admin_cannot_be_deleted() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;

    let admin_id = test_app
        .store
        .users
        .list()
        .await
        .iter()
        .find(|u| u.username == "admin")
        .unwrap()
        .id;

    let response = client
        .delete(format!("{}/admin/users/{}", &test_app.address, admin_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(test_app.store.users.len().await, 1);
}

#[tokio::test]
async fn renaming_a_team_cascades_into_matches() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;

    let (_, old_name, _) = register_and_login(&test_app.address).await;
    register_and_login(&test_app.address).await;
    generate_schedule(&test_app.address, &admin_token).await;

    let team_id = test_app
        .store
        .teams
        .list()
        .await
        .iter()
        .find(|t| t.name == old_name)
        .unwrap()
        .id;

    let response = client
        .put(format!("{}/admin/teams/{}", &test_app.address, team_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "name": "Renamed United" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let matches = test_app.store.matches.list().await;
    assert!(matches
        .iter()
        .all(|m| m.home_team != old_name && m.away_team != old_name));
    assert_eq!(
        matches
            .iter()
            .filter(|m| m.home_team == "Renamed United" || m.away_team == "Renamed United")
            .count(),
        2
    );
}
