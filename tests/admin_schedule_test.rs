use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::{admin_login, generate_schedule, register_and_login, spawn_app};

#[tokio::test]
async fn schedule_generation_builds_double_round_robin() {
    let test_app = spawn_app().await;

    for _ in 0..4 {
        register_and_login(&test_app.address).await;
    }
    let admin_token = admin_login(&test_app.address).await;

    let body = generate_schedule(&test_app.address, &admin_token).await;
    assert_eq!(body["schedule"]["total_matches"], 12);
    assert_eq!(body["schedule"]["matchdays"], 6);
    assert_eq!(body["schedule"]["first_date"], "2026-09-01");

    let matches = test_app.store.matches.list().await;
    assert_eq!(matches.len(), 12);
    // Every ordered pair of distinct teams appears exactly once.
    for m in &matches {
        assert_ne!(m.home_team, m.away_team);
        assert_eq!(
            matches
                .iter()
                .filter(|other| other.home_team == m.home_team && other.away_team == m.away_team)
                .count(),
            1
        );
    }
    // Two matches per matchday, interval days apart.
    for day in 1..=6u32 {
        assert_eq!(matches.iter().filter(|m| m.matchday == day).count(), 2);
    }
}

#[tokio::test]
async fn schedule_generation_requires_two_teams() {
    let test_app = spawn_app().await;
    let client = Client::new();

    register_and_login(&test_app.address).await;
    let admin_token = admin_login(&test_app.address).await;

    let response = client
        .post(format!("{}/admin/schedule/generate", &test_app.address))
        .bearer_auth(&admin_token)
        .json(&json!({
            "start_date": "2026-09-01",
            "matches_per_matchday": 2,
            "matchday_interval_days": 3,
            "kickoff": "20:00:00",
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(test_app.store.matches.len().await, 0);
}

#[tokio::test]
async fn regeneration_replaces_the_previous_schedule() {
    let test_app = spawn_app().await;

    for _ in 0..3 {
        register_and_login(&test_app.address).await;
    }
    let admin_token = admin_login(&test_app.address).await;

    generate_schedule(&test_app.address, &admin_token).await;
    let first_ids: Vec<_> = test_app
        .store
        .matches
        .list()
        .await
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(first_ids.len(), 6);

    generate_schedule(&test_app.address, &admin_token).await;
    let second = test_app.store.matches.list().await;
    assert_eq!(second.len(), 6);
    assert!(second.iter().all(|m| !first_ids.contains(&m.id)));
}

#[tokio::test]
async fn clear_matches_empties_the_schedule() {
    let test_app = spawn_app().await;
    let client = Client::new();

    for _ in 0..2 {
        register_and_login(&test_app.address).await;
    }
    let admin_token = admin_login(&test_app.address).await;
    generate_schedule(&test_app.address, &admin_token).await;
    assert_eq!(test_app.store.matches.len().await, 2);

    let response = client
        .delete(format!("{}/admin/matches", &test_app.address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
    assert_eq!(test_app.store.matches.len().await, 0);
}

#[tokio::test]
async fn manual_match_creation_works() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin_token = admin_login(&test_app.address).await;

    let response = client
        .post(format!("{}/admin/matches", &test_app.address))
        .bearer_auth(&admin_token)
        .json(&json!({
            "home_team": "Garuda",
            "away_team": "Rajawali",
            "date": "2026-10-01",
            "time": "19:30:00",
            "matchday": 1,
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let matches = test_app.store.matches.list().await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].home_team, "Garuda");
    assert_eq!(
        matches[0].status,
        liga_backend::models::matches::MatchStatus::Scheduled
    );
}
