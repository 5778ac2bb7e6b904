use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use liga_backend::config::jwt::JwtSettings;
use liga_backend::league::league::LeagueOptions;
use liga_backend::models::settings::LeagueSettings;
use liga_backend::models::user::{User, UserRole};
use liga_backend::run;
use liga_backend::services::evidence::EvidenceStore;
use liga_backend::store::JsonStore;
use liga_backend::telemetry::{get_subscriber, init_subscriber};
use liga_backend::utils::password::hash_password;

pub const ADMIN_PASSWORD: &str = "admin-pw-123";
pub const REGISTRATION_TOKEN: &str = "test-token-123";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<JsonStore>,
    pub data_dir: PathBuf,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let data_dir = std::env::temp_dir().join(format!("liga-test-{}", Uuid::new_v4()));
    let store = Arc::new(
        JsonStore::load(&data_dir)
            .await
            .expect("Failed to open the test data directory"),
    );

    // Known admin account and registration token for the tests.
    let admin = User {
        id: Uuid::new_v4(),
        username: "admin".to_string(),
        password_hash: hash_password(ADMIN_PASSWORD).expect("Failed to hash password"),
        role: UserRole::Admin,
        team_name: None,
        created_at: Utc::now(),
    };
    store
        .users
        .insert(admin)
        .await
        .expect("Failed to seed admin user");
    store
        .put_settings(LeagueSettings {
            registration_token: REGISTRATION_TOKEN.to_string(),
            allow_registration: true,
        })
        .await
        .expect("Failed to seed settings");

    let evidence = EvidenceStore::new(data_dir.join("evidence"))
        .await
        .expect("Failed to open the evidence directory");
    let jwt_settings = JwtSettings::new("test-secret".to_string(), 24);

    let server = run(
        listener,
        store.clone(),
        jwt_settings,
        evidence,
        LeagueOptions::default(),
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        data_dir,
    }
}

pub async fn login(app_address: &str, username: &str, password: &str) -> String {
    let client = Client::new();
    let response = client
        .post(format!("{}/login", app_address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert!(response.status().is_success(), "login failed for {}", username);
    let body: serde_json::Value = response.json().await.expect("Login response was not JSON");
    body["token"].as_str().expect("No token in response").to_string()
}

pub async fn admin_login(app_address: &str) -> String {
    login(app_address, "admin", ADMIN_PASSWORD).await
}

/// Register a fresh user (with their team) and log them in.
/// Returns (username, team_name, token).
pub async fn register_and_login(app_address: &str) -> (String, String, String) {
    let client = Client::new();
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user{}", &suffix[..8]);
    let team_name = format!("team{}", &suffix[..8]);
    let password = "password123";

    let response = client
        .post(format!("{}/register_user", app_address))
        .json(&json!({
            "username": username,
            "password": password,
            "team_name": team_name,
            "registration_token": REGISTRATION_TOKEN,
        }))
        .send()
        .await
        .expect("Failed to register user.");
    assert!(response.status().is_success(), "registration failed");

    let token = login(app_address, &username, password).await;
    (username, team_name, token)
}

/// Have the admin generate a schedule over the current roster.
pub async fn generate_schedule(app_address: &str, admin_token: &str) -> serde_json::Value {
    let client = Client::new();
    let response = client
        .post(format!("{}/admin/schedule/generate", app_address))
        .bearer_auth(admin_token)
        .json(&json!({
            "start_date": "2026-09-01",
            "matches_per_matchday": 2,
            "matchday_interval_days": 3,
            "kickoff": "20:00:00",
        }))
        .send()
        .await
        .expect("Failed to generate schedule.");
    assert!(response.status().is_success(), "schedule generation failed");
    response.json().await.expect("Schedule response was not JSON")
}
