use std::net::TcpListener;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use liga_backend::config::settings::{get_config, get_jwt_settings, get_league_options};
use liga_backend::models::user::{User, UserRole};
use liga_backend::run;
use liga_backend::services::evidence::EvidenceStore;
use liga_backend::store::JsonStore;
use liga_backend::telemetry::{get_subscriber, init_subscriber};
use liga_backend::utils::password::hash_password;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "liga-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);
    let league_options = get_league_options(&config);

    let store = JsonStore::load(&config.storage.data_dir)
        .await
        .expect("Failed to open the data directory");
    let store = Arc::new(store);

    // First run: seed the bootstrap admin account.
    if store.users.len().await == 0 {
        let password_hash =
            hash_password("admin123").expect("Failed to hash the bootstrap password");
        let admin = User {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash,
            role: UserRole::Admin,
            team_name: None,
            created_at: Utc::now(),
        };
        store
            .users
            .insert(admin)
            .await
            .expect("Failed to seed the bootstrap admin");
        tracing::info!("seeded bootstrap admin account; change its password");
    }

    let evidence = EvidenceStore::new(config.storage.data_dir.join("evidence"))
        .await
        .expect("Failed to open the evidence directory");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("listening on {}", address);

    run(listener, store, jwt_settings, evidence, league_options)?.await
}
