use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{http, web, App, HttpServer};
use actix_cors::Cors;
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod errors;
mod handlers;
pub mod league;
pub mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod store;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::league::league::{LeagueOptions, LeagueService};
use crate::routes::init_routes;
use crate::services::evidence::EvidenceStore;
use crate::store::JsonStore;

// Inline screenshots arrive as base64 data URLs inside the JSON body.
const JSON_PAYLOAD_LIMIT: usize = 80 * 1024 * 1024;

pub fn run(
    listener: TcpListener,
    store: Arc<JsonStore>,
    jwt_settings: JwtSettings,
    evidence: EvidenceStore,
    league_options: LeagueOptions,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let store_data = web::Data::from(store.clone());
    let jwt_settings = web::Data::new(jwt_settings);
    let evidence_data = web::Data::new(evidence);
    let league_service = web::Data::new(LeagueService::new(store, league_options));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
            // Get a pointer copy and attach it to the application state
            .app_data(store_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(evidence_data.clone())
            .app_data(league_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
