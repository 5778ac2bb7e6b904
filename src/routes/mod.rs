use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod league;
pub mod registration;

use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // League routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::get_teams)
            .service(league::get_team)
            .service(league::get_matches)
            .service(league::get_standings)
            .service(league::submit_result)
            .service(league::get_my_results)
            .service(league::edit_pending_result)
            .service(league::get_evidence),
    );
    // Admin routes (require the admin role)
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(admin::generate_schedule)
            .service(admin::clear_matches)
            .service(admin::create_match)
            .service(admin::edit_match)
            .service(admin::get_pending_results)
            .service(admin::approve_result)
            .service(admin::reject_result)
            .service(admin::get_users)
            .service(admin::create_user)
            .service(admin::update_user)
            .service(admin::delete_user)
            .service(admin::rename_team)
            .service(admin::get_settings)
            .service(admin::update_settings)
            .service(admin::update_token),
    );
}
