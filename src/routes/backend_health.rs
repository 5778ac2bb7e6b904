use actix_web::{get, HttpResponse};

use crate::handlers::backend_health_handler::check_backend_health;

#[get("/backend_health")]
async fn backend_health() -> HttpResponse {
    check_backend_health().await
}
