use actix_web::{post, web, HttpResponse};

use crate::handlers::registration_handler::register_user;
use crate::models::user::RegistrationRequest;
use crate::store::JsonStore;

#[post("/register_user")]
async fn register(
    user_form: web::Json<RegistrationRequest>,
    store: web::Data<JsonStore>,
) -> HttpResponse {
    register_user(user_form, store).await
}
