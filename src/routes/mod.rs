use axum::{
    Router,
    routing::{get, post},
};

use crate::email::EmailService;

pub mod contact;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub email: EmailService,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/contact", post(contact::submit))
        .with_state(app_state)
}
