use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_email_contracts::EmailService;
use serde::Serialize;
use tracing::warn;

pub fn router(service: Arc<impl EmailService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl EmailService>>) -> Response {
    let email = match service.ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!("email provider is not reachable: {err:#}");
            false
        }
    };

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}
