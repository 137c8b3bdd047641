use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use portfolio_core_contact_contracts::ContactService;
use portfolio_di::Build;
use portfolio_email_contracts::EmailService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

pub use routes::contact::SEND_EMAIL_ROUTE;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Email, Contact> {
    email: Email,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl<Email, Contact> RestServer<Email, Contact>
where
    Email: EmailService,
    Contact: ContactService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let RestServerConfig { host, port } = self.config;

        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on http://{}{SEND_EMAIL_ROUTE}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.email.into()))
            .merge(routes::contact::router(self.contact.into()));

        // Layers added last run first.
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::cors::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
