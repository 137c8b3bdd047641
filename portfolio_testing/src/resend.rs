use std::{
    collections::{HashMap, VecDeque},
    net::IpAddr,
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const API_KEY: &str = "re_test_key";

/// Recipients with this local part are rejected with `422`.
pub const REJECTED_LOCAL_PART: &str = "reject";

/// Oldest emails are evicted once this many are stored.
pub const MAX_STORED_EMAILS: usize = 1000;

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend API endpoint: http://{host}:{port}/");
    info!("API key: {api_key:?}");
    info!("Emails sent to \"{REJECTED_LOCAL_PART}@...\" are rejected by the provider");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(api_key))
        .await
        .context("Failed to start HTTP server")
}

/// Spawn the server on a random local port and return its base url.
pub async fn spawn(api_key: &str) -> anyhow::Result<Url> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;

    let router = router(api_key);
    tokio::spawn(async move { axum::serve(listener, router).await });

    format!("http://{addr}/").parse().map_err(Into::into)
}

pub fn router(api_key: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route("/emails", routing::post(send_email))
        .route("/emails/:id", routing::get(get_email))
        .with_state(Arc::new(StateInner {
            api_key: api_key.into(),
            emails: Default::default(),
        }))
}

type AppState = State<Arc<StateInner>>;
struct StateInner {
    api_key: Arc<str>,
    emails: RwLock<StoredEmails>,
}

#[derive(Debug, Default)]
struct StoredEmails {
    by_id: HashMap<String, StoredEmail>,
    order: VecDeque<String>,
}

impl StoredEmails {
    fn insert(&mut self, email: StoredEmail) {
        if self.order.len() >= MAX_STORED_EMAILS {
            if let Some(oldest) = self.order.pop_front() {
                self.by_id.remove(&oldest);
            }
        }
        self.order.push_back(email.id.clone());
        self.by_id.insert(email.id.clone(), email);
    }

    fn get(&self, id: &str) -> Option<&StoredEmail> {
        self.by_id.get(id)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct StoredEmail {
    id: String,
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    message: String,
    name: &'static str,
}

fn error(status: StatusCode, name: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            message: message.into(),
            name,
        }),
    )
        .into_response()
}

fn authorize(state: &StateInner, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "));
    match token {
        None => Err(error(
            StatusCode::UNAUTHORIZED,
            "missing_api_key",
            "Missing API key in the authorization header",
        )),
        Some(token) if token != &*state.api_key => Err(error(
            StatusCode::FORBIDDEN,
            "validation_error",
            "API key is invalid",
        )),
        Some(_) => Ok(()),
    }
}

async fn send_email(
    state: AppState,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    if request.to.is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `to` field",
        );
    }

    if let Some(rejected) = request
        .to
        .iter()
        .find(|to| to.split('@').next() == Some(REJECTED_LOCAL_PART))
    {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            format!("Recipient {rejected} was rejected"),
        );
    }

    let id = Uuid::new_v4().to_string();
    info!(%id, to = ?request.to, subject = %request.subject, "Accepted email");

    let SendEmailRequest {
        from,
        to,
        subject,
        html,
        text,
        reply_to,
    } = request;
    state.emails.write().await.insert(StoredEmail {
        id: id.clone(),
        from,
        to,
        subject,
        html,
        text,
        reply_to,
    });

    Json(SendEmailResponse { id }).into_response()
}

async fn get_email(state: AppState, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.emails.read().await.get(&id) {
        Some(email) => Json(email.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "not_found", "Email not found"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    async fn post(router: Router, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = Request::post("/emails").header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = router
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn email(to: &str) -> Value {
        json!({
            "from": "AI Chat Portfolio <onboarding@resend.dev>",
            "to": [to],
            "subject": "Hi",
            "html": "<p>Hi</p>",
        })
    }

    #[tokio::test]
    async fn accepted() {
        let (status, body) = post(router(API_KEY), Some(API_KEY), email("a@example.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn missing_api_key() {
        let (status, body) = post(router(API_KEY), None, email("a@example.com")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["name"], "missing_api_key");
        assert_eq!(body["statusCode"], 401);
    }

    #[tokio::test]
    async fn invalid_api_key() {
        let (status, body) = post(router(API_KEY), Some("wrong"), email("a@example.com")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "API key is invalid");
    }

    #[tokio::test]
    async fn rejected_recipient() {
        let (status, body) = post(router(API_KEY), Some(API_KEY), email("reject@example.com")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Recipient reject@example.com was rejected");
    }

    #[test]
    fn oldest_emails_are_evicted() {
        // Arrange
        let mut emails = StoredEmails::default();
        let stored = |id: usize| StoredEmail {
            id: id.to_string(),
            from: "AI Chat Portfolio <onboarding@resend.dev>".into(),
            to: vec!["a@example.com".into()],
            subject: "Hi".into(),
            html: None,
            text: Some("Hi".into()),
            reply_to: None,
        };

        // Act
        for id in 0..=MAX_STORED_EMAILS {
            emails.insert(stored(id));
        }

        // Assert
        assert!(emails.get("0").is_none());
        assert!(emails.get("1").is_some());
        assert!(emails.get(&MAX_STORED_EMAILS.to_string()).is_some());
        assert_eq!(emails.by_id.len(), MAX_STORED_EMAILS);
        assert_eq!(emails.order.len(), MAX_STORED_EMAILS);
    }
}
