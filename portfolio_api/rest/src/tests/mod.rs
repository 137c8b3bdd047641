use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use portfolio_core_contact_contracts::MockContactService;
use portfolio_email_contracts::MockEmailService;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use crate::{middlewares::cors::cors_headers, RestServer, RestServerConfig};


fn make_router(email: MockEmailService, contact: MockContactService) -> Router {
    RestServer {
        email,
        contact,
        config: RestServerConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
        },
    }
    .router()
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn assert_cors_headers(&self) {
        for (name, value) in cors_headers() {
            assert_eq!(self.headers.get(&name), Some(&value), "{name}");
        }
    }
}

async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_default())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    TestResponse {
        status: response.status(),
        headers: response.headers().clone(),
        body: response.into_body().collect().await.unwrap().to_bytes(),
    }
}
