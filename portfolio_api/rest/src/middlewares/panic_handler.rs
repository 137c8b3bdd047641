use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;
use tracing::error;

use crate::errors::failed_to_send_email;

pub const PANIC_DETAILS: &str = "request handler panicked";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            error!("{PANIC_DETAILS}");
            failed_to_send_email(PANIC_DETAILS)
        }
    }
}
