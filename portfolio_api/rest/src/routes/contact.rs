use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactReceipt, ContactSendMessageError, ContactService};
use tracing::{debug, error};

use crate::{
    errors::{error, failed_to_send_email, METHOD_NOT_ALLOWED, MISSING_REQUIRED_FIELDS},
    models::contact::{ApiContactRequest, ApiSendEmailResponse},
};

pub const SEND_EMAIL_ROUTE: &str = "/api/send-email";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            SEND_EMAIL_ROUTE,
            routing::post(send_email)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

async fn send_email(
    service: State<Arc<impl ContactService>>,
    request: Result<Json<ApiContactRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(%rejection, "rejecting unparseable contact request");
            return error(StatusCode::BAD_REQUEST, MISSING_REQUIRED_FIELDS);
        }
    };

    match service.send_message(request.into()).await {
        Ok(ContactReceipt { id }) => Json(ApiSendEmailResponse { ok: true, id }).into_response(),
        Err(ContactSendMessageError::Invalid(errors)) => {
            debug!(%errors, "rejecting invalid contact request");
            error(StatusCode::BAD_REQUEST, MISSING_REQUIRED_FIELDS)
        }
        Err(ContactSendMessageError::Send(err)) => {
            error!("Email send error: {err:#}");
            failed_to_send_email(format!("{err:#}"))
        }
    }
}
