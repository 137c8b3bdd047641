use std::sync::Arc;

use anyhow::{anyhow, Context};
use portfolio_di::Build;
use portfolio_extern_contracts::resend::{
    ResendApiError, ResendApiService, ResendSendEmailRequest, ResendSendEmailResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::http::HttpClient;

pub const RESEND_API_ENDPOINT: &str = "https://api.resend.com/";

#[derive(Debug, Clone, Build)]
pub struct ResendApiServiceImpl {
    config: ResendApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendApiServiceConfig {
    endpoint: Arc<Url>,
    api_key: Arc<str>,
}

impl ResendApiServiceImpl {
    pub fn new(config: ResendApiServiceConfig) -> Self {
        Self {
            config,
            client: Default::default(),
        }
    }
}

impl ResendApiServiceConfig {
    pub fn new(mut endpoint: Url, api_key: impl Into<Arc<str>>) -> Self {
        // `Url::join` replaces the last path segment unless the path ends in a slash.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ResendApiService for ResendApiServiceImpl {
    async fn send_email(
        &self,
        request: ResendSendEmailRequest,
    ) -> Result<ResendSendEmailResponse, ResendApiError> {
        let url = self
            .config
            .endpoint
            .join("emails")
            .context("Invalid Resend endpoint")?;
        trace!(%url, to = ?request.to, "send email via resend");

        let response = self
            .client
            .post(url)
            .bearer_auth(&*self.config.api_key)
            .json(&SendEmailRequest::from(&request))
            .send()
            .await
            .context("Failed to reach the Resend API")?;

        let status = response.status();
        if status.is_success() {
            let SendEmailResponse { id } = response
                .json()
                .await
                .context("Failed to parse the Resend API response")?;
            return Ok(ResendSendEmailResponse { id });
        }

        let body = response
            .text()
            .await
            .context("Failed to read the Resend API response")?;
        debug!(%status, body = %body, "resend rejected the email");

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse { message, name, .. }) => Err(ResendApiError::Rejected {
                status: status.as_u16(),
                name,
                message,
            }),
            Err(_) => Err(anyhow!("Resend API responded with {status}: {body}").into()),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.client
            .get((*self.config.endpoint).clone())
            .send()
            .await
            .map(|_| ())
            .context("Failed to reach the Resend API")
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> From<&'a ResendSendEmailRequest> for SendEmailRequest<'a> {
    fn from(value: &'a ResendSendEmailRequest) -> Self {
        Self {
            from: &value.from,
            to: &value.to,
            subject: &value.subject,
            html: value.html.as_deref(),
            text: value.text.as_deref(),
            reply_to: value.reply_to.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    message: String,
    #[serde(default)]
    name: String,
}
