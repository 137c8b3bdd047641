use std::sync::Arc;

use anyhow::Context;
use portfolio_di::Build;
use portfolio_extern_contracts::contact::{ContactApiError, ContactApiResponse, ContactApiService};
use portfolio_models::{contact::ContactForm, language::Language};
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    send_email_url: Arc<Url>,
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> Self {
        Self {
            config,
            client: Default::default(),
        }
    }
}

impl ContactApiServiceConfig {
    pub fn new(api_base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            send_email_url: send_email_url(api_base).parse::<Url>()?.into(),
        })
    }

    pub fn send_email_url(&self) -> &Url {
        &self.send_email_url
    }
}

/// Join the api base and the endpoint path without doubling the slash in
/// between.
pub fn send_email_url(api_base: &str) -> String {
    format!("{}{SEND_EMAIL_PATH}", api_base.trim_end_matches('/'))
}

impl ContactApiService for ContactApiServiceImpl {
    async fn send_contact_form(
        &self,
        form: ContactForm,
    ) -> Result<ContactApiResponse, ContactApiError> {
        let url = (*self.config.send_email_url).clone();
        trace!(%url, "post contact form");

        let response = self
            .client
            .post(url)
            .json(&SendEmailRequest::from(&form))
            .send()
            .await
            .context("Failed to send request")
            .map_err(ContactApiError::Network)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response")
            .map_err(ContactApiError::Network)?;

        if !status.is_success() {
            return Err(ContactApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let id = serde_json::from_str::<SendEmailResponse>(&body)
            .ok()
            .and_then(|response| response.id);

        Ok(ContactApiResponse { id })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    last_name: &'a str,
    first_name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    lang: Language,
}

impl<'a> From<&'a ContactForm> for SendEmailRequest<'a> {
    fn from(form: &'a ContactForm) -> Self {
        Self {
            last_name: &form.last_name,
            first_name: &form.first_name,
            email: &form.email,
            subject: &form.subject,
            message: &form.message,
            lang: form.language,
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_duplicate_slashes() {
        for (base, expected) in [
            ("http://localhost:8787", "http://localhost:8787/api/send-email"),
            ("http://localhost:8787/", "http://localhost:8787/api/send-email"),
            ("https://example.com//", "https://example.com/api/send-email"),
            ("https://example.com/portfolio/", "https://example.com/portfolio/api/send-email"),
            ("", "/api/send-email"),
        ] {
            assert_eq!(send_email_url(base), expected);
        }
    }

    #[test]
    fn request_uses_camel_case_keys() {
        let form = ContactForm {
            last_name: "山田".into(),
            first_name: "太郎".into(),
            email: "yamada@example.com".into(),
            subject: "件名".into(),
            message: "Hello\nWorld".into(),
            language: Language::En,
        };

        let json = serde_json::to_value(SendEmailRequest::from(&form)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "lastName": "山田",
                "firstName": "太郎",
                "email": "yamada@example.com",
                "subject": "件名",
                "message": "Hello\nWorld",
                "lang": "en",
            })
        );
    }
}
