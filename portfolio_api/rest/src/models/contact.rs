use portfolio_models::{contact::ContactForm, language::Language};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/send-email`. Every field may be absent; presence is
/// checked by the form validation, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactRequest {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Language code, `ja` if absent or unknown.
    pub lang: Option<String>,
}

impl ApiContactRequest {
    pub fn language(&self) -> Language {
        self.lang
            .as_deref()
            .and_then(|lang| lang.parse().ok())
            .unwrap_or_default()
    }
}

impl From<ApiContactRequest> for ContactForm {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            language: value.language(),
            last_name: value.last_name.unwrap_or_default(),
            first_name: value.first_name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            subject: value.subject.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSendEmailResponse {
    pub ok: bool,
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiSendEmailError {
    pub error: &'static str,
    pub details: String,
}
