use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ResendApiService: Send + Sync + 'static {
    /// Send an email through the Resend API.
    fn send_email(
        &self,
        request: ResendSendEmailRequest,
    ) -> impl Future<Output = Result<ResendSendEmailResponse, ResendApiError>> + Send;

    /// Check whether the Resend API can be reached at all.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendSendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendSendEmailResponse {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum ResendApiError {
    /// The API answered with an error object.
    #[error("{message}")]
    Rejected {
        status: u16,
        name: String,
        message: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockResendApiService {
    pub fn with_send_email(
        mut self,
        request: ResendSendEmailRequest,
        result: Result<ResendSendEmailResponse, ResendApiError>,
    ) -> Self {
        self.expect_send_email()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
