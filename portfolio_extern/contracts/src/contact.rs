use std::future::Future;

use portfolio_models::contact::ContactForm;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post the contact form to the `/api/send-email` endpoint.
    ///
    /// Any response outside of the 2xx range is an error.
    fn send_contact_form(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactApiResponse, ContactApiError>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactApiResponse {
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactApiError {
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to reach the contact endpoint: {0:#}")]
    Network(anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_send_contact_form(
        mut self,
        form: ContactForm,
        result: Result<ContactApiResponse, ContactApiError>,
    ) -> Self {
        self.expect_send_contact_form()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
