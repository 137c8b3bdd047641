use std::future::Future;

use portfolio_models::contact::{ContactForm, FieldErrors};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate the contact form, render the acknowledgement email and send it
    /// to the author of the message.
    fn send_message(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactReceipt, ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Message id assigned by the email provider.
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Invalid(FieldErrors),
    #[error("Failed to send email")]
    Send(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        form: ContactForm,
        result: Result<ContactReceipt, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
