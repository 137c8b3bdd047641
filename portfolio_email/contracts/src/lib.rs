use std::future::Future;

use portfolio_models::email_address::{EmailAddress, EmailAddressWithName};

pub mod template;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver a single email. Failures are never retried.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<DeliveryReceipt>> + Send;

    /// Check whether the email provider is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddressWithName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// Result of a successful delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Message id assigned by the provider, if it returned one.
    pub id: Option<String>,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: DeliveryReceipt) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_failure(mut self, email: Email, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, reachable: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if reachable {
                Ok(())
            } else {
                Err(anyhow::anyhow!("email provider unreachable"))
            }))
        });
        self
    }
}
