use std::future::Future;

use portfolio_models::email_address::{EmailAddress, EmailAddressWithName};
use portfolio_templates_contracts::ContactAcknowledgementTemplate;

use crate::DeliveryReceipt;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Render the acknowledgement for a contact submission and send it to
    /// `recipient`.
    fn send_contact_acknowledgement_email(
        &self,
        recipient: EmailAddress,
        reply_to: Option<EmailAddressWithName>,
        data: &ContactAcknowledgementTemplate,
    ) -> impl Future<Output = anyhow::Result<DeliveryReceipt>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_contact_acknowledgement_email(
        mut self,
        recipient: EmailAddress,
        reply_to: Option<EmailAddressWithName>,
        data: ContactAcknowledgementTemplate,
        result: Result<DeliveryReceipt, &'static str>,
    ) -> Self {
        self.expect_send_contact_acknowledgement_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| {
                Box::pin(std::future::ready(result.map_err(|err| anyhow::anyhow!(err))))
            });
        self
    }
}
