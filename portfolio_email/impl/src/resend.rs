use std::sync::Arc;

use portfolio_email_contracts::{ContentType, DeliveryReceipt, Email, EmailService};
use portfolio_extern_contracts::resend::{
    ResendApiService, ResendSendEmailRequest, ResendSendEmailResponse,
};
use portfolio_models::email_address::EmailAddressWithName;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ResendEmailServiceImpl<ResendApi> {
    from: Arc<EmailAddressWithName>,
    resend_api: ResendApi,
}

impl<ResendApi> ResendEmailServiceImpl<ResendApi> {
    pub fn new(from: EmailAddressWithName, resend_api: ResendApi) -> Self {
        Self {
            from: from.into(),
            resend_api,
        }
    }
}

impl<ResendApi: ResendApiService> EmailService for ResendEmailServiceImpl<ResendApi> {
    async fn send(&self, email: Email) -> anyhow::Result<DeliveryReceipt> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body), None),
            ContentType::Text => (None, Some(email.body)),
        };

        let ResendSendEmailResponse { id } = self
            .resend_api
            .send_email(ResendSendEmailRequest {
                from: self.from.to_string(),
                to: vec![email.recipient.into_inner()],
                subject: email.subject,
                html,
                text,
                reply_to: email.reply_to.as_ref().map(ToString::to_string),
            })
            .await?;

        debug!(%id, "email accepted by resend");

        Ok(DeliveryReceipt { id: Some(id) })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.resend_api.ping().await
    }
}
