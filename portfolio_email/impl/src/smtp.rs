use std::sync::Arc;

use anyhow::{anyhow, Context};
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{ContentType, DeliveryReceipt, Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use portfolio_utils::Apply;

#[derive(Debug, Clone)]
pub struct SmtpEmailServiceImpl {
    from: Arc<EmailAddressWithName>,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .build();

        Ok(Self {
            from: from.into(),
            transport,
        })
    }
}

impl EmailService for SmtpEmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<DeliveryReceipt> {
        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.as_str().parse::<Mailbox>()?)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            return Err(anyhow!(
                "SMTP server rejected the email: {}",
                response.message().collect::<Vec<_>>().join(" ")
            ));
        }

        Ok(DeliveryReceipt {
            id: response.first_line().map(ToOwned::to_owned),
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
