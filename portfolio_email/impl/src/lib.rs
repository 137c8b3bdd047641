use portfolio_email_contracts::{DeliveryReceipt, Email, EmailService};
use portfolio_extern_contracts::resend::ResendApiService;

pub use self::{resend::ResendEmailServiceImpl, smtp::SmtpEmailServiceImpl};

mod resend;
mod smtp;
pub mod template;

/// Email backend selected at startup.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl<ResendApi> {
    Resend(ResendEmailServiceImpl<ResendApi>),
    Smtp(SmtpEmailServiceImpl),
}

impl<ResendApi> EmailService for EmailServiceImpl<ResendApi>
where
    ResendApi: ResendApiService,
{
    async fn send(&self, email: Email) -> anyhow::Result<DeliveryReceipt> {
        match self {
            Self::Resend(service) => service.send(email).await,
            Self::Smtp(service) => service.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Resend(service) => service.ping().await,
            Self::Smtp(service) => service.ping().await,
        }
    }
}
