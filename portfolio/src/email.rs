use anyhow::Context;
use portfolio_config::{EmailConfig, EmailProvider, RESEND_API_KEY_ENV};
use portfolio_email_impl::{EmailServiceImpl, ResendEmailServiceImpl, SmtpEmailServiceImpl};
use portfolio_extern_impl::resend::{ResendApiServiceConfig, ResendApiServiceImpl};

use crate::environment::types::Email;

/// Set up the configured email backend
pub fn connect(config: &EmailConfig) -> anyhow::Result<Email> {
    match config.provider {
        EmailProvider::Resend => {
            let api_key = config.resend.api_key.as_ref().with_context(|| {
                format!("Resend is selected as email provider but {RESEND_API_KEY_ENV} is not set")
            })?;

            let resend_api = ResendApiServiceImpl::new(ResendApiServiceConfig::new(
                config.resend.endpoint.clone(),
                api_key.expose(),
            ));

            Ok(EmailServiceImpl::Resend(ResendEmailServiceImpl::new(
                config.from.clone(),
                resend_api,
            )))
        }
        EmailProvider::Smtp => {
            let smtp_url = config
                .smtp_url
                .as_ref()
                .context("SMTP is selected as email provider but email.smtp_url is not set")?;

            SmtpEmailServiceImpl::new(smtp_url.expose(), config.from.clone())
                .map(EmailServiceImpl::Smtp)
                .context("Failed to connect to SMTP server")
        }
    }
}
