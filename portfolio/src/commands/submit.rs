use anyhow::{bail, Context};
use clap::Args;
use portfolio_client::{ContactPageController, SubmitOutcome};
use portfolio_config::Config;
use portfolio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use portfolio_models::{
    contact::{ContactField, SubjectPolicy},
    language::Language,
};

/// Contact form as entered on the contact page
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Base url of the contact backend
    #[arg(long, env = "PORTFOLIO_API_BASE", default_value = "http://127.0.0.1:8787")]
    api_base: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long)]
    message: String,
    /// Language of the acknowledgement email
    #[arg(long, default_value = "ja")]
    lang: Language,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let contact_api = ContactApiServiceImpl::new(
            ContactApiServiceConfig::new(&self.api_base).context("Invalid api base")?,
        );
        let subject_policy = if config.contact.require_subject {
            SubjectPolicy::Required
        } else {
            SubjectPolicy::Optional
        };

        let mut page = ContactPageController::new(contact_api, subject_policy, self.lang);
        for (field, value) in [
            (ContactField::LastName, self.last_name),
            (ContactField::FirstName, self.first_name),
            (ContactField::Email, self.email),
            (ContactField::Subject, self.subject),
            (ContactField::Message, self.message),
        ] {
            page.set_field(field, value);
        }

        match page.submit().await {
            SubmitOutcome::Sent { id: Some(id) } => println!("Message sent ({id})"),
            SubmitOutcome::Sent { id: None } => println!("Message sent"),
            SubmitOutcome::Invalid => {
                for (field, message) in page.visible_errors() {
                    eprintln!("{}: {message}", field.name());
                }
                bail!("Invalid contact form");
            }
            SubmitOutcome::Failed => bail!(
                "Failed to send message: {}",
                page.last_error().unwrap_or("unknown error")
            ),
            SubmitOutcome::Ignored => bail!("Contact form was not submitted"),
        }

        Ok(())
    }
}
