use std::sync::Arc;

use portfolio_core_contact_contracts::{ContactReceipt, ContactSendMessageError, ContactService};
use portfolio_di::Build;
use portfolio_email_contracts::template::TemplateEmailService;
use portfolio_models::{
    contact::{ContactForm, SubjectPolicy},
    email_address::EmailAddressWithName,
};
use portfolio_templates_contracts::ContactAcknowledgementTemplate;
use tracing::{debug, info};

#[derive(Debug, Clone, Build)]
pub struct ContactServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ContactServiceConfig {
    pub subject_policy: SubjectPolicy,
    pub reply_to: Option<Arc<EmailAddressWithName>>,
}

impl<TemplateEmail> ContactService for ContactServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    async fn send_message(
        &self,
        form: ContactForm,
    ) -> Result<ContactReceipt, ContactSendMessageError> {
        let submission = form.validate(self.config.subject_policy).map_err(|errors| {
            debug!(%errors, "rejecting contact form");
            ContactSendMessageError::Invalid(errors)
        })?;

        let receipt = self
            .template_email
            .send_contact_acknowledgement_email(
                submission.author.email.clone(),
                self.config.reply_to.as_deref().cloned(),
                &ContactAcknowledgementTemplate::from(&submission),
            )
            .await?;

        info!(id = ?receipt.id, language = %submission.language, "sent contact acknowledgement");

        Ok(ContactReceipt { id: receipt.id })
    }
}

#[cfg(test)]
mod tests {
    use portfolio_demo::{RECEIPT_ID, YAMADA_FORM, YAMADA_SUBMISSION};
    use portfolio_email_contracts::{template::MockTemplateEmailService, DeliveryReceipt};
    use portfolio_models::contact::{ContactField, FieldError};
    use portfolio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = ContactServiceConfig {
            subject_policy: SubjectPolicy::Required,
            reply_to: Some(Arc::new("Owner <owner@example.com>".parse().unwrap())),
        };

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_acknowledgement_email(
                YAMADA_SUBMISSION.author.email.clone(),
                Some("Owner <owner@example.com>".parse().unwrap()),
                ContactAcknowledgementTemplate::from(&*YAMADA_SUBMISSION),
                Ok(DeliveryReceipt {
                    id: Some(RECEIPT_ID.into()),
                }),
            );

        let sut = ContactServiceImpl {
            template_email,
            config,
        };

        // Act
        let result = sut.send_message(YAMADA_FORM.clone()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactReceipt {
                id: Some(RECEIPT_ID.into())
            }
        );
    }

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        // Arrange
        let sut = ContactServiceImpl {
            template_email: MockTemplateEmailService::new(),
            config: ContactServiceConfig::default(),
        };

        let form = ContactForm {
            first_name: "  ".into(),
            email: "not-an-email".into(),
            ..YAMADA_FORM.clone()
        };

        // Act
        let result = sut.send_message(form).await;

        // Assert
        let errors = match result {
            Err(ContactSendMessageError::Invalid(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(ContactField::FirstName), Some(FieldError::Required));
        assert_eq!(errors.get(ContactField::Email), Some(FieldError::InvalidFormat));
    }

    #[tokio::test]
    async fn optional_subject() {
        // Arrange
        let config = ContactServiceConfig {
            subject_policy: SubjectPolicy::Optional,
            reply_to: None,
        };

        let mut submission = YAMADA_SUBMISSION.clone();
        submission.subject = None;

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_acknowledgement_email(
                submission.author.email.clone(),
                None,
                ContactAcknowledgementTemplate::from(&submission),
                Ok(DeliveryReceipt::default()),
            );

        let sut = ContactServiceImpl {
            template_email,
            config,
        };

        let form = ContactForm {
            subject: String::new(),
            ..YAMADA_FORM.clone()
        };

        // Act
        let result = sut.send_message(form).await;

        // Assert
        assert_eq!(result.unwrap(), ContactReceipt { id: None });
    }

    #[tokio::test]
    async fn send_failure() {
        // Arrange
        let template_email = MockTemplateEmailService::new()
            .with_send_contact_acknowledgement_email(
                YAMADA_SUBMISSION.author.email.clone(),
                None,
                ContactAcknowledgementTemplate::from(&*YAMADA_SUBMISSION),
                Err("Invalid `from` field"),
            );

        let sut = ContactServiceImpl {
            template_email,
            config: ContactServiceConfig::default(),
        };

        // Act
        let result = sut.send_message(YAMADA_FORM.clone()).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Send(err)) if err.to_string() == "Invalid `from` field"
        );
    }
}
