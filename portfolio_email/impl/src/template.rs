use portfolio_di::Build;
use portfolio_email_contracts::{
    template::TemplateEmailService, ContentType, DeliveryReceipt, Email, EmailService,
};
use portfolio_models::email_address::{EmailAddress, EmailAddressWithName};
use portfolio_templates_contracts::{ContactAcknowledgementTemplate, Template, TemplateService};

#[derive(Debug, Clone, Build)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_contact_acknowledgement_email(
        &self,
        recipient: EmailAddress,
        reply_to: Option<EmailAddressWithName>,
        data: &ContactAcknowledgementTemplate,
    ) -> anyhow::Result<DeliveryReceipt> {
        self.send_email(
            recipient,
            reply_to,
            data,
            data.lang.acknowledgement_subject(),
        )
        .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddress,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<DeliveryReceipt> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}
