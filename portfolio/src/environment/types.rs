use portfolio_core_contact_impl::ContactServiceImpl;
use portfolio_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use portfolio_extern_impl::resend::ResendApiServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = portfolio_api_rest::RestServer<Email, Contact>;

// Email
pub type Email = EmailServiceImpl<ResendApi>;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Extern
pub type ResendApi = ResendApiServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Core
pub type Contact = ContactServiceImpl<TemplateEmail>;
