use portfolio_models::{contact::ContactSubmission, language::Language};
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// A template is registered under a name ending in `.html`, which enables
/// autoescaping of every interpolated value.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE_NAME: &str = "base.html";
pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactAcknowledgementTemplate("contact_acknowledgement.html"),
}

/// Acknowledgement sent back to the person who submitted the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAcknowledgementTemplate {
    pub lang: Language,
    pub labels: AcknowledgementLabels,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl From<&ContactSubmission> for ContactAcknowledgementTemplate {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            lang: submission.language,
            labels: AcknowledgementLabels::for_language(submission.language),
            last_name: submission.author.last_name.to_string(),
            first_name: submission.author.first_name.to_string(),
            email: submission.author.email.to_string(),
            subject: submission.subject.as_ref().map(ToString::to_string),
            message: submission.message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcknowledgementLabels {
    pub heading: &'static str,
    pub instructions: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub subject: &'static str,
    pub message: &'static str,
    pub disclaimer: &'static str,
}

impl AcknowledgementLabels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Ja => Self {
                heading: "お問い合わせありがとうございます",
                instructions: "以下の内容で受け付けました。ご確認ください。",
                name: "お名前",
                email: "メールアドレス",
                subject: "件名",
                message: "お問い合わせ内容",
                disclaimer: "本メールに心当たりがない場合は、このメールを破棄してください。",
            },
            Language::En => Self {
                heading: "Thank you for your inquiry",
                instructions: "We have received the following message. Please review it.",
                name: "Name",
                email: "Email",
                subject: "Subject",
                message: "Message",
                disclaimer: "If you did not send this message, please discard this email.",
            },
        }
    }
}
