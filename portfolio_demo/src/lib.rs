use std::sync::LazyLock;

use portfolio_models::{
    contact::{ContactAuthor, ContactForm, ContactSubmission},
    email_address::EmailAddressWithName,
    language::Language,
};

pub const RECEIPT_ID: &str = "msg_123";

pub const YAMADA_MESSAGE: &str = "Hello\nWorld";

pub static YAMADA_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    last_name: "山田".into(),
    first_name: "太郎".into(),
    email: "yamada@example.com".into(),
    subject: "ポートフォリオについて".into(),
    message: YAMADA_MESSAGE.into(),
    language: Language::Ja,
});

pub static YAMADA_SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    author: ContactAuthor {
        last_name: "山田".try_into().unwrap(),
        first_name: "太郎".try_into().unwrap(),
        email: "yamada@example.com".try_into().unwrap(),
    },
    subject: Some("ポートフォリオについて".try_into().unwrap()),
    message: YAMADA_MESSAGE.try_into().unwrap(),
    language: Language::Ja,
});

pub static SENDER: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "AI Chat Portfolio <onboarding@resend.dev>".parse().unwrap());
