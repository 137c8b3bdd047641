use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    email_address::EmailAddress,
    language::Language,
    macros::nutype_string,
};

pub const CONTACT_MESSAGE_MAX_LEN: usize = 2000;

nutype_string!(ContactName(sanitize(trim), validate(not_empty)));

nutype_string!(ContactSubject(sanitize(trim), validate(not_empty)));

nutype_string!(
    /// Message body. Stored verbatim, only whitespace-only input is rejected.
    ContactMessageContent(validate(
        predicate = |s| !s.trim().is_empty(),
        len_char_max = 2000
    ))
);

/// Raw contact form input as typed by the user. Nothing is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub language: Language,
}

/// A contact form that passed validation and may be rendered and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub author: ContactAuthor,
    pub subject: Option<ContactSubject>,
    pub message: ContactMessageContent,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub last_name: ContactName,
    pub first_name: ContactName,
    pub email: EmailAddress,
}

/// Whether the subject field is part of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectPolicy {
    /// An empty subject is reported as [`FieldError::Required`].
    #[default]
    Required,
    /// An empty subject is dropped from the submission.
    Optional,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    LastName,
    FirstName,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 5] = [
        Self::LastName,
        Self::FirstName,
        Self::Email,
        Self::Subject,
        Self::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LastName => "lastName",
            Self::FirstName => "firstName",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldError {
    Required,
    InvalidFormat,
    TooLong,
}

impl FieldError {
    /// User-facing message for this error on `field`.
    pub fn message(self, field: ContactField, language: Language) -> String {
        use ContactField as F;
        use FieldError as E;
        use Language as L;

        let text = match (language, self, field) {
            (L::Ja, E::Required, F::LastName) => "姓を入力してください",
            (L::Ja, E::Required, F::FirstName) => "名前を入力してください",
            (L::Ja, E::Required, F::Email) => "メールアドレスを入力してください",
            (L::Ja, E::Required, F::Subject) => "件名を入力してください",
            (L::Ja, E::Required, F::Message) => "メッセージを入力してください",
            (L::Ja, E::InvalidFormat, _) => "有効なメールアドレスを入力してください",
            (L::En, E::Required, F::LastName) => "Please enter your last name",
            (L::En, E::Required, F::FirstName) => "Please enter your first name",
            (L::En, E::Required, F::Email) => "Please enter your email address",
            (L::En, E::Required, F::Subject) => "Please enter a subject",
            (L::En, E::Required, F::Message) => "Please enter a message",
            (L::En, E::InvalidFormat, _) => "Please enter a valid email address",
            // only the message has a length limit
            (L::Ja, E::TooLong, _) => {
                return format!("{CONTACT_MESSAGE_MAX_LEN}文字以内で入力してください");
            }
            (L::En, E::TooLong, _) => {
                return format!("Please enter at most {CONTACT_MESSAGE_MAX_LEN} characters");
            }
        };

        text.into()
    }
}

/// All violations found in a form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, FieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }

    pub fn messages(&self, language: Language) -> BTreeMap<ContactField, String> {
        self.iter()
            .map(|(field, error)| (field, error.message(field, language)))
            .collect()
    }

    fn insert(&mut self, field: ContactField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl FromIterator<(ContactField, FieldError)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, FieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid contact form fields:")?;
        for (field, error) in self.iter() {
            write!(f, " {}={error:?}", field.name())?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::LastName => &self.last_name,
            ContactField::FirstName => &self.first_name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::LastName => self.last_name = value,
            ContactField::FirstName => self.first_name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Checks every field and either returns the validated submission or all
    /// field errors at once.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(self, subject_policy: SubjectPolicy) -> Result<ContactSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let last_name = check(&mut errors, ContactField::LastName, self.last_name, |v| {
            ContactName::try_new(v).map_err(|_| FieldError::Required)
        });
        let first_name = check(&mut errors, ContactField::FirstName, self.first_name, |v| {
            ContactName::try_new(v).map_err(|_| FieldError::Required)
        });
        let email = check(&mut errors, ContactField::Email, self.email, |v| {
            EmailAddress::try_new(v).map_err(|_| FieldError::InvalidFormat)
        });
        let subject = match subject_policy {
            SubjectPolicy::Optional if self.subject.trim().is_empty() => None,
            _ => check(&mut errors, ContactField::Subject, self.subject, |v| {
                ContactSubject::try_new(v).map_err(|_| FieldError::Required)
            }),
        };
        let message = check(&mut errors, ContactField::Message, self.message, |v| {
            ContactMessageContent::try_new(v).map_err(|err| match err {
                ContactMessageContentError::PredicateViolated => FieldError::Required,
                ContactMessageContentError::LenCharMaxViolated => FieldError::TooLong,
            })
        });

        match (last_name, first_name, email, message) {
            (Some(last_name), Some(first_name), Some(email), Some(message))
                if errors.is_empty() =>
            {
                Ok(ContactSubmission {
                    author: ContactAuthor {
                        last_name,
                        first_name,
                        email,
                    },
                    subject,
                    message,
                    language: self.language,
                })
            }
            _ => Err(errors),
        }
    }
}

fn check<T>(
    errors: &mut FieldErrors,
    field: ContactField,
    value: String,
    parse: impl FnOnce(String) -> Result<T, FieldError>,
) -> Option<T> {
    if value.trim().is_empty() {
        errors.insert(field, FieldError::Required);
        return None;
    }

    parse(value)
        .map_err(|error| errors.insert(field, error))
        .ok()
}

#[cfg(test)]
mod tests {
    use portfolio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            last_name: "山田".into(),
            first_name: "太郎".into(),
            email: "yamada@example.com".into(),
            subject: "Test".into(),
            message: "Hello\nWorld".into(),
            language: Language::Ja,
        }
    }

    #[test]
    fn ok() {
        let submission = valid_form().validate(SubjectPolicy::Required).unwrap();

        assert_eq!(*submission.author.last_name, "山田");
        assert_eq!(*submission.author.first_name, "太郎");
        assert_eq!(submission.author.email.as_str(), "yamada@example.com");
        assert_eq!(submission.subject.as_deref().map(String::as_str), Some("Test"));
        assert_eq!(*submission.message, "Hello\nWorld");
        assert_eq!(submission.language, Language::Ja);
    }

    #[test]
    fn reports_exactly_the_empty_fields() {
        for mask in 0u8..(1 << ContactField::ALL.len()) {
            let mut form = valid_form();
            let mut expected = Vec::new();
            for (i, field) in ContactField::ALL.into_iter().enumerate() {
                if mask & (1 << i) != 0 {
                    // alternate between empty and whitespace-only input
                    form.set(field, if i % 2 == 0 { "" } else { " \t\n" });
                    expected.push((field, FieldError::Required));
                }
            }

            let result = form.validate(SubjectPolicy::Required);

            if expected.is_empty() {
                result.unwrap();
            } else {
                let errors = result.unwrap_err();
                assert_eq!(errors.iter().collect::<Vec<_>>(), expected, "mask {mask:05b}");
            }
        }
    }

    #[test]
    fn invalid_email_format() {
        let mut form = valid_form();
        form.email = "yamada@example".into();

        let errors = form.validate(SubjectPolicy::Required).unwrap_err();

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [(ContactField::Email, FieldError::InvalidFormat)]
        );
    }

    #[test]
    fn email_check_is_independent_of_other_fields() {
        let form = ContactForm {
            email: "a@b.c".into(),
            ..Default::default()
        };

        let errors = form.validate(SubjectPolicy::Required).unwrap_err();

        assert_eq!(errors.get(ContactField::Email), None);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn message_length_limit() {
        let mut form = valid_form();
        form.message = "あ".repeat(CONTACT_MESSAGE_MAX_LEN);
        form.clone().validate(SubjectPolicy::Required).unwrap();

        form.message.push('a');
        let errors = form.validate(SubjectPolicy::Required).unwrap_err();
        assert_eq!(errors.get(ContactField::Message), Some(FieldError::TooLong));
    }

    #[test]
    fn long_names_and_subject_are_accepted() {
        let mut form = valid_form();
        form.last_name = "山".repeat(300);
        form.first_name = "a".repeat(5000);
        form.subject = "件".repeat(1000);

        let submission = form.validate(SubjectPolicy::Required).unwrap();

        assert_eq!(submission.author.last_name.chars().count(), 300);
        assert_eq!(submission.author.first_name.len(), 5000);
        assert_eq!(
            submission.subject.map(|s| s.chars().count()),
            Some(1000)
        );
    }

    #[test]
    fn padded_email_is_invalid() {
        for email in [" yamada@example.com", "yamada@example.com\n", "\tyamada@example.com "] {
            let mut form = valid_form();
            form.email = email.into();

            let errors = form.validate(SubjectPolicy::Required).unwrap_err();

            assert_eq!(
                errors.iter().collect::<Vec<_>>(),
                [(ContactField::Email, FieldError::InvalidFormat)],
                "{email:?}"
            );
        }
    }

    #[test]
    fn message_whitespace_is_preserved() {
        let mut form = valid_form();
        form.message = "  indented\n\n  text  ".into();

        let submission = form.validate(SubjectPolicy::Required).unwrap();

        assert_eq!(*submission.message, "  indented\n\n  text  ");
    }

    #[test]
    fn names_are_trimmed() {
        let mut form = valid_form();
        form.last_name = "  山田 ".into();

        let submission = form.validate(SubjectPolicy::Required).unwrap();

        assert_eq!(*submission.author.last_name, "山田");
    }

    #[test]
    fn optional_subject() {
        let mut form = valid_form();
        form.subject = "   ".into();

        let submission = form.clone().validate(SubjectPolicy::Optional).unwrap();
        assert_eq!(submission.subject, None);

        let errors = form.validate(SubjectPolicy::Required).unwrap_err();
        assert_eq!(errors.get(ContactField::Subject), Some(FieldError::Required));
    }

    #[test]
    fn localized_messages() {
        let errors = ContactForm::default()
            .validate(SubjectPolicy::Required)
            .unwrap_err();

        let ja = errors.messages(Language::Ja);
        assert_eq!(ja[&ContactField::Email], "メールアドレスを入力してください");

        let en = errors.messages(Language::En);
        assert_eq!(en[&ContactField::Message], "Please enter a message");

        assert_eq!(
            FieldError::TooLong.message(ContactField::Message, Language::Ja),
            "2000文字以内で入力してください"
        );
    }

    #[test]
    fn field_names_match_json_keys() {
        for field in ContactField::ALL {
            assert_eq!(
                serde_json::to_value(field).unwrap(),
                serde_json::Value::String(field.name().into())
            );
        }
        assert_matches!(
            serde_json::from_str::<ContactField>("\"lastName\""),
            Ok(ContactField::LastName)
        );
    }
}
