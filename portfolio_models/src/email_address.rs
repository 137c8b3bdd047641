use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::macros::nutype_string;

/// Permissive `local@domain.tld` check. Deliberately weaker than RFC 5322: any
/// run of characters other than whitespace and `@` is accepted in each part.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

nutype_string!(
    /// Email address of a person submitting the contact form. Surrounding
    /// whitespace is not stripped and fails the check.
    EmailAddress(validate(regex = EMAIL_ADDRESS_REGEX))
);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// Mailbox including an optional display name, e.g.
/// `AI Chat Portfolio <onboarding@resend.dev>`. Used for sender identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddressWithName {
    pub fn address(&self) -> &str {
        self.0.email.as_ref()
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl std::fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_shape() {
        for input in [
            "yamada@example.com",
            "a@b.c",
            "first.last+tag@sub.example.co.jp",
            "ユーザー@例え.jp",
        ] {
            assert!(EmailAddress::try_new(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for input in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.",
            "us er@example.com",
            "user@@example.com",
            "user@exa mple.com",
            "  padded@example.com  ",
            " yamada@example.com\n",
        ] {
            assert!(EmailAddress::try_new(input).is_err(), "{input}");
        }
    }

    #[test]
    fn mailbox_with_name() {
        let mailbox = "AI Chat Portfolio <onboarding@resend.dev>"
            .parse::<EmailAddressWithName>()
            .unwrap();
        assert_eq!(mailbox.address(), "onboarding@resend.dev");
        assert_eq!(mailbox.0.name.as_deref(), Some("AI Chat Portfolio"));
    }
}
