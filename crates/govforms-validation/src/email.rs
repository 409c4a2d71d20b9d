//! Email-family rules: `email`, `authorEmail` and `mailBox`
//!
//! All three share one address pattern, one maximum length and one message.
//! They differ in whether an empty value is accepted and in the minimum length.

use crate::alphabet::WORD;
use crate::rules::RuleDefinition;

pub const EMAIL_MAX_LENGTH: usize = 30;
pub const AUTHOR_EMAIL_MIN_LENGTH: usize = 6;

pub const INVALID_EMAIL_MESSAGE: &str =
    "Must contain the following symbols: @. and after the last . must have between 2-6 characters";

/// `local@label.label.tld` with a 2-6 letter top-level segment.
pub fn address_pattern() -> String {
    format!(r"[{WORD}.\-]+@(?:[{WORD}\-]+\.)+[a-zA-Z]{{2,6}}")
}

/// Generic contact email: empty or a well-formed address.
pub fn email_rule() -> RuleDefinition {
    RuleDefinition::new(&address_pattern(), true, 0, EMAIL_MAX_LENGTH, INVALID_EMAIL_MESSAGE)
}

/// Author email: required, at least six characters, no empty bypass.
pub fn author_email_rule() -> RuleDefinition {
    RuleDefinition::new(
        &address_pattern(),
        false,
        AUTHOR_EMAIL_MIN_LENGTH,
        EMAIL_MAX_LENGTH,
        INVALID_EMAIL_MESSAGE,
    )
}

/// Organization mail box: empty or a well-formed address.
pub fn mail_box_rule() -> RuleDefinition {
    RuleDefinition::new(&address_pattern(), true, 0, EMAIL_MAX_LENGTH, INVALID_EMAIL_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        let rule = author_email_rule();
        assert!(rule.matches("user@example.com"));
        assert!(rule.matches("first.last@data.gov.il"));
        assert!(rule.matches("user_name-1@example-domain.org"));
    }

    #[test]
    fn test_invalid_addresses() {
        let rule = author_email_rule();
        assert!(!rule.matches(""));
        assert!(!rule.matches("user@"));
        assert!(!rule.matches("@example.com"));
        assert!(!rule.matches("user@example"));
        assert!(!rule.matches("user@example.c"));
        assert!(!rule.matches("user@example.museums"));
        assert!(!rule.matches("user@@example.com"));
        assert!(!rule.matches("user@exa mple.com"));
    }

    #[test]
    fn test_empty_bypass() {
        assert!(email_rule().matches(""));
        assert!(mail_box_rule().matches(""));
        assert!(!author_email_rule().matches(""));
    }

    #[test]
    fn test_tld_is_letters_only() {
        assert!(!email_rule().matches("user@example.c0m"));
    }
}
