//! Contact-us form rules
//!
//! The contact form declares HTML `pattern` attributes on its name and email
//! inputs, so those two rules only translate the browser's own
//! `patternMismatch` flag into a message. The free-text content field has its
//! own pattern and no length bounds.

use crate::email::INVALID_EMAIL_MESSAGE;
use crate::evaluator::EvalContext;
use crate::rules::{RuleId, RULES};
use crate::string;
use crate::verdict::Verdict;

pub const CONTACT_NAME_MESSAGE: &str =
    "Must be purely alphabetic characters and these symbols: -'";

pub fn evaluate(rule: RuleId, value: &str, cx: &EvalContext<'_>) -> Verdict {
    match rule {
        RuleId::ContactEmail => native_pattern(INVALID_EMAIL_MESSAGE, cx),
        RuleId::ContactName => native_pattern(CONTACT_NAME_MESSAGE, cx),
        RuleId::ContactContent => string::check(&RULES.contact_content, value, cx.translator),
        _ => Verdict::valid(),
    }
}

fn native_pattern(message: &str, cx: &EvalContext<'_>) -> Verdict {
    match cx.siblings.pattern_mismatch(cx.field) {
        Some(true) => Verdict::invalid(cx.translator.gettext(message)),
        _ => Verdict::valid(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::snapshot::{FieldState, FormSnapshot, SiblingLookup};
    use crate::translate::Untranslated;

    fn eval(rule: RuleId, field: &str, value: &str, siblings: &dyn SiblingLookup) -> Verdict {
        let config = FormConfig::contact();
        let cx = EvalContext {
            field,
            config: &config,
            siblings,
            translator: &Untranslated,
        };
        evaluate(rule, value, &cx)
    }

    fn with_mismatch(field: &str, mismatch: Option<bool>) -> FormSnapshot {
        FormSnapshot {
            fields: vec![FieldState {
                name: field.to_string(),
                value: String::new(),
                kind: Default::default(),
                element_id: None,
                pattern_mismatch: mismatch,
            }],
            ..FormSnapshot::default()
        }
    }

    #[test]
    fn test_email_follows_native_flag() {
        let verdict = eval(RuleId::ContactEmail, "email", "x", &with_mismatch("email", Some(true)));
        assert_eq!(verdict, Verdict::invalid(INVALID_EMAIL_MESSAGE));
        assert!(eval(RuleId::ContactEmail, "email", "x", &with_mismatch("email", Some(false))).valid);
    }

    #[test]
    fn test_missing_flag_is_valid() {
        assert!(eval(RuleId::ContactName, "name", "x", &with_mismatch("name", None)).valid);
        assert!(eval(RuleId::ContactName, "name", "x", &FormSnapshot::default()).valid);
    }

    #[test]
    fn test_name_message() {
        let verdict = eval(RuleId::ContactName, "name", "R2D2", &with_mismatch("name", Some(true)));
        assert_eq!(verdict.message, CONTACT_NAME_MESSAGE);
    }

    #[test]
    fn test_content_pattern() {
        let none = FormSnapshot::default();
        assert!(eval(RuleId::ContactContent, "content", "Hello, is the API down?", &none).valid);
        assert!(eval(RuleId::ContactContent, "content", "שלום (תודה)", &none).valid);
        assert!(eval(RuleId::ContactContent, "content", &"a".repeat(5000), &none).valid);
        assert!(!eval(RuleId::ContactContent, "content", "", &none).valid);
        assert!(!eval(RuleId::ContactContent, "content", "<b>hi</b>", &none).valid);
        assert!(!eval(RuleId::ContactContent, "content", "a@b", &none).valid);
    }
}
