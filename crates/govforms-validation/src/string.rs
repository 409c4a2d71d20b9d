//! Length and pattern checks shared by every scalar rule

use crate::rules::RuleDefinition;
use crate::translate::Translate;
use crate::verdict::Verdict;

pub const MIN_LENGTH_MESSAGE: &str = "Must be at least %(num)d characters long";
pub const MAX_LENGTH_MESSAGE: &str = "Must be a maximum of %(num)d characters long";

/// Length in Unicode scalar values, so a Hebrew letter counts once.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_min_length(s: &str, min: usize, t: &dyn Translate) -> Result<(), String> {
    if char_len(s) >= min {
        Ok(())
    } else {
        Err(t.format(MIN_LENGTH_MESSAGE, min))
    }
}

pub fn validate_max_length(s: &str, max: usize, t: &dyn Translate) -> Result<(), String> {
    if char_len(s) <= max {
        Ok(())
    } else {
        Err(t.format(MAX_LENGTH_MESSAGE, max))
    }
}

/// Runs the length and pattern checks of `rule` against `value`.
///
/// The order is fixed: too short, then too long, then pattern mismatch. Only
/// the first failure is reported.
pub fn check(rule: &RuleDefinition, value: &str, t: &dyn Translate) -> Verdict {
    check_with_max(rule, value, rule.max_length, t)
}

/// Same as [`check`] with the rule's maximum length replaced by `max_length`.
pub fn check_with_max(
    rule: &RuleDefinition,
    value: &str,
    max_length: usize,
    t: &dyn Translate,
) -> Verdict {
    if let Err(message) = validate_min_length(value, rule.min_length, t) {
        return Verdict::invalid(message);
    }
    if let Err(message) = validate_max_length(value, max_length, t) {
        return Verdict::invalid(message);
    }
    if !rule.matches(value) {
        return Verdict::invalid(t.gettext(rule.invalid_message));
    }
    Verdict::valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Untranslated;

    fn digits(min: usize, max: usize) -> RuleDefinition {
        RuleDefinition::new("[0-9]+", false, min, max, "digits only")
    }

    #[test]
    fn test_length_validators() {
        let t = Untranslated;
        assert!(validate_min_length("hello", 3, &t).is_ok());
        assert_eq!(
            validate_min_length("hi", 3, &t).unwrap_err(),
            "Must be at least 3 characters long"
        );
        assert!(validate_max_length("hello", 10, &t).is_ok());
        assert_eq!(
            validate_max_length("verylongstring", 5, &t).unwrap_err(),
            "Must be a maximum of 5 characters long"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let t = Untranslated;
        assert_eq!(char_len("שלום"), 4);
        assert!(validate_max_length("שלום", 4, &t).is_ok());
    }

    #[test]
    fn test_check_order_short_before_pattern() {
        let verdict = check(&digits(3, 5), "a", &Untranslated);
        assert_eq!(verdict.message, "Must be at least 3 characters long");
    }

    #[test]
    fn test_check_order_long_before_pattern() {
        let verdict = check(&digits(0, 3), "abcdef", &Untranslated);
        assert_eq!(verdict.message, "Must be a maximum of 3 characters long");
    }

    #[test]
    fn test_check_pattern_mismatch() {
        let verdict = check(&digits(0, 5), "12a", &Untranslated);
        assert_eq!(verdict, Verdict::invalid("digits only"));
        assert!(check(&digits(0, 5), "123", &Untranslated).valid);
    }

    #[test]
    fn test_check_with_max_override() {
        let rule = digits(0, 3);
        assert!(!check(&rule, "12345", &Untranslated).valid);
        assert!(check_with_max(&rule, "12345", 5, &Untranslated).valid);
    }
}
