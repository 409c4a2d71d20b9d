//! Dispatch: field events in, effects out
//!
//! [`Validator`] ties the pieces together for one form. A batch never stops
//! early: fields with malformed names or no matching rule come back as
//! [`FieldOutcome::Skipped`] and the rest are still evaluated.

use thiserror::Error;
use tracing::debug;

use crate::config::FormConfig;
use crate::evaluator::{self, evaluate, EvalContext};
use crate::field::{FieldContext, FieldEvent, FieldName};
use crate::resolver::resolve;
use crate::rules::RuleId;
use crate::snapshot::SiblingLookup;
use crate::translate::{Translate, Untranslated};
use crate::verdict::{Effect, FieldOutcome, Target, Verdict};

/// Name of the hidden field holding the comma-separated tags.
pub const TAG_FIELD: &str = "tag_string";

/// Why a field was skipped. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("malformed field name {name:?}: {reason}")]
    MalformedName { name: String, reason: String },

    #[error("no rule for field {field:?} (resolved key {key:?})")]
    UnresolvedRule { field: String, key: String },
}

/// Validation engine for one form.
#[derive(Debug, Clone)]
pub struct Validator<T = Untranslated> {
    config: FormConfig,
    translator: T,
}

impl Validator<Untranslated> {
    /// Validator that shows msgids untranslated.
    pub fn untranslated(config: FormConfig) -> Self {
        Self::new(config, Untranslated)
    }
}

impl<T: Translate> Validator<T> {
    pub fn new(config: FormConfig, translator: T) -> Self {
        Self { config, translator }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn context_for(&self, name: &FieldName) -> FieldContext {
        FieldContext {
            is_resource_form: self.config.is_resource_form,
            is_extras_key: name.is_extras_key(),
        }
    }

    /// Rule for `name` on this form, if any.
    pub fn resolve(&self, name: &FieldName) -> Option<RuleId> {
        let key = resolve(name, &self.context_for(name));
        self.config.form_kind.rule_for(&key)
    }

    /// Validates one changed field.
    pub fn validate_field(
        &self,
        event: &FieldEvent,
        siblings: &dyn SiblingLookup,
    ) -> Result<Effect, DispatchError> {
        let name = FieldName::try_new(event.name.as_str()).map_err(|e| {
            DispatchError::MalformedName {
                name: event.name.clone(),
                reason: format!("{e:?}"),
            }
        })?;

        let key = resolve(&name, &self.context_for(&name));
        let rule = self.config.form_kind.rule_for(&key).ok_or_else(|| {
            DispatchError::UnresolvedRule {
                field: event.name.clone(),
                key: key.to_string(),
            }
        })?;

        debug!(field = %name, %key, %rule, kind = ?event.kind, "dispatching");

        let cx = EvalContext {
            field: name.as_str(),
            config: &self.config,
            siblings,
            translator: &self.translator,
        };
        let verdict = evaluate(rule, &event.value, &cx);

        Ok(self.effect(name.as_str(), rule, verdict))
    }

    /// Validates every field of a batch, skipping those without a rule.
    pub fn validate_batch(
        &self,
        events: &[FieldEvent],
        siblings: &dyn SiblingLookup,
    ) -> Vec<FieldOutcome> {
        events
            .iter()
            .map(|event| match self.validate_field(event, siblings) {
                Ok(effect) => FieldOutcome::Applied(effect),
                Err(err) => {
                    debug!(field = %event.name, error = %err, "skipping field");
                    FieldOutcome::Skipped {
                        field: event.name.clone(),
                        reason: err.to_string(),
                    }
                }
            })
            .collect()
    }

    /// Called after a tag chip was removed from the tag selector.
    ///
    /// With no chips left the tag input is cleared unconditionally, so a stale
    /// message never outlives the tags that caused it. Otherwise, including
    /// when the page does not report its chips, the remaining tags are
    /// validated once.
    pub fn on_tag_chip_removed(&self, siblings: &dyn SiblingLookup) -> Effect {
        let field = self.config.selectors.tag_field_name();
        let remaining = siblings.tag_chip_count();
        let verdict = match remaining {
            Some(0) => Verdict::valid(),
            _ => match siblings.field_value(field) {
                Some(value) => {
                    let cx = EvalContext {
                        field,
                        config: &self.config,
                        siblings,
                        translator: &self.translator,
                    };
                    evaluator::tag_list(&value, &cx)
                }
                None => Verdict::valid(),
            },
        };

        debug!(?remaining, valid = verdict.valid, "tag chip removed");
        self.effect(field, RuleId::TagString, verdict)
    }

    fn effect(&self, field: &str, rule: RuleId, verdict: Verdict) -> Effect {
        let target = rule.target();
        let selector = match target {
            Target::Field => format!("[name=\"{field}\"]"),
            Target::TagDisplay => self.config.selectors.tag_display.clone(),
            Target::FormatDisplay => self.config.selectors.format_display.clone(),
        };
        Effect {
            field: field.to_string(),
            rule,
            target,
            selector,
            message: verdict.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FormSnapshot, NoSiblings};
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> FieldName {
        FieldName::try_new(s).unwrap()
    }

    #[test]
    fn test_resolve_by_form_kind() {
        let dataset = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let resource = Validator::untranslated(FormConfig::resource("resource-edit"));
        let contact = Validator::untranslated(FormConfig::contact());

        assert_eq!(dataset.resolve(&name("name")), Some(RuleId::Name));
        assert_eq!(resource.resolve(&name("name")), Some(RuleId::ResourceName));
        assert_eq!(contact.resolve(&name("name")), Some(RuleId::ContactName));
        assert_eq!(contact.resolve(&name("title")), None);
        assert_eq!(resource.resolve(&name("extras__1__value")), Some(RuleId::Extras));
    }

    #[test]
    fn test_unreported_chips_still_check_tags() {
        let validator = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let snapshot = FormSnapshot {
            fields: vec![crate::snapshot::FieldState {
                name: TAG_FIELD.to_string(),
                value: "x;".to_string(),
                kind: Default::default(),
                element_id: None,
                pattern_mismatch: None,
            }],
            tag_chips: None,
            ..FormSnapshot::default()
        };

        let effect = validator.on_tag_chip_removed(&snapshot);
        assert_eq!(effect.message, "Must be purely alphanumeric characters and these symbols: '");

        let effect = validator.on_tag_chip_removed(&NoSiblings);
        assert!(effect.is_valid());
    }

    #[test]
    fn test_tag_field_follows_selectors() {
        let mut config = FormConfig::scheming("dataset-edit");
        config.selectors.tag_field = "#field-keywords".to_string();
        let validator = Validator::untranslated(config);
        let snapshot = FormSnapshot {
            fields: vec![crate::snapshot::FieldState {
                name: "keywords".to_string(),
                value: "ok,x".to_string(),
                kind: Default::default(),
                element_id: Some("field-keywords".to_string()),
                pattern_mismatch: None,
            }],
            tag_chips: Some(2),
            ..FormSnapshot::default()
        };

        let effect = validator.on_tag_chip_removed(&snapshot);
        assert_eq!(effect.field, "keywords");
        assert_eq!(effect.message, "Must be at least 2 characters long");
    }

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<Validator<crate::translate::Catalog>>();
    }

    #[test]
    fn test_context_marks_extras() {
        let validator = Validator::untranslated(FormConfig::resource("resource-new"));
        let ctx = validator.context_for(&name("extras__0__key"));
        assert!(ctx.is_resource_form);
        assert!(ctx.is_extras_key);
    }

    #[test]
    fn test_effect_for_plain_field() {
        let validator = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let effect = validator
            .validate_field(&FieldEvent::new("version", "1.x"), &NoSiblings)
            .unwrap();
        assert_eq!(
            effect,
            Effect {
                field: "version".to_string(),
                rule: RuleId::Version,
                target: Target::Field,
                selector: "[name=\"version\"]".to_string(),
                message: "Must be purely digit and these symbols: .".to_string(),
            }
        );
    }

    #[test]
    fn test_tag_and_format_go_to_display_input() {
        let validator = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let tags = validator
            .validate_field(&FieldEvent::new("tag_string", "ok,x"), &NoSiblings)
            .unwrap();
        assert_eq!(tags.target, Target::TagDisplay);
        assert_eq!(tags.selector, "#s2id_autogen1");
        assert!(!tags.is_valid());

        let format = validator
            .validate_field(&FieldEvent::new("format", "CSV"), &NoSiblings)
            .unwrap();
        assert_eq!(format.target, Target::FormatDisplay);
        assert!(format.is_valid());
    }

    #[test]
    fn test_unresolved_and_malformed() {
        let validator = Validator::untranslated(FormConfig::default());
        let err = validator
            .validate_field(&FieldEvent::new("owner_org", "x"), &NoSiblings)
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnresolvedRule { ref key, .. } if key == "ownerOrg"));

        let err = validator
            .validate_field(&FieldEvent::new("  ", "x"), &NoSiblings)
            .unwrap_err();
        assert!(matches!(err, DispatchError::MalformedName { .. }));
    }

    #[test]
    fn test_batch_never_aborts() {
        let validator = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let events = vec![
            FieldEvent::new("", "x"),
            FieldEvent::new("title", "Budget"),
            FieldEvent::new("save", ""),
            FieldEvent::new("name", "b"),
        ];
        let outcomes = validator.validate_batch(&events, &NoSiblings);

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes[0], FieldOutcome::Skipped { .. }));
        assert!(outcomes[1].effect().unwrap().is_valid());
        assert!(matches!(outcomes[2], FieldOutcome::Skipped { .. }));
        assert!(outcomes[3].is_invalid());
        assert_eq!(
            outcomes[3].effect().unwrap().message,
            "Must be at least 2 characters long"
        );
    }

    #[test]
    fn test_last_chip_removed_forces_valid() {
        let validator = Validator::untranslated(FormConfig::scheming("dataset-edit"));
        let snapshot = FormSnapshot {
            fields: vec![crate::snapshot::FieldState {
                name: TAG_FIELD.to_string(),
                value: "x;".to_string(),
                kind: Default::default(),
                element_id: None,
                pattern_mismatch: None,
            }],
            tag_chips: Some(0),
            ..FormSnapshot::default()
        };

        let effect = validator.on_tag_chip_removed(&snapshot);
        assert!(effect.is_valid());
        assert_eq!(effect.target, Target::TagDisplay);

        let remaining = FormSnapshot {
            tag_chips: Some(1),
            ..snapshot
        };
        let effect = validator.on_tag_chip_removed(&remaining);
        assert_eq!(effect.message, "Must be purely alphanumeric characters and these symbols: '");
    }
}
