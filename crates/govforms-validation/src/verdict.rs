//! Evaluation results and the effects handed back to the page

use serde::{Deserialize, Serialize};

use crate::rules::RuleId;

/// Outcome of one rule evaluation. `message` is empty when valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Keeps the first failure: returns `self` if already invalid, else `next`.
    pub fn and(self, next: Verdict) -> Verdict {
        if self.valid {
            next
        } else {
            self
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::valid()
    }
}

/// Element whose custom validity receives the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    /// The element that raised the change.
    Field,
    /// The visible input of the tag selector widget.
    TagDisplay,
    /// The visible input of the format selector widget.
    FormatDisplay,
}

/// A `setCustomValidity(message)` call for the page to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub field: String,
    pub rule: RuleId,
    pub target: Target,
    /// CSS selector of the element to update.
    pub selector: String,
    /// Empty string clears the custom validity.
    pub message: String,
}

impl Effect {
    pub fn is_valid(&self) -> bool {
        self.message.is_empty()
    }
}

/// Per-field result of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FieldOutcome {
    Applied(Effect),
    Skipped { field: String, reason: String },
}

impl FieldOutcome {
    pub fn field(&self) -> &str {
        match self {
            FieldOutcome::Applied(effect) => &effect.field,
            FieldOutcome::Skipped { field, .. } => field,
        }
    }

    pub fn effect(&self) -> Option<&Effect> {
        match self {
            FieldOutcome::Applied(effect) => Some(effect),
            FieldOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.effect().is_some_and(|effect| !effect.is_valid())
    }
}
