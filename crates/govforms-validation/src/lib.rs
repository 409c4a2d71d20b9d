//! govforms validation core
//!
//! Field-level validation for the data portal's dataset, organization, resource
//! and contact forms. A field name is resolved to a [`RuleId`], the rule is
//! evaluated against the field's value, and the result is an [`Effect`] that the
//! browser glue applies with `setCustomValidity`.
//!
//! The same engine backs the WASM bindings and the command line checker.

pub mod alphabet;
pub mod config;
pub mod contact;
pub mod email;
pub mod engine;
pub mod evaluator;
pub mod field;
pub mod resolver;
pub mod rules;
pub mod snapshot;
pub mod string;
pub mod translate;
pub mod verdict;

pub use config::{FormConfig, FormKind, Selectors};
pub use engine::{DispatchError, Validator, TAG_FIELD};
pub use evaluator::{evaluate, EvalContext};
pub use field::{FieldContext, FieldEvent, FieldKind, FieldName, FieldNameError};
pub use resolver::{resolve, RuleKey};
pub use rules::{PostCheck, RuleDefinition, RuleId};
pub use snapshot::{FieldState, FormSnapshot, NoSiblings, SiblingLookup, SlugPreview};
pub use translate::{Catalog, Translate, Untranslated};
pub use verdict::{Effect, FieldOutcome, Target, Verdict};
