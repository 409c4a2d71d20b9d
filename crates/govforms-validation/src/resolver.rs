//! Field name -> rule key resolution
//!
//! Names are snake_case token lists. The key is the camelCase join of the
//! tokens (`resource_ref_number` -> `resourceRefNumber`) with two exceptions:
//!
//! - an `extras` token ends resolution, so every dynamic extras key shares the
//!   `extras` bucket (`extras__3__value` -> `extras`);
//! - on resource forms the bare `name` field resolves to `resourceName`,
//!   since resource names allow a wider character set than dataset names.
//!
//! Resolution never fails. Whether a key has a rule is decided by
//! [`RuleId::from_key`](crate::RuleId::from_key).

use std::fmt;

use serde::Serialize;

use crate::field::{FieldContext, FieldName, EXTRAS_TOKEN};

const RESOURCE_NAME_KEY: &str = "resourceName";
const NAME_FIELD: &str = "name";

/// Canonical rule key derived from a field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleKey(String);

impl RuleKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_extras(&self) -> bool {
        self.0.starts_with(EXTRAS_TOKEN)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RuleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves a field name to its rule key.
///
/// ```
/// use govforms_validation::{resolve, FieldContext, FieldName};
///
/// let ctx = FieldContext::default();
/// let name = FieldName::try_new("resource_ref_number").unwrap();
/// assert_eq!(resolve(&name, &ctx).as_str(), "resourceRefNumber");
/// ```
pub fn resolve(name: &FieldName, ctx: &FieldContext) -> RuleKey {
    let mut key = String::with_capacity(name.as_str().len());

    for (index, token) in name.tokens().enumerate() {
        if token == EXTRAS_TOKEN {
            key.push_str(EXTRAS_TOKEN);
            break;
        }

        if ctx.is_resource_form && !ctx.is_extras_key && name.as_str() == NAME_FIELD {
            return RuleKey(RESOURCE_NAME_KEY.to_string());
        }

        if index == 0 {
            key.push_str(token);
        } else {
            push_capitalized(&mut key, token);
        }
    }

    RuleKey(key)
}

fn push_capitalized(key: &mut String, token: &str) {
    let mut chars = token.chars();
    if let Some(first) = chars.next() {
        key.extend(first.to_uppercase());
        key.push_str(chars.as_str());
    }
}
