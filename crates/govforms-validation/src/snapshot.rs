//! Sibling lookups: the parts of the page a rule may consult besides its own value
//!
//! Every lookup returns `None` when the element is not on the page. Rules treat
//! a missing sibling as "condition not applicable".

use serde::{Deserialize, Serialize};

use crate::field::{FieldEvent, FieldKind};

/// Placeholder texts the slug preview shows before a name is chosen.
pub const SLUG_PLACEHOLDERS: &[&str] = &["<dataset>", "<organization>"];

/// The URL slug preview next to the title field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugPreview {
    /// Displayed slug text.
    pub text: String,
    /// False when the preview is hidden (`display: none`).
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl SlugPreview {
    /// Visible and still showing a placeholder instead of a chosen name.
    pub fn awaits_name(&self) -> bool {
        self.visible && SLUG_PLACEHOLDERS.contains(&self.text.trim())
    }
}

fn default_true() -> bool {
    true
}

/// Read access to the current form state.
pub trait SiblingLookup {
    fn slug_preview(&self) -> Option<SlugPreview>;

    /// `id` attribute of the element named `field`.
    fn element_id(&self, field: &str) -> Option<String>;

    /// Current value of the element named `field`.
    fn field_value(&self, field: &str) -> Option<String>;

    /// Number of tag chips currently rendered by the tag selector.
    fn tag_chip_count(&self) -> Option<usize>;

    /// Native `validity.patternMismatch` of the element named `field`.
    fn pattern_mismatch(&self, field: &str) -> Option<bool>;
}

/// A page with none of the optional elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiblings;

impl SiblingLookup for NoSiblings {
    fn slug_preview(&self) -> Option<SlugPreview> {
        None
    }

    fn element_id(&self, _field: &str) -> Option<String> {
        None
    }

    fn field_value(&self, _field: &str) -> Option<String> {
        None
    }

    fn tag_chip_count(&self) -> Option<usize> {
        None
    }

    fn pattern_mismatch(&self, _field: &str) -> Option<bool> {
        None
    }
}

/// One serialized form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub pattern_mismatch: Option<bool>,
}

impl FieldState {
    pub fn event(&self) -> FieldEvent {
        FieldEvent {
            name: self.name.clone(),
            value: self.value.clone(),
            kind: self.kind,
        }
    }
}

/// Serialized state of a whole form, as collected by the page glue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    #[serde(default)]
    pub fields: Vec<FieldState>,
    #[serde(default)]
    pub slug_preview: Option<SlugPreview>,
    #[serde(default)]
    pub tag_chips: Option<usize>,
}

impl FormSnapshot {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Change events for every field, in form order.
    pub fn events(&self) -> Vec<FieldEvent> {
        self.fields.iter().map(FieldState::event).collect()
    }

    fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl SiblingLookup for FormSnapshot {
    fn slug_preview(&self) -> Option<SlugPreview> {
        self.slug_preview.clone()
    }

    fn element_id(&self, field: &str) -> Option<String> {
        self.field(field).and_then(|state| state.element_id.clone())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        self.field(field).map(|state| state.value.clone())
    }

    fn tag_chip_count(&self) -> Option<usize> {
        self.tag_chips
    }

    fn pattern_mismatch(&self, field: &str) -> Option<bool> {
        self.field(field).and_then(|state| state.pattern_mismatch)
    }
}
