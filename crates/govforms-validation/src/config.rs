// File: src/config.rs
// Purpose: Per-form configuration, from the form's data-module options or a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::TAG_FIELD;
use crate::resolver::RuleKey;
use crate::rules::RuleId;

/// Configuration of one validated form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// `id` attribute of the form element, e.g. `dataset-edit`
    #[serde(default)]
    pub form_id: String,

    #[serde(default)]
    pub form_kind: FormKind,

    /// Accepts a bool or the `"True"`/`"False"` strings CKAN renders into
    /// `data-module-is_resource`
    #[serde(
        default,
        alias = "is_resource",
        deserialize_with = "deserialize_flag"
    )]
    pub is_resource_form: bool,

    #[serde(default)]
    pub selectors: Selectors,
}

/// Which rule set the form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Dataset, organization and resource forms
    #[default]
    Scheming,
    /// The contact-us form
    Contact,
}

impl FormKind {
    pub fn rule_for(self, key: &RuleKey) -> Option<RuleId> {
        match self {
            FormKind::Scheming => RuleId::from_key(key),
            FormKind::Contact => RuleId::from_contact_key(key),
        }
    }
}

/// CKAN renders form controls as `id="field-<name>"`
const FIELD_ID_SELECTOR_PREFIX: &str = "#field-";

/// CSS selectors of the elements effects are applied to, and of the elements
/// the page glue reads when it collects a [`FormSnapshot`](crate::FormSnapshot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default = "default_slug_preview")]
    pub slug_preview: String,

    #[serde(default = "default_slug_preview_value")]
    pub slug_preview_value: String,

    /// Visible input of the tag selector
    #[serde(default = "default_select2_display")]
    pub tag_display: String,

    /// Close links of the rendered tag chips
    #[serde(default = "default_tag_chip")]
    pub tag_chip: String,

    /// Hidden input holding the comma-separated tags
    #[serde(default = "default_tag_field")]
    pub tag_field: String,

    /// Visible input of the format selector
    #[serde(default = "default_select2_display")]
    pub format_display: String,
}

// Default values
fn default_slug_preview() -> String {
    ".slug-preview".to_string()
}

fn default_slug_preview_value() -> String {
    ".slug-preview-value".to_string()
}

fn default_select2_display() -> String {
    "#s2id_autogen1".to_string()
}

fn default_tag_chip() -> String {
    "a.select2-search-choice-close".to_string()
}

fn default_tag_field() -> String {
    "#field-tag_string".to_string()
}

impl Selectors {
    /// Name of the hidden tag field, derived from its `#field-<name>` selector.
    ///
    /// Falls back to `tag_string` for selectors of any other shape.
    pub fn tag_field_name(&self) -> &str {
        self.tag_field
            .strip_prefix(FIELD_ID_SELECTOR_PREFIX)
            .filter(|name| !name.is_empty())
            .unwrap_or(TAG_FIELD)
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            slug_preview: default_slug_preview(),
            slug_preview_value: default_slug_preview_value(),
            tag_display: default_select2_display(),
            tag_chip: default_tag_chip(),
            tag_field: default_tag_field(),
            format_display: default_select2_display(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: String::new(),
            form_kind: FormKind::Scheming,
            is_resource_form: false,
            selectors: Selectors::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
    })
}

impl FormConfig {
    /// Config for a dataset or organization form
    pub fn scheming(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            ..Self::default()
        }
    }

    /// Config for a resource form
    pub fn resource(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            is_resource_form: true,
            ..Self::default()
        }
    }

    /// Config for the contact-us form
    pub fn contact() -> Self {
        Self {
            form_id: "contact-form".to_string(),
            form_kind: FormKind::Contact,
            ..Self::default()
        }
    }

    /// Whether the form edits a dataset (by its id, e.g. `dataset-edit`)
    pub fn is_dataset_form(&self) -> bool {
        self.form_id.contains("dataset")
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Empty config means defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).context("Failed to parse form config")
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load form config: {:?}", path))
    }
}
