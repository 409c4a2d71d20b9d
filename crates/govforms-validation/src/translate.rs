//! Message translation hook
//!
//! Every user-facing message is a gettext-style msgid. Numeric bounds are
//! written as `%(num)d` and substituted after translation, so catalogs keep
//! the placeholder in their msgstr.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Placeholder replaced by [`Translate::format`].
pub const NUM_PLACEHOLDER: &str = "%(num)d";

/// Translates msgids into display strings.
pub trait Translate {
    /// Translated text for `msgid`.
    fn gettext(&self, msgid: &str) -> String;

    /// Translated text for `msgid` with `%(num)d` replaced by `num`.
    fn format(&self, msgid: &str, num: usize) -> String {
        self.gettext(msgid).replace(NUM_PLACEHOLDER, &num.to_string())
    }
}

impl<T: Translate + ?Sized> Translate for &T {
    fn gettext(&self, msgid: &str) -> String {
        (**self).gettext(msgid)
    }
}

/// Returns msgids unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn gettext(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

/// A msgid -> msgstr map, typically exported from the portal's `.po` files as JSON.
///
/// Unknown msgids fall back to the msgid itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Parse a flat JSON object of msgid -> msgstr.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse message catalog")
    }

    /// Load a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid message catalog: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translate for Catalog {
    fn gettext(&self, msgid: &str) -> String {
        match self.messages.get(msgid) {
            Some(msgstr) if !msgstr.is_empty() => msgstr.clone(),
            _ => msgid.to_string(),
        }
    }
}
