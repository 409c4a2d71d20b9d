//! Rule identifiers and the static rule table

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::alphabet::{all_letters, ARABIC_COMMA, DIGITS, HEBREW_LETTERS, SHEKEL_SIGN, WORD};
use crate::email;
use crate::resolver::RuleKey;
use crate::verdict::Target;

pub const SMALL_FIELD_MAX_LENGTH: usize = 10;
pub const REGULAR_FIELD_MAX_LENGTH: usize = 100;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 60;
pub const CONTENT_MAX_LENGTH: usize = 300;
pub const LONG_CONTENT_MAX_LENGTH: usize = 2000;
pub const TAG_MIN_LENGTH: usize = 2;
pub const TAG_MAX_LENGTH: usize = 20;
pub const COORDINATES_MAX_LENGTH: usize = 15;
pub const FORMAT_MAX_LENGTH: usize = 15;
pub const EXTRAS_MAX_LENGTH: usize = 14;

/// Every rule the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    Title,
    Name,
    ResourceName,
    Notes,
    Remark,
    Description,
    TagString,
    Url,
    ImageUrl,
    Version,
    ResourceRefNumber,
    ResourceCoordinates,
    ResourceDescSpatialCover,
    ResourceGeodeticRefSys,
    Email,
    AuthorEmail,
    MailBox,
    Format,
    Extras,
    ContactEmail,
    ContactName,
    ContactContent,
}

/// Checks chained after a rule's own evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostCheck {
    /// Fields required when the resource uses a GIS format. Currently disabled.
    GisFormatRequirement,
}

const GIS_POST_CHECKS: &[PostCheck] = &[PostCheck::GisFormatRequirement];

impl RuleId {
    /// Rule for a key resolved on a dataset, organization or resource form.
    pub fn from_key(key: &RuleKey) -> Option<RuleId> {
        let rule = match key.as_str() {
            "title" => RuleId::Title,
            "name" => RuleId::Name,
            "resourceName" => RuleId::ResourceName,
            "notes" => RuleId::Notes,
            "remark" => RuleId::Remark,
            "description" => RuleId::Description,
            "tagString" => RuleId::TagString,
            "url" => RuleId::Url,
            "imageUrl" => RuleId::ImageUrl,
            "version" => RuleId::Version,
            "resourceRefNumber" => RuleId::ResourceRefNumber,
            "resourceCoordinates" => RuleId::ResourceCoordinates,
            "resourceDescSpatialCover" => RuleId::ResourceDescSpatialCover,
            "resourceGeodeticRefSys" => RuleId::ResourceGeodeticRefSys,
            "email" => RuleId::Email,
            "authorEmail" => RuleId::AuthorEmail,
            "mailBox" => RuleId::MailBox,
            "format" => RuleId::Format,
            _ if key.is_extras() => RuleId::Extras,
            _ => return None,
        };
        Some(rule)
    }

    /// Rule for a key resolved on the contact-us form.
    pub fn from_contact_key(key: &RuleKey) -> Option<RuleId> {
        match key.as_str() {
            "email" => Some(RuleId::ContactEmail),
            "name" => Some(RuleId::ContactName),
            "content" => Some(RuleId::ContactContent),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            RuleId::Title => "title",
            RuleId::Name => "name",
            RuleId::ResourceName => "resourceName",
            RuleId::Notes => "notes",
            RuleId::Remark => "remark",
            RuleId::Description => "description",
            RuleId::TagString => "tagString",
            RuleId::Url => "url",
            RuleId::ImageUrl => "imageUrl",
            RuleId::Version => "version",
            RuleId::ResourceRefNumber => "resourceRefNumber",
            RuleId::ResourceCoordinates => "resourceCoordinates",
            RuleId::ResourceDescSpatialCover => "resourceDescSpatialCover",
            RuleId::ResourceGeodeticRefSys => "resourceGeodeticRefSys",
            RuleId::Email => "email",
            RuleId::AuthorEmail => "authorEmail",
            RuleId::MailBox => "mailBox",
            RuleId::Format => "format",
            RuleId::Extras => "extras",
            RuleId::ContactEmail => "contactEmail",
            RuleId::ContactName => "contactName",
            RuleId::ContactContent => "contactContent",
        }
    }

    /// Scalar definition used by the rule, if it has one.
    ///
    /// Content rules share one definition; their maximum length is chosen at
    /// evaluation time. The spatial-cover and geodetic rules and the contact
    /// name/email rules have no definition of their own.
    pub fn definition(self) -> Option<&'static RuleDefinition> {
        let rules = &*RULES;
        let definition = match self {
            RuleId::Title => &rules.title,
            RuleId::Name => &rules.name,
            RuleId::ResourceName => &rules.resource_name,
            RuleId::Notes | RuleId::Remark | RuleId::Description => &rules.content,
            RuleId::TagString => &rules.tag,
            RuleId::Url | RuleId::ImageUrl => &rules.url,
            RuleId::Version => &rules.version,
            RuleId::ResourceRefNumber => &rules.ref_number,
            RuleId::ResourceCoordinates => &rules.coordinates,
            RuleId::Email => &rules.email,
            RuleId::AuthorEmail => &rules.author_email,
            RuleId::MailBox => &rules.mail_box,
            RuleId::Format => &rules.format,
            RuleId::Extras => &rules.extras,
            RuleId::ContactContent => &rules.contact_content,
            RuleId::ResourceDescSpatialCover
            | RuleId::ResourceGeodeticRefSys
            | RuleId::ContactEmail
            | RuleId::ContactName => return None,
        };
        Some(definition)
    }

    pub fn post_checks(self) -> &'static [PostCheck] {
        match self {
            RuleId::ResourceRefNumber
            | RuleId::ResourceCoordinates
            | RuleId::ResourceDescSpatialCover
            | RuleId::ResourceGeodeticRefSys => GIS_POST_CHECKS,
            _ => &[],
        }
    }

    /// Element that shows this rule's message. Select2 widgets hide the real
    /// field, so their messages go to the visible input instead.
    pub fn target(self) -> Target {
        match self {
            RuleId::TagString => Target::TagDisplay,
            RuleId::Format => Target::FormatDisplay,
            _ => Target::Field,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Pattern, length bounds and message of a scalar rule.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    pattern: Regex,
    /// Empty input matches the pattern regardless of its body.
    allow_empty: bool,
    pub min_length: usize,
    pub max_length: usize,
    /// msgid shown when the pattern does not match.
    pub invalid_message: &'static str,
}

impl RuleDefinition {
    /// Builds a definition from a pattern body. The body is anchored to match
    /// the whole value.
    ///
    /// Panics if `body` is not a valid regex; bodies are compile-time constants.
    pub fn new(
        body: &str,
        allow_empty: bool,
        min_length: usize,
        max_length: usize,
        invalid_message: &'static str,
    ) -> Self {
        let source = if allow_empty {
            format!("^(?:{body})?$")
        } else {
            format!("^(?:{body})$")
        };
        let pattern = Regex::new(&source)
            .unwrap_or_else(|e| panic!("invalid rule pattern {source:?}: {e}"));
        Self {
            pattern,
            allow_empty,
            min_length,
            max_length,
            invalid_message,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        (self.allow_empty && value.is_empty()) || self.pattern.is_match(value)
    }
}

pub const TITLE_MESSAGE: &str =
    "Must be purely alphanumeric characters and these symbols: _-()\",";
pub const NAME_MESSAGE: &str = "Must be purely alphanumeric characters and these symbols: _-";
pub const RESOURCE_NAME_MESSAGE: &str =
    "Must be purely alphanumeric characters and these symbols: _-\"./(),";
pub const CONTENT_MESSAGE: &str =
    "Must be purely alphanumeric characters and these symbols: %-_'\"().,?₪:/\\";
pub const TAG_MESSAGE: &str = "Must be purely alphanumeric characters and these symbols: '";
pub const URL_MESSAGE: &str = "Must be purely alphanumeric characters and these symbols: ./-:";
pub const DECIMAL_MESSAGE: &str = "Must be purely digit and these symbols: .";
pub const REF_NUMBER_MESSAGE: &str = "Must be purely digit and these symbols: -/";
pub const FORMAT_MESSAGE: &str = "Must be only alphabetic characters";
pub const EXTRAS_MESSAGE: &str = "Must be purely alphanumeric characters and these symbols: -";
pub const CONTACT_CONTENT_MESSAGE: &str =
    "Must be purely alphanumeric characters and these symbols: '\"().,?/";

/// All scalar definitions, compiled once.
#[derive(Debug)]
pub struct RuleTable {
    pub title: RuleDefinition,
    pub name: RuleDefinition,
    pub resource_name: RuleDefinition,
    pub content: RuleDefinition,
    pub tag: RuleDefinition,
    pub url: RuleDefinition,
    pub version: RuleDefinition,
    pub ref_number: RuleDefinition,
    pub coordinates: RuleDefinition,
    pub email: RuleDefinition,
    pub author_email: RuleDefinition,
    pub mail_box: RuleDefinition,
    pub format: RuleDefinition,
    pub extras: RuleDefinition,
    pub contact_content: RuleDefinition,
}

pub static RULES: Lazy<RuleTable> = Lazy::new(RuleTable::build);

impl RuleTable {
    fn build() -> Self {
        let letters = all_letters();
        let comma = ARABIC_COMMA;
        let shekel = SHEKEL_SIGN;

        Self {
            title: RuleDefinition::new(
                &format!(r#"[{letters}{DIGITS}\s_\-()"{comma},]+"#),
                false,
                0,
                REGULAR_FIELD_MAX_LENGTH,
                TITLE_MESSAGE,
            ),
            name: RuleDefinition::new(
                r"[a-zA-Z0-9_\-]+",
                false,
                NAME_MIN_LENGTH,
                NAME_MAX_LENGTH,
                NAME_MESSAGE,
            ),
            resource_name: RuleDefinition::new(
                &format!(r#"[{letters}{DIGITS}\s"_/(){comma},\-.:&]+"#),
                true,
                0,
                REGULAR_FIELD_MAX_LENGTH,
                RESOURCE_NAME_MESSAGE,
            ),
            content: RuleDefinition::new(
                &format!(r#"[{letters}{DIGITS}'"().{comma},/?\-%:_{shekel}\s\\@]+"#),
                true,
                0,
                CONTENT_MAX_LENGTH,
                CONTENT_MESSAGE,
            ),
            tag: RuleDefinition::new(
                &format!(r"[{letters}{DIGITS}'\s]+"),
                false,
                TAG_MIN_LENGTH,
                TAG_MAX_LENGTH,
                TAG_MESSAGE,
            ),
            url: RuleDefinition::new(
                &format!(r"[{WORD}.\-:/]+"),
                true,
                0,
                REGULAR_FIELD_MAX_LENGTH,
                URL_MESSAGE,
            ),
            version: RuleDefinition::new(
                r"[0-9.]+",
                true,
                0,
                SMALL_FIELD_MAX_LENGTH,
                DECIMAL_MESSAGE,
            ),
            ref_number: RuleDefinition::new(
                r"[0-9\-/]+",
                true,
                0,
                SMALL_FIELD_MAX_LENGTH,
                REF_NUMBER_MESSAGE,
            ),
            coordinates: RuleDefinition::new(
                r"[0-9.]+",
                true,
                0,
                COORDINATES_MAX_LENGTH,
                DECIMAL_MESSAGE,
            ),
            email: email::email_rule(),
            author_email: email::author_email_rule(),
            mail_box: email::mail_box_rule(),
            format: RuleDefinition::new(
                r"[a-zA-Z]+",
                true,
                0,
                FORMAT_MAX_LENGTH,
                FORMAT_MESSAGE,
            ),
            extras: RuleDefinition::new(
                r"[A-Z0-9\-]+",
                false,
                0,
                EXTRAS_MAX_LENGTH,
                EXTRAS_MESSAGE,
            ),
            contact_content: RuleDefinition::new(
                &format!(r#"[a-zA-Z{HEBREW_LETTERS}{DIGITS}'"().,/?\s]+"#),
                false,
                0,
                usize::MAX,
                CONTACT_CONTENT_MESSAGE,
            ),
        }
    }
}
