//! Rule evaluation
//!
//! [`evaluate`] runs one rule against one value. Most rules are a plain
//! scalar check ([`crate::string::check`]); the title, content and tag rules
//! add conditions that consult sibling elements through [`SiblingLookup`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::alphabet::non_latin_letters;
use crate::config::FormConfig;
use crate::contact;
use crate::rules::{PostCheck, RuleDefinition, RuleId, LONG_CONTENT_MAX_LENGTH, RULES};
use crate::snapshot::SiblingLookup;
use crate::string;
use crate::translate::Translate;
use crate::verdict::Verdict;

pub const FILL_NAME_MESSAGE: &str = "Please fill in name field.";

/// Element id of the dataset description textarea.
pub const NOTES_ELEMENT_ID: &str = "field-notes";

/// Titles made only of non-Latin letters and whitespace, or empty.
static NON_LATIN_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[{}\s]*$", non_latin_letters())).unwrap()
});

/// Everything a rule may consult besides the value itself.
pub struct EvalContext<'a> {
    /// Name of the field being evaluated.
    pub field: &'a str,
    pub config: &'a FormConfig,
    pub siblings: &'a dyn SiblingLookup,
    pub translator: &'a dyn Translate,
}

/// Evaluates `rule` against `value`.
///
/// Post-checks always run; the first failure is kept.
pub fn evaluate(rule: RuleId, value: &str, cx: &EvalContext<'_>) -> Verdict {
    let mut verdict = match rule {
        RuleId::Title => title(value, cx),
        RuleId::Notes => content(value, notes_max_length(cx), cx),
        RuleId::Remark => content(value, RULES.content.max_length, cx),
        RuleId::Description => content(value, LONG_CONTENT_MAX_LENGTH, cx),
        RuleId::TagString => tag_list(value, cx),
        RuleId::ResourceDescSpatialCover | RuleId::ResourceGeodeticRefSys => Verdict::valid(),
        RuleId::ContactEmail | RuleId::ContactName | RuleId::ContactContent => {
            contact::evaluate(rule, value, cx)
        }
        RuleId::Name
        | RuleId::ResourceName
        | RuleId::Url
        | RuleId::ImageUrl
        | RuleId::Version
        | RuleId::ResourceRefNumber
        | RuleId::ResourceCoordinates
        | RuleId::Email
        | RuleId::AuthorEmail
        | RuleId::MailBox
        | RuleId::Format
        | RuleId::Extras => scalar(rule, value, cx),
    };

    for check in rule.post_checks() {
        verdict = verdict.and(run_post_check(*check, value, cx));
    }

    trace!(field = cx.field, %rule, valid = verdict.valid, "evaluated");
    verdict
}

fn scalar(rule: RuleId, value: &str, cx: &EvalContext<'_>) -> Verdict {
    match rule.definition() {
        Some(definition) => string::check(definition, value, cx.translator),
        None => Verdict::valid(),
    }
}

/// Title may stay blank (or non-Latin only, since it cannot seed a slug) as
/// long as the name field was filled in; the slug preview tells us which.
fn title(value: &str, cx: &EvalContext<'_>) -> Verdict {
    if NON_LATIN_TITLE.is_match(value) {
        return match cx.siblings.slug_preview() {
            Some(slug) if slug.awaits_name() => {
                Verdict::invalid(cx.translator.gettext(FILL_NAME_MESSAGE))
            }
            _ => Verdict::valid(),
        };
    }
    string::check(&RULES.title, value, cx.translator)
}

/// The dataset description gets the long limit; every other content field
/// keeps the default.
fn notes_max_length(cx: &EvalContext<'_>) -> usize {
    let is_notes_element = cx
        .siblings
        .element_id(cx.field)
        .is_some_and(|id| id == NOTES_ELEMENT_ID);

    if cx.config.is_dataset_form() && is_notes_element {
        LONG_CONTENT_MAX_LENGTH
    } else {
        RULES.content.max_length
    }
}

fn content(value: &str, max_length: usize, cx: &EvalContext<'_>) -> Verdict {
    string::check_with_max(&RULES.content, value, max_length, cx.translator)
}

/// Comma-separated tags, each checked on its own. The first bad tag wins.
pub fn tag_list(value: &str, cx: &EvalContext<'_>) -> Verdict {
    check_tags(&RULES.tag, value, cx.translator)
}

fn check_tags(rule: &RuleDefinition, value: &str, t: &dyn Translate) -> Verdict {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| string::check(rule, tag, t))
        .find(|verdict| !verdict.valid)
        .unwrap_or_default()
}

fn run_post_check(check: PostCheck, value: &str, cx: &EvalContext<'_>) -> Verdict {
    match check {
        PostCheck::GisFormatRequirement => gis_format_requirement(value, cx),
    }
}

/// GIS fields (reference number, coordinates, spatial cover, geodetic
/// reference system) required when the resource format is GeoJSON or SHP.
///
/// Disabled so resources in GIS formats can be saved before these fields
/// are filled in. Always valid.
fn gis_format_requirement(_value: &str, _cx: &EvalContext<'_>) -> Verdict {
    Verdict::valid()
}
