//! govforms validation WASM
//!
//! WebAssembly bindings for the portal's form validation.
//! The page glue serializes the form (see `FormSnapshot`), calls one of the
//! functions below, and applies each returned effect with
//! `document.querySelector(effect.selector).setCustomValidity(effect.message)`.

use govforms_validation::{
    Catalog, Effect, FieldEvent, FieldName, FieldOutcome, FormConfig, FormSnapshot, Validator,
};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn validator(config: JsValue, catalog: JsValue) -> Result<Validator<Catalog>, JsValue> {
    let config: FormConfig = if config.is_undefined() || config.is_null() {
        FormConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse form config: {}", e)))?
    };
    let catalog: Option<Catalog> = serde_wasm_bindgen::from_value(catalog)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse message catalog: {}", e)))?;

    Ok(Validator::new(config, catalog.unwrap_or_default()))
}

fn snapshot(value: JsValue) -> Result<FormSnapshot, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form snapshot: {}", e)))
}

/// Validate a single changed field
///
/// # Returns
/// The effect to apply, or `null` if the field has no rule
///
/// # Example (JavaScript)
/// ```javascript
/// const effect = validateField(
///     { form_id: 'dataset-edit', is_resource: 'False' },
///     { name: 'title', value: '' },
///     collectSnapshot(form),
///     catalog,
/// );
/// if (effect) {
///     document.querySelector(effect.selector).setCustomValidity(effect.message);
/// }
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(
    config: JsValue,
    event: JsValue,
    form: JsValue,
    catalog: JsValue,
) -> Result<JsValue, JsValue> {
    let validator = validator(config, catalog)?;
    let event: FieldEvent = serde_wasm_bindgen::from_value(event)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse field event: {}", e)))?;
    let form = snapshot(form)?;

    match validator.validate_field(&event, &form) {
        Ok(effect) => Ok(serde_wasm_bindgen::to_value(&effect)?),
        Err(err) => {
            web_sys::console::debug_1(&JsValue::from_str(&err.to_string()));
            Ok(JsValue::NULL)
        }
    }
}

/// Validate a batch of field events, e.g. on submit
///
/// `events` may be `undefined`, in which case every field of the snapshot is
/// validated.
///
/// # Returns
/// Array of outcomes, one per event, each either
/// `{status: "applied", ...effect}` or `{status: "skipped", field, reason}`
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(
    config: JsValue,
    events: JsValue,
    form: JsValue,
    catalog: JsValue,
) -> Result<JsValue, JsValue> {
    let validator = validator(config, catalog)?;
    let form = snapshot(form)?;
    let events: Vec<FieldEvent> = if events.is_undefined() || events.is_null() {
        form.events()
    } else {
        serde_wasm_bindgen::from_value(events)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse field events: {}", e)))?
    };

    let outcomes = validator.validate_batch(&events, &form);
    for outcome in &outcomes {
        if let FieldOutcome::Skipped { reason, .. } = outcome {
            web_sys::console::debug_1(&JsValue::from_str(reason));
        }
    }
    Ok(serde_wasm_bindgen::to_value(&outcomes)?)
}

/// Re-check the tag input after a tag chip was removed
#[wasm_bindgen(js_name = onTagChipRemoved)]
pub fn on_tag_chip_removed(
    config: JsValue,
    form: JsValue,
    catalog: JsValue,
) -> Result<JsValue, JsValue> {
    let validator = validator(config, catalog)?;
    let form = snapshot(form)?;
    let effect: Effect = validator.on_tag_chip_removed(&form);
    Ok(serde_wasm_bindgen::to_value(&effect)?)
}

/// Selectors the page glue needs to collect a snapshot and bind its handlers
///
/// # Example (JavaScript)
/// ```javascript
/// const selectors = formSelectors(config);
/// const slug = document.querySelector(selectors.slug_preview);
/// document.querySelectorAll(selectors.tag_chip)
///     .forEach((chip) => chip.addEventListener('click', onChipClick));
/// ```
#[wasm_bindgen(js_name = formSelectors)]
pub fn form_selectors(config: JsValue) -> Result<JsValue, JsValue> {
    let validator = validator(config, JsValue::UNDEFINED)?;
    Ok(serde_wasm_bindgen::to_value(&validator.config().selectors)?)
}

/// Rule key a field name resolves to, or `undefined` if none applies
#[wasm_bindgen(js_name = resolveRule)]
pub fn resolve_rule(field_name: &str, is_resource_form: bool) -> Option<String> {
    let name = FieldName::try_new(field_name).ok()?;
    let config = FormConfig {
        is_resource_form,
        ..FormConfig::default()
    };
    Validator::untranslated(config)
        .resolve(&name)
        .map(|rule| rule.key().to_string())
}
