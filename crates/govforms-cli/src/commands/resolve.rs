use anyhow::{Context, Result};
use colored::Colorize;
use govforms_validation::{resolve, FieldName, FormConfig, RuleId, RuleKey, Validator};

pub fn execute(field: &str, resource: bool, contact: bool) -> Result<()> {
    let (key, rule) = lookup(field, resource, contact)?;

    println!("Field: {}", field.cyan());
    println!("Key:   {}", key.as_str());
    match rule {
        Some(rule) => println!("Rule:  {}", rule.to_string().green()),
        None => println!("Rule:  {}", "none (field is not validated)".yellow()),
    }

    Ok(())
}

/// Resolved key and rule for `field` on a form of the given kind
pub fn lookup(field: &str, resource: bool, contact: bool) -> Result<(RuleKey, Option<RuleId>)> {
    let name = FieldName::try_new(field)
        .map_err(|e| anyhow::anyhow!("{:?}", e))
        .with_context(|| format!("Invalid field name: {:?}", field))?;

    let config = if contact {
        FormConfig::contact()
    } else if resource {
        FormConfig::resource("resource-edit")
    } else {
        FormConfig::default()
    };

    let validator = Validator::untranslated(config);
    let key = resolve(&name, &validator.context_for(&name));
    Ok((key, validator.resolve(&name)))
}
