use anyhow::{Context, Result};
use colored::Colorize;
use govforms_validation::{Catalog, FieldOutcome, FormConfig, FormSnapshot, Validator};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn execute(config: &Path, snapshot: &Path, catalog: Option<&Path>, json: bool) -> Result<()> {
    let outcomes = run(config, snapshot, catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_report(&outcomes);
    }

    let failed = outcomes.iter().filter(|o| o.is_invalid()).count();
    if failed > 0 {
        anyhow::bail!("{} field(s) failed validation", failed);
    }

    Ok(())
}

/// Load the inputs and validate every field of the snapshot
pub fn run(config: &Path, snapshot: &Path, catalog: Option<&Path>) -> Result<Vec<FieldOutcome>> {
    let config = FormConfig::load(config)?;

    let content = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read form snapshot: {:?}", snapshot))?;
    let snapshot = FormSnapshot::from_json(&content)
        .with_context(|| format!("Failed to load form snapshot: {:?}", snapshot))?;

    let catalog = match catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default(),
    };

    info!(
        form = %config.form_id,
        fields = snapshot.fields.len(),
        messages = catalog.len(),
        "checking form"
    );

    let validator = Validator::new(config, catalog);
    Ok(validator.validate_batch(&snapshot.events(), &snapshot))
}

fn print_report(outcomes: &[FieldOutcome]) {
    println!("{}", "Checking form...".green().bold());
    println!();

    for outcome in outcomes {
        match outcome {
            FieldOutcome::Applied(effect) if effect.is_valid() => {
                println!("  {} {} ({})", "✓".green(), effect.field, effect.rule);
            }
            FieldOutcome::Applied(effect) => {
                println!(
                    "  {} {} ({}): {}",
                    "✗".red(),
                    effect.field,
                    effect.rule,
                    effect.message.yellow()
                );
            }
            FieldOutcome::Skipped { field, reason } => {
                println!("  {} {} {}", "-".dimmed(), field, reason.dimmed());
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_invalid()).count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, FieldOutcome::Skipped { .. }))
        .count();

    println!();
    if failed == 0 {
        println!("{}", "All fields valid!".green().bold());
    } else {
        println!("{}", format!("{} invalid", failed).red().bold());
    }
    println!("Skipped: {}", skipped);
}
