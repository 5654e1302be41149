//! The `fermidle import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use fermidle_core::clean::{merge_existing, parse_values};
use fermidle_core::config::load_config_from;
use fermidle_core::dataset::{load_values, save_values};

pub fn execute(
    sheet: PathBuf,
    values_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let values_path = values_path.unwrap_or(config.values);

    let content = std::fs::read_to_string(&sheet)
        .with_context(|| format!("failed to read values sheet: {}", sheet.display()))?;
    let imported =
        parse_values(&content).with_context(|| format!("in {}", sheet.display()))?;
    anyhow::ensure!(
        !imported.values.is_empty(),
        "no readable values in {}",
        sheet.display()
    );

    let existing = load_values(&values_path)?;
    let mut values = imported.values;
    let kept = merge_existing(&mut values, &existing);

    for b in &imported.broken {
        println!("  WARNING: unreadable {} of {}: {:?}", b.measurement, b.thing, b.text);
    }
    save_values(&values_path, &values)?;

    println!(
        "Imported {} value(s) ({} kept from existing, {} unreadable)",
        values.len(),
        kept,
        imported.broken.len()
    );
    println!("Saved to: {}", values_path.display());
    Ok(())
}
