//! The `fermidle validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(dataset_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (source, dataset) = super::load_dataset(dataset_path, config_path.as_deref())?;

    println!("Dataset: {source} ({} questions)", dataset.len());

    let warnings = dataset.validate();
    for w in &warnings {
        let prefix = w
            .index
            .map(|i| format!("  [#{i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
