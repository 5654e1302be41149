//! The `fermidle generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fermidle_core::config::load_config_from;
use fermidle_core::dataset::{load_questions, load_values, save_questions};
use fermidle_core::derive::derive_values;
use fermidle_core::generator::{generate_questions, GeneratorOptions};

pub fn execute(
    values_path: Option<PathBuf>,
    output: Option<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    derive: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let values_path = values_path.unwrap_or(config.values);
    let output = output.unwrap_or(config.questions_output);
    let options = GeneratorOptions {
        count: count.unwrap_or(config.generator.count),
        ..config.generator
    };

    let mut values = load_values(&values_path)?;
    anyhow::ensure!(
        !values.is_empty(),
        "no values found in {}",
        values_path.display()
    );
    if derive {
        values = derive_values(values);
    }

    let existing = load_questions(&output)?;
    let before = existing.len();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generation = generate_questions(&values, existing, &options, &mut rng)
        .with_context(|| format!("cannot generate questions from {}", values_path.display()))?;

    save_questions(&output, &generation.questions)?;

    println!(
        "Generated {} new question(s) ({} existing, {} total)",
        generation.added,
        before,
        generation.questions.len()
    );
    println!("Saved to: {}", output.display());
    Ok(())
}
