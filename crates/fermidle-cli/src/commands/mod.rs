//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use fermidle_core::config::{load_config_from, FermidleConfig};
use fermidle_core::dataset::Dataset;
use fermidle_core::seed::{daily_seed, today_seed};

pub mod daily;
pub mod generate;
pub mod guess;
pub mod import;
pub mod init;
pub mod list;
pub mod validate;

/// Options shared by the commands that play a game.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Play the game for this date (YYYY-MM-DD, default: today in UTC)
    #[arg(long, value_parser = parse_date, conflicts_with = "seed")]
    pub date: Option<NaiveDate>,

    /// Play the game for an explicit seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a question JSON file (default: config, then bundled dataset)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GameArgs {
    /// The seed this game runs on.
    pub fn seed(&self) -> u64 {
        match (self.seed, self.date) {
            (Some(seed), _) => seed,
            (None, Some(date)) => daily_seed(date),
            (None, None) => today_seed(),
        }
    }

    pub fn config(&self) -> Result<FermidleConfig> {
        load_config_from(self.config.as_deref())
    }

    /// The dataset from `--dataset`, the config, or the bundled questions.
    pub fn dataset(&self, config: &FermidleConfig) -> Result<Dataset> {
        let path = self.dataset.as_deref().or(config.dataset.as_deref());
        Dataset::load_or_bundled(path)
    }
}

/// Parse `YYYY-MM-DD`.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// Load the dataset from `path`, else the config (file or `FERMIDLE_DATASET`),
/// else the bundled questions. Returns a label for the source too.
pub fn load_dataset(path: Option<PathBuf>, config: Option<&Path>) -> Result<(String, Dataset)> {
    let config = load_config_from(config)?;
    let path = path.or(config.dataset);
    let source = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());
    Ok((source, Dataset::load_or_bundled(path.as_deref())?))
}
