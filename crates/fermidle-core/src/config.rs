//! Game configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::GeneratorOptions;
use crate::hint::HintConfig;

/// Environment variable that overrides the dataset path.
pub const DATASET_ENV: &str = "FERMIDLE_DATASET";

/// Top-level fermidle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermidleConfig {
    /// Question dataset. `None` uses the bundled questions.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    /// Raw values file consumed by `generate`.
    #[serde(default = "default_values")]
    pub values: PathBuf,
    /// Where `generate` writes questions.
    #[serde(default = "default_questions_output")]
    pub questions_output: PathBuf,
    /// Hint selection tuning.
    #[serde(default)]
    pub hint: HintConfig,
    /// Generator settings.
    #[serde(default)]
    pub generator: GeneratorOptions,
}

fn default_values() -> PathBuf {
    PathBuf::from("data/values.json")
}

fn default_questions_output() -> PathBuf {
    PathBuf::from("questions.json")
}

impl Default for FermidleConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            values: default_values(),
            questions_output: default_questions_output(),
            hint: HintConfig::default(),
            generator: GeneratorOptions::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        // Substituted text is never rescanned.
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `fermidle.toml` in the current directory
/// 2. `~/.config/fermidle/config.toml`
///
/// `FERMIDLE_DATASET` overrides the dataset path.
pub fn load_config() -> Result<FermidleConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FermidleConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fermidle.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => parse_config_file(path)?,
        None => FermidleConfig::default(),
    };
    debug!(path = ?config_path, "loaded config");

    if let Ok(dataset) = std::env::var(DATASET_ENV) {
        if !dataset.is_empty() {
            config.dataset = Some(PathBuf::from(dataset));
        }
    }

    config.dataset = config.dataset.as_deref().map(resolve_path);
    config.values = resolve_path(&config.values);
    config.questions_output = resolve_path(&config.questions_output);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<FermidleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<FermidleConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fermidle"))
}
