//! Question and value file loading.
//!
//! Datasets are JSON arrays of questions, loaded once and read-only
//! afterwards. The bundled dataset is compiled into the crate so the game
//! works without any files on disk.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::model::{Question, RawValue};

const BUNDLED: &str = include_str!("../data/questions.json");

/// An immutable, validated collection of questions.
#[derive(Debug, Clone)]
pub struct Dataset {
    questions: Vec<Question>,
}

impl Dataset {
    /// Build a dataset, enforcing the positive-answer and non-empty-values
    /// invariants on every question.
    pub fn new(mut questions: Vec<Question>) -> Result<Self, crate::FermidleError> {
        for (index, question) in questions.iter_mut().enumerate() {
            question.normalize();
            question.check(index)?;
        }
        Ok(Self { questions })
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let questions: Vec<Question> =
            serde_json::from_str(content).context("failed to parse question JSON")?;
        Ok(Self::new(questions)?)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset: {}", path.display()))?;
        let dataset = Self::from_json(&content)
            .with_context(|| format!("invalid dataset: {}", path.display()))?;
        info!(
            path = %path.display(),
            questions = dataset.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// The dataset compiled into this crate.
    pub fn bundled() -> Result<Self> {
        let dataset = Self::from_json(BUNDLED).context("bundled dataset is invalid")?;
        debug!(questions = dataset.len(), "loaded bundled dataset");
        Ok(dataset)
    }

    /// Load from `path` if given, otherwise fall back to the bundled dataset.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::bundled(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Check the dataset for soft issues that don't block loading.
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let mut seen_keys = HashSet::new();
        let mut seen_prompts = HashSet::new();
        for (index, q) in self.questions.iter().enumerate() {
            if !seen_keys.insert(q.key()) {
                warnings.push(ValidationWarning::at(
                    index,
                    "duplicate question: same style and values as an earlier entry",
                ));
            }
            if !seen_prompts.insert(q.question.to_lowercase()) {
                warnings.push(ValidationWarning::at(
                    index,
                    format!("duplicate prompt: {}", q.question),
                ));
            }
        }

        for (index, q) in self.questions.iter().enumerate() {
            if q.question.is_empty() {
                warnings.push(ValidationWarning::at(index, "prompt is empty"));
            }
            if !(0.0..=1.0).contains(&q.quality) {
                warnings.push(ValidationWarning::at(
                    index,
                    format!("quality {} is outside 0..=1", q.quality),
                ));
            }
            if q.values.iter().any(|v| v.name.trim().is_empty()) {
                warnings.push(ValidationWarning::at(index, "a value has no name"));
            }
        }

        let missing_images = self
            .questions
            .iter()
            .flat_map(|q| &q.values)
            .filter(|v| v.image.is_none())
            .count();
        if missing_images > 0 {
            warnings.push(ValidationWarning {
                index: None,
                message: format!("{missing_images} value(s) have no image"),
            });
        }

        warnings
    }
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Index of the offending question (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            message: message.into(),
        }
    }
}

/// Load raw values for the generator. A missing file yields no values.
pub fn load_values(path: &Path) -> Result<Vec<RawValue>> {
    if !path.exists() {
        debug!(path = %path.display(), "values file not found");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read values: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse values: {}", path.display()))
}

/// Write raw values as pretty JSON, in the order given.
pub fn save_values(path: &Path, values: &[RawValue]) -> Result<()> {
    let json = serde_json::to_string_pretty(values).context("failed to serialize values")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write values to {}", path.display()))?;
    Ok(())
}

/// Load previously generated questions. A missing file yields no questions.
///
/// Unlike [`Dataset::load`] this does not reject invalid entries, so a
/// partially curated file can still be extended.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read questions: {}", path.display()))?;
    let mut questions: Vec<Question> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse questions: {}", path.display()))?;
    for q in &mut questions {
        q.normalize();
    }
    Ok(questions)
}

/// Write questions as pretty JSON, best quality first, then by prompt.
pub fn save_questions(path: &Path, questions: &[Question]) -> Result<()> {
    let mut sorted: Vec<&Question> = questions.iter().collect();
    sorted.sort_by(|a, b| {
        (1.0 - a.quality)
            .total_cmp(&(1.0 - b.quality))
            .then_with(|| a.question.cmp(&b.question))
    });
    let json = serde_json::to_string_pretty(&sorted).context("failed to serialize questions")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write questions to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantity;

    const SMALL: &str = r#"[
        {"question": "Q: How many golf balls reach the top of the Eiffel tower?",
         "answer": 7728,
         "values": [{"value": "0.043 m", "name": "golf ball"}, {"value": "330 m", "name": "Eiffel tower"}]},
        {"question": "How many cats weigh as much as a blue whale?",
         "answer": 33330,
         "quality": 0.7,
         "values": [{"value": "4.5 kg", "name": "house cat", "image": "cat.png"}]}
    ]"#;

    #[test]
    fn bundled_dataset_loads() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.len(), 24);
        assert!(dataset.questions().iter().all(|q| q.answer > 0.0));
        assert!(dataset.questions().iter().all(|q| !q.values.is_empty()));
    }

    #[test]
    fn bundled_dataset_has_no_duplicates() {
        let dataset = Dataset::bundled().unwrap();
        let warnings = dataset.validate();
        assert!(
            warnings.iter().all(|w| w.index.is_none()),
            "unexpected warnings: {warnings:?}"
        );
    }

    #[test]
    fn parse_small_dataset() {
        let dataset = Dataset::from_json(SMALL).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.questions()[0].question,
            "How many golf balls reach the top of the Eiffel tower?"
        );
        assert_eq!(dataset.questions()[1].quality, 0.7);
        assert_eq!(
            dataset.questions()[1].values[0].image.as_deref(),
            Some("cat.png")
        );
    }

    #[test]
    fn rejects_non_positive_answer() {
        let json = r#"[{"question": "x", "answer": -2, "values": [{"value": "1", "name": "a"}]}]"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("answer must be positive"));
    }

    #[test]
    fn rejects_empty_values() {
        let json = r#"[{"question": "x", "answer": 2, "values": []}]"#;
        assert!(Dataset::from_json(json).is_err());
    }

    #[test]
    fn parse_malformed_json() {
        assert!(Dataset::from_json("[{not json").is_err());
    }

    #[test]
    fn validate_flags_duplicates() {
        let json = r#"[
            {"question": "Same?", "answer": 2, "values": [{"value": "1", "name": "a"}]},
            {"question": "same?", "answer": 3, "values": [{"value": "1", "name": "a"}]}
        ]"#;
        let dataset = Dataset::from_json(json).unwrap();
        let warnings = dataset.validate();
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate prompt")));
        assert!(warnings.iter().any(|w| w.message.contains("no image")));
    }

    #[test]
    fn load_missing_files_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_values(&dir.path().join("values.json")).unwrap().is_empty());
        assert!(load_questions(&dir.path().join("q.json")).unwrap().is_empty());
        assert!(Dataset::load(&dir.path().join("q.json")).is_err());
    }

    #[test]
    fn save_orders_by_quality_then_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/questions.json");
        let mut questions = Dataset::from_json(SMALL).unwrap().questions().to_vec();
        questions[0].quality = 0.5;
        save_questions(&path, &questions).unwrap();

        let reloaded = load_questions(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].quality, 0.7);
        assert_eq!(reloaded[1].quality, 0.5);
    }

    #[test]
    fn values_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("values.json");
        let values = vec![
            RawValue::new("Eiffel tower", "length", Quantity::new(330.0, "m"))
                .named("height of the Eiffel tower"),
            RawValue::new("Golf ball", "length", Quantity::new(0.0427, "m"))
                .with_specifier("diameter"),
        ];
        save_values(&path, &values).unwrap();
        let loaded = load_values(&path).unwrap();
        assert_eq!(loaded, values);
    }
}
