//! Core data model types for fermidle.
//!
//! A [`Question`] is what the player sees; a [`RawValue`] is a measured fact
//! from the values file that the generator turns into questions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FermidleError;
use crate::scientific::scientific;

/// One displayed quantity in a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    /// Display string, e.g. "330 m".
    pub value: String,
    /// Display name, e.g. "height of the Eiffel tower".
    pub name: String,
    /// Optional image reference (URL or bundled asset path).
    #[serde(default)]
    pub image: Option<String>,
    /// The thing being measured, e.g. "Eiffel tower".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thing: String,
    /// Kind of measurement, e.g. "length".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub measurement: String,
    /// Qualifier within the measurement, e.g. "max depth".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub specifier: String,
}

impl Value {
    /// Identity of the underlying fact: (thing, measurement, specifier).
    ///
    /// Values without provenance fall back to their display name.
    pub fn key(&self) -> (String, String, String) {
        if self.thing.is_empty() {
            return (self.name.clone(), self.measurement.clone(), String::new());
        }
        (
            self.thing.clone(),
            self.measurement.clone(),
            self.specifier.clone(),
        )
    }
}

/// A single trivia question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the player.
    pub question: String,
    /// The correct answer. Always positive.
    pub answer: f64,
    /// The quantities the question compares.
    pub values: Vec<Value>,
    /// Curation score in 0..=1.
    #[serde(default = "default_quality")]
    pub quality: f64,
    /// Kind of measurement the values share.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub measurement: String,
    /// Generation style, e.g. "ratio".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    /// When the question was generated.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub generated: String,
}

fn default_quality() -> f64 {
    1.0
}

/// Identity of a question: its style plus the keys of its values.
pub type QuestionKey = (String, Vec<(String, String, String)>);

impl Question {
    /// Key used to detect duplicate questions.
    pub fn key(&self) -> QuestionKey {
        (
            self.style.clone(),
            self.values.iter().map(Value::key).collect(),
        )
    }

    /// The facts a question compares, ignoring order. "A to B" and "B to A"
    /// share a value set.
    pub fn value_set(&self) -> BTreeSet<(String, String, String)> {
        self.values.iter().map(Value::key).collect()
    }

    /// Strip the "Q: " prefix some curated entries carry.
    pub(crate) fn normalize(&mut self) {
        if let Some(stripped) = self.question.strip_prefix("Q: ") {
            self.question = stripped.to_string();
        }
        self.question = self.question.trim().to_string();
    }

    /// Check the load-time invariants: positive answer, at least one value.
    pub fn check(&self, index: usize) -> Result<(), FermidleError> {
        if !self.answer.is_finite() || self.answer <= 0.0 {
            return Err(FermidleError::InvalidQuestion {
                index,
                reason: format!("answer must be positive, got {}", self.answer),
            });
        }
        if self.values.is_empty() {
            return Err(FermidleError::InvalidQuestion {
                index,
                reason: "question has no values".into(),
            });
        }
        Ok(())
    }
}

/// A number with units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    #[serde(default)]
    pub units: String,
}

impl Quantity {
    pub fn new(value: f64, units: impl Into<String>) -> Self {
        Self {
            value,
            units: units.into(),
        }
    }

    /// Divide two quantities with identical units, yielding a plain ratio.
    pub fn ratio(&self, other: &Quantity) -> Result<f64, FermidleError> {
        if self.units != other.units {
            return Err(FermidleError::UnitMismatch {
                left: self.units.clone(),
                right: other.units.clone(),
            });
        }
        if other.value == 0.0 {
            return Err(FermidleError::InvalidValue(other.value));
        }
        Ok(self.value / other.value)
    }

    /// Compact human-readable rendering, e.g. "330 m" or "5.97e24 kg".
    pub fn display(&self) -> String {
        let number = format_number(self.value);
        if self.units.is_empty() {
            number
        } else {
            format!("{number} {}", self.units)
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn format_number(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-3..1e6).contains(&abs) {
        if let Ok(s) = scientific(abs, 3) {
            let sign = if value < 0.0 { "-" } else { "" };
            let base = s.base.trim_end_matches('0').trim_end_matches('.');
            return format!("{sign}{base}e{}", s.magnitude);
        }
    }
    let fixed = format!("{value:.3}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A measured fact from the raw values file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawValue {
    #[serde(rename = "value")]
    pub quantity: Quantity,
    /// Human name used in question prompts. Unnamed values are not used.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub measurement: String,
    #[serde(default)]
    pub thing: String,
    #[serde(default)]
    pub specifier: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub quality: f64,
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub image: String,
}

impl RawValue {
    pub fn new(
        thing: impl Into<String>,
        measurement: impl Into<String>,
        quantity: Quantity,
    ) -> Self {
        Self {
            quantity,
            name: String::new(),
            measurement: measurement.into(),
            thing: thing.into(),
            specifier: String::new(),
            note: String::new(),
            quality: 0.0,
            generated: String::new(),
            image: String::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_specifier(mut self, specifier: impl Into<String>) -> Self {
        self.specifier = specifier.into();
        self
    }

    pub fn key(&self) -> (String, String, String) {
        (
            self.thing.clone(),
            self.measurement.clone(),
            self.specifier.clone(),
        )
    }

    /// Whether the two values can be divided into a meaningful ratio.
    pub fn comparable_with(&self, other: &RawValue) -> bool {
        self.measurement == other.measurement
            && self.thing != other.thing
            && self.quantity.units == other.quantity.units
    }

    /// The display form embedded in generated questions.
    pub fn to_value(&self) -> Value {
        Value {
            value: self.quantity.display(),
            name: self.name.clone(),
            image: (!self.image.is_empty()).then(|| self.image.clone()),
            thing: self.thing.clone(),
            measurement: self.measurement.clone(),
            specifier: self.specifier.clone(),
        }
    }
}
