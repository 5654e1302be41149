//! Ratio-question generator.
//!
//! Turns raw measured values into "what is the ratio of A to B" questions.
//! Two values are comparable when they share a measurement and units but
//! describe different things.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::FermidleError;
use crate::model::{Question, RawValue};

/// Style tag for generated ratio questions.
pub const RATIO_STYLE: &str = "ratio";

/// Ratios below this magnitude are usually flipped.
const SMALL_RATIO_MAGNITUDE: f64 = -3.0;

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// How many new questions to produce.
    pub count: usize,
    /// Consecutive duplicate draws before giving up.
    pub max_tries: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            count: 20,
            max_tries: 1_000_000,
        }
    }
}

/// Result of a generator run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Existing questions followed by the new ones.
    pub questions: Vec<Question>,
    /// Number of new questions.
    pub added: usize,
}

/// Generate up to `options.count` new ratio questions on top of `existing`.
///
/// Fails with [`FermidleError::NoComparablePair`] when no two named values
/// can be compared.
pub fn generate_questions(
    values: &[RawValue],
    existing: Vec<Question>,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
) -> Result<Generation, FermidleError> {
    let named: Vec<&RawValue> = values
        .iter()
        .filter(|v| !v.name.trim().is_empty())
        .filter(|v| v.quantity.value.is_finite() && v.quantity.value > 0.0)
        .collect();
    if named.len() < values.len() {
        debug!(
            skipped = values.len() - named.len(),
            "skipping unnamed or non-positive values"
        );
    }

    // Every value that has at least one partner, with its partners.
    let sources: Vec<(&RawValue, Vec<&RawValue>)> = named
        .iter()
        .map(|a| {
            let partners = named
                .iter()
                .filter(|b| a.comparable_with(b))
                .copied()
                .collect::<Vec<_>>();
            (*a, partners)
        })
        .filter(|(_, partners)| !partners.is_empty())
        .collect();
    if sources.is_empty() {
        return Err(FermidleError::NoComparablePair { pool: named.len() });
    }

    let mut keys: HashSet<_> = existing.iter().map(Question::key).collect();
    let mut questions = existing;
    let mut added = 0;
    let mut tries = 0;
    let generated_at = chrono::Utc::now().to_rfc3339();

    while added < options.count && tries < options.max_tries {
        tries += 1;
        let (first, partners) = &sources[rng.gen_range(0..sources.len())];
        let second = partners[rng.gen_range(0..partners.len())];

        let (a, b) = orient(first, second, rng)?;
        let question = ratio_question(a, b, &generated_at)?;
        if keys.insert(question.key()) {
            debug!(question = %question.question, answer = question.answer, "generated question");
            questions.push(question);
            added += 1;
            tries = 0;
        }
    }

    if added < options.count {
        warn!(
            added,
            requested = options.count,
            "ran out of unique pairs"
        );
    }
    info!(added, total = questions.len(), "generated questions");

    Ok(Generation { questions, added })
}

/// Order a pair so that tiny fractions are usually flipped into big ratios.
///
/// A ratio of magnitude `m < -3` is kept with probability `2^(m/4)`.
fn orient<'a>(
    first: &'a RawValue,
    second: &'a RawValue,
    rng: &mut impl Rng,
) -> Result<(&'a RawValue, &'a RawValue), FermidleError> {
    let magnitude = first.quantity.ratio(&second.quantity)?.log10();
    if magnitude < SMALL_RATIO_MAGNITUDE && rng.gen::<f64>() > 2f64.powf(magnitude / 4.0) {
        return Ok((second, first));
    }
    Ok((first, second))
}

fn ratio_question(a: &RawValue, b: &RawValue, generated: &str) -> Result<Question, FermidleError> {
    Ok(Question {
        question: format!("What is the ratio of the *{}* to the *{}*", a.name, b.name),
        answer: a.quantity.ratio(&b.quantity)?,
        values: vec![a.to_value(), b.to_value()],
        quality: 1.0,
        measurement: a.measurement.clone(),
        style: RATIO_STYLE.to_string(),
        generated: generated.to_string(),
    })
}
