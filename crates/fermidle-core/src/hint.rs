//! Hint selection.
//!
//! After a wrong guess the player gets one of two hints:
//!
//! - a **closer** hint, which points at another question whose answer is about
//!   the size of the factor the guess is off by, or
//! - a **direction** hint, which just says "too high" or "too low" and by
//!   roughly how many powers of ten.
//!
//! Which one is served is a seeded draw, so a given day and attempt always
//! produce the same hint.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::difficulty::rank_by_difficulty;
use crate::error::FermidleError;
use crate::model::Question;
use crate::scientific::magnitude;

/// Message for a guess in the right order of magnitude.
pub const CORRECT_MESSAGE: &str = "Correct!";

/// Tuning knobs for hint selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfig {
    /// Chance of serving a closer hint when candidates exist.
    pub closer_probability: f64,
    /// Tolerance (in orders of magnitude) for a perfect-looking gap.
    pub base_tolerance: f64,
    /// Extra tolerance per order of magnitude the guess is off by.
    pub tolerance_scale: f64,
    /// Upper bound on the tolerance.
    pub max_tolerance: f64,
    /// How many of the easiest candidates are eligible.
    pub pool_size: usize,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            closer_probability: 0.6,
            base_tolerance: 0.5,
            tolerance_scale: 0.25,
            max_tolerance: 2.0,
            pool_size: 3,
        }
    }
}

impl HintConfig {
    /// Tolerance for a gap of `gap` orders of magnitude.
    pub fn tolerance(&self, gap: f64) -> f64 {
        (self.base_tolerance + self.tolerance_scale * gap.abs()).min(self.max_tolerance)
    }
}

/// Which side of the answer the guess landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    TooHigh,
    TooLow,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TooHigh => write!(f, "Too high!"),
            Direction::TooLow => write!(f, "Too low!"),
        }
    }
}

/// The kind of hint served.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintKind {
    /// The guess has the right order of magnitude.
    Correct,
    /// Plain "too high" / "too low", off by about `10^factor_magnitude`.
    Direction {
        direction: Direction,
        factor_magnitude: i32,
    },
    /// A question whose answer is about the size of the missing factor.
    Closer {
        direction: Direction,
        question: Question,
    },
}

/// A hint shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hint {
    #[serde(flatten)]
    pub kind: HintKind,
    pub message: String,
}

impl Hint {
    pub fn is_correct(&self) -> bool {
        matches!(self.kind, HintKind::Correct)
    }

    fn correct() -> Self {
        Self {
            kind: HintKind::Correct,
            message: CORRECT_MESSAGE.to_string(),
        }
    }

    fn direction(direction: Direction, gap: f64) -> Self {
        let factor_magnitude = (gap.abs().round() as i32).max(1);
        let adjust = match direction {
            Direction::TooHigh => "smaller",
            Direction::TooLow => "bigger",
        };
        Self {
            kind: HintKind::Direction {
                direction,
                factor_magnitude,
            },
            message: format!("{direction} Try about 10^{factor_magnitude} times {adjust}."),
        }
    }

    fn closer(direction: Direction, question: &Question) -> Self {
        Self {
            message: format!(
                "{direction} You're off by roughly the answer to \"{}\".",
                question.question
            ),
            kind: HintKind::Closer {
                direction,
                question: question.clone(),
            },
        }
    }
}

/// Choose a hint for `guess` against `question`.
///
/// `question` need not belong to `dataset`; when it does, it is never offered
/// as its own hint.
pub fn random_hint(
    dataset: &Dataset,
    question: &Question,
    guess: f64,
    rng: &mut impl Rng,
    config: &HintConfig,
) -> Result<Hint, FermidleError> {
    if !guess.is_finite() || guess <= 0.0 {
        return Err(FermidleError::InvalidGuess(guess));
    }
    if magnitude(guess)? == magnitude(question.answer)? {
        return Ok(Hint::correct());
    }

    let gap = question.answer.log10() - guess.log10();
    let direction = if guess > question.answer {
        Direction::TooHigh
    } else {
        Direction::TooLow
    };

    let target = gap.abs();
    let tolerance = config.tolerance(gap);
    let played = question.value_set();
    let candidates = dataset.questions().iter().filter(|q| {
        q.answer > 0.0
            && q.question != question.question
            && q.value_set() != played
            && (q.answer.log10().abs() - target).abs() <= tolerance
    });
    let ranked = rank_by_difficulty(candidates);
    let pool = &ranked[..ranked.len().min(config.pool_size.max(1))];

    let roll: f64 = rng.gen();
    debug!(
        gap,
        tolerance,
        candidates = ranked.len(),
        roll,
        "selecting hint"
    );

    if !pool.is_empty() && roll < config.closer_probability {
        let pick = pool[rng.gen_range(0..pool.len())];
        return Ok(Hint::closer(direction, pick));
    }
    Ok(Hint::direction(direction, gap))
}
