//! Difficulty heuristic for ranking hint candidates.
//!
//! Lower scores are easier. A good hint is a question the player can reason
//! about quickly, so small magnitudes, well-curated entries and short prompts
//! all rank first.

use std::cmp::Ordering;

use crate::model::Question;

/// Magnitude at which the spread term saturates.
const MAX_MAGNITUDE: f64 = 20.0;
/// Prompt length (in words) at which the wordiness term saturates.
const MAX_WORDS: f64 = 30.0;

const SPREAD_WEIGHT: f64 = 0.6;
const OBSCURITY_WEIGHT: f64 = 0.3;
const WORDINESS_WEIGHT: f64 = 0.1;

/// Score a question in `[0, 1]`.
pub fn difficulty(question: &Question) -> f64 {
    let spread = if question.answer > 0.0 && question.answer.is_finite() {
        (question.answer.log10().abs() / MAX_MAGNITUDE).min(1.0)
    } else {
        1.0
    };
    let obscurity = 1.0 - question.quality.clamp(0.0, 1.0);
    let words = question.question.split_whitespace().count() as f64;
    let wordiness = (words / MAX_WORDS).min(1.0);

    SPREAD_WEIGHT * spread + OBSCURITY_WEIGHT * obscurity + WORDINESS_WEIGHT * wordiness
}

/// Order two scored questions: easier first, ties broken by prompt text.
fn by_score(a: (f64, &Question), b: (f64, &Question)) -> Ordering {
    a.0.total_cmp(&b.0)
        .then_with(|| a.1.question.cmp(&b.1.question))
}

/// Total order on questions by difficulty, ties broken by prompt text.
pub fn compare_difficulty(a: &Question, b: &Question) -> Ordering {
    by_score((difficulty(a), a), (difficulty(b), b))
}

/// Sort questions from easiest to hardest.
///
/// Each question is scored once; the order matches [`compare_difficulty`].
pub fn rank_by_difficulty<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Vec<&'a Question> {
    let mut ranked: Vec<(f64, &Question)> = questions
        .into_iter()
        .map(|q| (difficulty(q), q))
        .collect();
    ranked.sort_by(|a, b| by_score(*a, *b));
    ranked.into_iter().map(|(_, q)| q).collect()
}
