//! Question picking.

use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::FermidleError;
use crate::model::Question;
use crate::seed::{daily_seed, question_rng};

/// Pick a question uniformly at random.
pub fn random_question<'a>(
    dataset: &'a Dataset,
    rng: &mut impl Rng,
) -> Result<&'a Question, FermidleError> {
    if dataset.is_empty() {
        return Err(FermidleError::EmptyDataset);
    }
    let index = rng.gen_range(0..dataset.len());
    debug!(index, total = dataset.len(), "picked question");
    Ok(&dataset.questions()[index])
}

/// The question served for `seed`. Every call with the same seed and dataset
/// returns the same question.
pub fn seeded_question(dataset: &Dataset, seed: u64) -> Result<&Question, FermidleError> {
    random_question(dataset, &mut question_rng(seed))
}

/// The question of the day for `date`.
pub fn daily_question(dataset: &Dataset, date: NaiveDate) -> Result<&Question, FermidleError> {
    seeded_question(dataset, daily_seed(date))
}
