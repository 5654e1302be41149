//! Deterministic random sources.
//!
//! Every player gets the same question on the same day, so all randomness is
//! derived from a single seed. Question picking and hint picking draw from
//! separate streams: asking for a hint never changes which question is served.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

const QUESTION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;
const HINT_STREAM: u64 = 0xC2B2_AE3D_27D4_EB4F;

/// Seed for a calendar date, encoded as the integer `YYYYMMDD`.
pub fn daily_seed(date: NaiveDate) -> u64 {
    let year = date.year().max(0) as u64;
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

/// Seed for today's date in UTC.
pub fn today_seed() -> u64 {
    daily_seed(chrono::Utc::now().date_naive())
}

/// Random stream used to pick the question for `seed`.
pub fn question_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ QUESTION_STREAM)
}

/// Random stream used for the hint after the `attempt`-th guess.
pub fn hint_rng(seed: u64, attempt: u32) -> StdRng {
    let stream = HINT_STREAM.wrapping_add(u64::from(attempt).wrapping_mul(QUESTION_STREAM));
    StdRng::seed_from_u64(seed ^ stream)
}
