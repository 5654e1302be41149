//! The `fermidle guess` command.

use anyhow::Result;
use serde::Serialize;

use fermidle_core::hint::{random_hint, Hint};
use fermidle_core::question::seeded_question;
use fermidle_core::scientific::scientific;
use fermidle_core::seed::hint_rng;

use super::GameArgs;

#[derive(Serialize)]
struct GuessOutput<'a> {
    seed: u64,
    attempt: u32,
    guess: f64,
    hint: &'a Hint,
}

pub fn execute(guess: f64, attempt: u32, game: GameArgs, json: bool) -> Result<()> {
    anyhow::ensure!(attempt >= 1, "attempt must be at least 1");

    let config = game.config()?;
    let dataset = game.dataset(&config)?;
    let seed = game.seed();
    let question = seeded_question(&dataset, seed)?;

    let mut rng = hint_rng(seed, attempt);
    let hint = random_hint(&dataset, question, guess, &mut rng, &config.hint)?;
    tracing::debug!(seed, attempt, correct = hint.is_correct(), "served hint");

    if json {
        let output = GuessOutput {
            seed,
            attempt,
            guess,
            hint: &hint,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", hint.message);
    if hint.is_correct() {
        let answer = scientific(question.answer, 2)?;
        println!("The answer was {} ({answer}).", question.answer);
    }

    Ok(())
}
