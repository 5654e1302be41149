//! The `fermidle daily` command.

use anyhow::Result;
use serde::Serialize;

use fermidle_core::model::Question;
use fermidle_core::question::seeded_question;
use fermidle_core::scientific::scientific;

use super::GameArgs;

#[derive(Serialize)]
struct DailyOutput<'a> {
    seed: u64,
    question: &'a Question,
}

pub fn execute(game: GameArgs, reveal: bool, json: bool) -> Result<()> {
    let config = game.config()?;
    let dataset = game.dataset(&config)?;
    let seed = game.seed();
    let question = seeded_question(&dataset, seed)?;

    if json {
        let output = DailyOutput { seed, question };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Fermidle #{seed}");
    println!();
    println!("{}", question.question);
    for value in &question.values {
        println!("  - {}: {}", value.name, value.value);
    }

    if reveal {
        let answer = scientific(question.answer, 2)?;
        println!();
        println!("Answer: {} ({answer})", question.answer);
    } else {
        println!();
        println!("Guess with: fermidle guess <NUMBER> --seed {seed}");
    }

    Ok(())
}
