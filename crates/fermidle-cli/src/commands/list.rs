//! The `fermidle list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use fermidle_core::difficulty::{compare_difficulty, difficulty};
use fermidle_core::model::Question;
use fermidle_core::scientific::{magnitude, scientific};

pub fn execute(
    dataset_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    sort: String,
) -> Result<()> {
    let (_, dataset) = super::load_dataset(dataset_path, config_path.as_deref())?;

    let mut rows: Vec<&Question> = dataset.questions().iter().collect();
    match sort.as_str() {
        "difficulty" => rows.sort_by(|a, b| compare_difficulty(a, b)),
        "magnitude" => rows.sort_by(|a, b| a.answer.total_cmp(&b.answer)),
        "none" => {}
        other => anyhow::bail!("unknown sort order: '{other}' (expected difficulty, magnitude, none)"),
    }

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Magnitude", "Difficulty"]);
    for q in rows {
        table.add_row(vec![
            Cell::new(&q.question),
            Cell::new(scientific(q.answer, 2)?.to_string()),
            Cell::new(magnitude(q.answer)?),
            Cell::new(format!("{:.2}", difficulty(q))),
        ]);
    }

    println!("{table}");
    println!("{} questions", dataset.len());
    Ok(())
}
