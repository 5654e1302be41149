//! fermidle CLI — play the daily order-of-magnitude trivia game.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fermidle",
    version,
    about = "Daily \"how many X fit into Y\" trivia game"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the question of the day
    Daily {
        #[command(flatten)]
        game: commands::GameArgs,

        /// Print the answer too
        #[arg(long)]
        reveal: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Submit a guess and get a hint
    Guess {
        /// Your guess (e.g. 5000 or 5e3)
        #[arg(allow_negative_numbers = true)]
        guess: f64,

        /// Which guess this is, starting at 1
        #[arg(long, default_value = "1")]
        attempt: u32,

        #[command(flatten)]
        game: commands::GameArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a question dataset
    Validate {
        /// Path to a question JSON file (default: config, then bundled dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List questions with their magnitude and difficulty
    List {
        /// Path to a question JSON file (default: config, then bundled dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sort order: difficulty, magnitude, none
        #[arg(long, default_value = "difficulty")]
        sort: String,
    },

    /// Import raw values from a tab-separated values sheet
    Import {
        /// The values sheet (TSV, one row per thing)
        sheet: PathBuf,

        /// Raw values JSON to write, keeping curation from its current entries
        #[arg(long)]
        values: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate ratio questions from a raw values file
    Generate {
        /// Raw values JSON
        #[arg(long)]
        values: Option<PathBuf>,

        /// Question JSON to extend
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of new questions
        #[arg(long)]
        count: Option<usize>,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,

        /// Compute derived values (e.g. density) before generating
        #[arg(long)]
        derive: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample values file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fermidle=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Daily { game, reveal, json } => commands::daily::execute(game, reveal, json),
        Commands::Guess {
            guess,
            attempt,
            game,
            json,
        } => commands::guess::execute(guess, attempt, game, json),
        Commands::Validate { dataset, config } => commands::validate::execute(dataset, config),
        Commands::List {
            dataset,
            config,
            sort,
        } => commands::list::execute(dataset, config, sort),
        Commands::Import {
            sheet,
            values,
            config,
        } => commands::import::execute(sheet, values, config),
        Commands::Generate {
            values,
            output,
            count,
            seed,
            derive,
            config,
        } => commands::generate::execute(values, output, count, seed, derive, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

