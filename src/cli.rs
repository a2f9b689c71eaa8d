use clap::Parser;
use std::path::PathBuf;

use crate::config::Ranking;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find recipes for what is in your pantry", long_about = None)]
pub struct Cli {
    /// Pantry ingredient to search with (repeatable)
    #[arg(short, long = "ingredient")]
    pub ingredients: Vec<String>,

    /// Checklist file with one pantry item per line
    #[arg(short, long)]
    pub pantry_file: Option<PathBuf>,

    /// Maximum number of recipes to fetch
    #[arg(short, long, default_value_t = crate::config::DEFAULT_RESULT_LIMIT)]
    pub limit: usize,

    #[arg(long, value_enum, default_value_t = Ranking::MinimizeMissing)]
    pub ranking: Ranking,

    /// Abort the whole search if any recipe's nutrition lookup fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Overall deadline for the search, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Save the found recipes and print a grocery list of missing ingredients
    #[arg(long)]
    pub save: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
