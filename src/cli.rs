//! CLI argument parsing using clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Persona Rubric - classify questionnaire answers into behavioral archetypes
#[derive(Parser, Debug)]
#[command(name = "persona-rubric")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Rubric YAML file (defaults to the embedded rubric)
    #[arg(long, global = true, env = "PERSONA_RUBRIC_FILE")]
    pub rubric: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a questionnaire file and print the result as JSON
    Classify {
        /// JSON file with `questions` and `responses` arrays
        #[arg(short, long)]
        input: PathBuf,

        /// Subject identifier recorded with the classification
        #[arg(long, default_value = "anonymous")]
        subject: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the rubric version and population distribution
    Rubric,
}
