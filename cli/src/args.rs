//! CLI argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for turn outcomes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable command and text listing
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for neuroroute
#[derive(Parser, Debug)]
#[command(name = "neuroroute")]
#[command(author, version, about = "Route natural-language requests to EEG analysis commands")]
#[command(long_about = r#"
Neuroroute turns a natural-language request into validated analysis commands.

Each turn goes through four stages:
1. Routing: the message is scored against a table of topic prompts
2. Retrieval: reference documents contribute the most similar chunks
3. Generation: one completion is sampled per matched topic
4. Consensus: the completions vote; disagreement is surfaced, not guessed away

Configuration files are loaded from (in priority order):
1. --config <path>      Explicit config file
2. ./neuroroute.toml    Project-level config
3. ~/.config/neuroroute/config.toml   Global config

Example:
  neuroroute "apply a bandpass filter between 1 and 40 Hz"
  neuroroute -d docs/pipeline.md "split the data by trial"
  neuroroute --chat
"#)]
pub struct Cli {
    /// The message to route (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Reference document to load into the retrieval corpus (repeatable)
    #[arg(short, long, value_name = "PATH")]
    pub document: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Sample a single completion regardless of how many topics match
    #[arg(long)]
    pub no_ensemble: bool,

    /// Skip retrieval context even when documents are configured
    #[arg(long)]
    pub no_retrieval: bool,

    /// Ablation: pick topics uniformly at random instead of by similarity
    #[arg(long)]
    pub no_prompt_selection: bool,
}
