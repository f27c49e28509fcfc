//! CLI entrypoint for neuroroute
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;
mod repl;

use crate::args::{Cli, OutputFormat};
use crate::output::ConsoleFormatter;
use crate::repl::ChatRepl;
use anyhow::{Result, bail};
use clap::Parser;
use neuroroute_application::{
    HandleTurnInput, HandleTurnUseCase, PromptRouter, RetrievalIndex,
};
use neuroroute_domain::{BASE_PROMPT, CommandParser, SelectionPolicy};
use neuroroute_infrastructure::{ConfigLoader, OllamaCompletion, OllamaEmbedding};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        print_config_locations();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    // Flags only ever disable features the config enabled
    let ensemble = config.router.ensemble && !cli.no_ensemble;
    let retrieval = config.router.retrieval && !cli.no_retrieval;
    let no_prompt_selection = config.router.no_prompt_selection || cli.no_prompt_selection;

    let topics = config.topic_table()?;
    let grammar = config.command_grammar()?;

    info!(
        topics = topics.len(),
        commands = grammar.len(),
        ensemble,
        retrieval,
        "starting neuroroute"
    );

    // === Dependency Injection ===
    let embedding = Arc::new(OllamaEmbedding::new(
        config.provider.host.as_str(),
        config.provider.embedding_model.as_str(),
    ));
    let completion = Arc::new(OllamaCompletion::new(
        config.provider.host.as_str(),
        config.provider.completion_model.as_str(),
    ));

    let router = PromptRouter::new(
        Arc::clone(&embedding),
        topics,
        BASE_PROMPT,
        SelectionPolicy::new(config.router.score_floor),
        no_prompt_selection,
    )
    .await?;

    let index = if retrieval {
        let index = RetrievalIndex::new(Arc::clone(&embedding), config.router.chunk_size);
        for document in &cli.document {
            index.load_document(document).await?;
        }
        Some(Arc::new(index))
    } else {
        None
    };

    let use_case = HandleTurnUseCase::new(
        completion,
        router,
        index,
        CommandParser::new(grammar),
        ensemble,
        config.router.top_k,
    );

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case);
        repl.run().await?;
        return Ok(());
    }

    // Single message mode - message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("Message is required. Use --chat for interactive mode."),
    };

    // Ctrl-C stops the ensemble at the next completion boundary
    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });
    let use_case = use_case.with_cancellation(cancellation);

    let outcome = use_case.execute(HandleTurnInput::new(message)).await?;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome)?,
    };
    println!("{}", output);

    Ok(())
}

fn print_config_locations() {
    println!("Configuration file locations (highest priority last):");
    if let Some(path) = ConfigLoader::global_config_path() {
        let marker = if path.exists() { "found" } else { "absent" };
        println!("  {} ({})", path.display(), marker);
    }
    let project = std::path::Path::new("neuroroute.toml");
    let marker = if project.exists() { "found" } else { "absent" };
    println!("  ./neuroroute.toml ({})", marker);
    println!("  NEUROROUTE_* environment variables");
}
