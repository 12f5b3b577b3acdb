//! # DroneFAQ Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `dronefaq` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers in the library
//!
//! ## Examples
//!
//! ```bash
//! # Interactive console
//! dronefaq chat
//!
//! # HTTP API on 127.0.0.1:5000
//! dronefaq serve
//!
//! # One question, keyword strategy, debug logging
//! dronefaq -vv --strategy keyword ask "How far can it fly?"
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging (`RUST_LOG` wins over `-v`)
//! 3. Route to the command handler
//! 4. Print any error and exit with status 1
//!
use clap::Parser;
use dronefaq::commands::{self, GlobalOptions};
use dronefaq::faq::StrategyKind;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// # Command Line Interface (`Cli`)
#[derive(Parser, Debug)]
#[command(
    name = "dronefaq",
    about = "🚁 DroneFAQ: answers drone product questions from a fixed FAQ catalog",
    long_about = "Matches free-text questions against a catalog of canonical drone FAQs and\n\
                  answers over an interactive console, an HTTP API or a one-shot command.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file to use instead of the discovered ones.
    #[arg(long, global = true, env = "DRONEFAQ_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scoring strategy used to rank catalog entries.
    #[arg(long, global = true, value_enum, default_value_t = StrategyKind::Hybrid)]
    strategy: StrategyKind,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Start the interactive console.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Serve the HTTP API.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Answer a single question and exit.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// List the canonical questions of the catalog.
    #[command(alias = "q")]
    Questions(commands::questions::QuestionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let global = GlobalOptions {
        config: cli.config,
        strategy: cli.strategy,
    };

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &global).await,
        Commands::Serve(args) => commands::serve::handle_serve(args, &global).await,
        Commands::Ask(args) => commands::ask::handle_ask(args, &global).await,
        Commands::Questions(args) => commands::questions::handle_questions(args, &global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["dronefaq", "ask", "--strategy", "keyword", "-vv", "hello"]);
        assert_eq!(cli.strategy, StrategyKind::Keyword);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.question, vec!["hello".to_string()]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_strategy_defaults_to_hybrid() {
        let cli = Cli::parse_from(["dronefaq", "q"]);
        assert_eq!(cli.strategy, StrategyKind::Hybrid);
        assert!(matches!(cli.command, Commands::Questions(_)));
    }
}
