//! # One-shot Question
//!
//! File: cli/src/commands/ask.rs
//!
//! `dronefaq ask <question...>` answers a single question and exits. The
//! words are joined with single spaces, so quoting is optional:
//!
//! ```bash
//! dronefaq ask what is the max speed
//! dronefaq ask --json "Does this drone have GPS?"
//! ```
//!
//! An empty question exits with status 1. With `--json`, the error envelope
//! is still printed to stdout first.
//!
use super::{AppContext, GlobalOptions};
use crate::core::error::Result;
use crate::faq::{ConsoleFormatter, EnvelopeFormatter, ResponseEnvelope, ResponseFormatter};
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to answer.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Print the JSON response envelope instead of console text.
    #[arg(long)]
    pub json: bool,
}

/// # Handle Ask Command (`handle_ask`)
///
/// ## Errors
///
/// Returns an error for configuration or catalog failures, or when the
/// question is empty.
pub async fn handle_ask(args: AskArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);
    let ctx = AppContext::load(global)?;
    let question = args.question.join(" ");

    match ctx.chatbot.try_answer(&question) {
        Ok(result) => {
            if args.json {
                print_json(&EnvelopeFormatter.render(&result))?;
            } else {
                println!("{}", ConsoleFormatter.render(&result));
            }
            Ok(())
        }
        Err(e) => {
            if args.json {
                print_json(&EnvelopeFormatter.render_error(&e.to_string()))?;
            }
            Err(e.into())
        }
    }
}

fn print_json(envelope: &ResponseEnvelope) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(envelope).context("Failed to serialize response")?;
    println!("{}", rendered);
    Ok(())
}
