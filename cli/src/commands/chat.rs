//! # DroneFAQ Console Chat
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! Implements `dronefaq chat`, a read-eval-print loop over stdin/stdout.
//! Each line is one turn:
//! - `exit`, `quit` or `bye` (any case) ends the session
//! - `help` lists every canonical question
//! - an empty line is ignored
//! - anything else is answered through the matcher and printed
//!
//! End of input ends the session as well, so the loop can be driven by a
//! pipe (`echo "help" | dronefaq chat --no-banner`).
//!
//! The loop itself (`run_console`) is generic over `BufRead`/`Write` so it
//! can be exercised with in-memory buffers.
//!
use super::{AppContext, GlobalOptions};
use crate::core::error::Result;
use crate::faq::{Catalog, Chatbot, ConsoleFormatter};
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, ErrorKind, Write};
use tracing::{debug, info, warn};

const GOODBYE: &str = "Bot: Thank you for visiting. Goodbye!";
const SEPARATOR_WIDTH: usize = 60;

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Skip the welcome banner and example questions.
    #[arg(long)]
    pub no_banner: bool,
}

/// A classified line of console input.
#[derive(Debug, PartialEq, Eq)]
enum ConsoleCommand<'a> {
    Exit,
    Help,
    Empty,
    Ask(&'a str),
}

impl<'a> ConsoleCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => ConsoleCommand::Empty,
            "exit" | "quit" | "bye" => ConsoleCommand::Exit,
            "help" => ConsoleCommand::Help,
            _ => ConsoleCommand::Ask(trimmed),
        }
    }
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads the application context and runs the console loop on the
/// process's stdin and stdout.
pub async fn handle_chat(args: ChatArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let ctx = AppContext::load(global)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_console(&ctx.chatbot, stdin.lock(), stdout.lock(), !args.no_banner)
}

/// # Run Console Loop (`run_console`)
///
/// Reads lines from `input` until an exit command or end of input, writing
/// replies to `output`. A line that is not valid UTF-8 is reported and
/// skipped; any other I/O failure ends the loop with an error.
pub fn run_console<R: BufRead, W: Write>(
    bot: &Chatbot,
    mut input: R,
    mut output: W,
    show_banner: bool,
) -> Result<()> {
    if show_banner {
        write_banner(bot.catalog(), &mut output)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush stdout")?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                debug!("End of input, leaving chat loop");
                writeln!(output)?;
                writeln!(output, "{}", GOODBYE)?;
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Discarding non UTF-8 console input: {}", e);
                writeln!(output, "Bot (error): I could not read that line.\n")?;
                continue;
            }
            Err(e) => return Err(e).context("Failed to read from stdin"),
        }

        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Exit => {
                writeln!(output, "\n{}", GOODBYE)?;
                break;
            }
            ConsoleCommand::Help => {
                writeln!(output, "\nAvailable questions:")?;
                write_question_list(bot.catalog(), &mut output)?;
                writeln!(output)?;
            }
            ConsoleCommand::Empty => continue,
            ConsoleCommand::Ask(question) => {
                let reply = bot.respond(question, &ConsoleFormatter);
                writeln!(output, "{}\n", reply)?;
            }
        }
    }
    output.flush()?;
    Ok(())
}

/// Writes the numbered list of canonical questions, one per line.
pub fn write_question_list<W: Write>(catalog: &Catalog, output: &mut W) -> io::Result<()> {
    for (i, question) in catalog.questions().enumerate() {
        writeln!(output, "{}. {}", i + 1, question)?;
    }
    Ok(())
}

fn write_banner<W: Write>(catalog: &Catalog, output: &mut W) -> io::Result<()> {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    writeln!(output, "{}", separator)?;
    writeln!(output, "  🚁 Drone FAQ Chatbot - Console Mode")?;
    writeln!(output, "{}", separator)?;
    writeln!(output, "\nType 'exit', 'quit', or 'bye' to exit")?;
    writeln!(output, "Type 'help' to see available questions")?;
    writeln!(output, "{}", separator)?;
    writeln!(output, "\nYou can ask questions like:")?;
    for question in catalog.questions() {
        writeln!(output, "- {}", question)?;
    }
    writeln!(output, "{}\n", separator)?;
    Ok(())
}
