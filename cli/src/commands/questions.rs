//! # Catalog Listing
//!
//! File: cli/src/commands/questions.rs
//!
//! `dronefaq questions` prints the numbered canonical questions of the
//! configured catalog, in catalog order. Handy for checking which catalog a
//! configuration actually selects.
//!
use super::chat::write_question_list;
use super::{AppContext, GlobalOptions};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

#[derive(Parser, Debug)]
pub struct QuestionsArgs {}

pub async fn handle_questions(args: QuestionsArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling questions command with args: {:?}", args);
    let ctx = AppContext::load(global)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_question_list(ctx.chatbot.catalog(), &mut out).context("Failed to write to stdout")?;
    out.flush()?;
    Ok(())
}
