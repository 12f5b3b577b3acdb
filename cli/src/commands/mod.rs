//! # DroneFAQ Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `dronefaq` CLI and
//! the startup logic they share.
//!
//! ## Command Groups
//!
//! - `chat`: interactive console loop
//! - `serve`: HTTP API (`/chat`, `/health`, `/`)
//! - `ask`: answer a single question and exit
//! - `questions`: list the canonical questions
//!
//! Every command starts the same way: load the configuration, load the
//! catalog it points to, and build the matcher. `AppContext::load` does
//! exactly that, so the surfaces only differ in transport.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::faq::{Catalog, Chatbot, Matcher, StrategyKind};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

/// Command group for the one-shot `dronefaq ask` command.
pub mod ask;
/// Command group for the interactive console (`dronefaq chat`).
pub mod chat;
/// Command group for listing the catalog (`dronefaq questions`).
pub mod questions;
/// Command group for the HTTP API (`dronefaq serve`).
pub mod serve;

/// Options accepted by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file; disables discovery when set.
    pub config: Option<PathBuf>,
    pub strategy: StrategyKind,
}

/// Everything a command needs once startup is done. Immutable from here on.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub chatbot: Chatbot,
}

impl AppContext {
    /// # Load Application Context (`AppContext::load`)
    ///
    /// Loads configuration, then the catalog it selects, then builds the
    /// matcher for the requested strategy and the configured threshold.
    ///
    /// ## Errors
    ///
    /// Fails if the configuration is invalid or the catalog cannot be loaded.
    pub fn load(global: &GlobalOptions) -> Result<Self> {
        let config = config::load_config(global.config.as_deref())
            .context("Failed to load DroneFAQ configuration")?;
        let catalog = Catalog::load(&config.catalog_source()).context("Failed to load catalog")?;
        let matcher = Matcher::from_kind(global.strategy, config.matcher.threshold)?;
        info!(
            "Matcher ready: strategy={}, threshold={}, {} canonical questions",
            global.strategy,
            matcher.threshold(),
            catalog.len()
        );
        Ok(Self {
            config,
            chatbot: Chatbot::new(catalog, matcher),
        })
    }
}
