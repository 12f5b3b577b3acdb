//! # DroneFAQ HTTP API
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `dronefaq serve` exposes the chatbot over HTTP with Axum.
//!
//! ## Architecture
//!
//! - `config.rs`: `ServeArgs` and their merge with the `[server]` section
//! - `handlers.rs`: routes and request/response mapping
//! - `server_logic.rs`: port selection, middleware and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Default address (127.0.0.1:5000)
//! dronefaq serve
//!
//! # All interfaces, keyword strategy, no CORS
//! dronefaq --strategy keyword serve --host 0.0.0.0 --port 8080 --no-cors
//! ```
//!
use super::{AppContext, GlobalOptions};
use crate::core::error::Result;
use std::sync::Arc;
use tracing::info;

pub use config::{ServeArgs, ServerConfig};

/// Resolves the listen address and middleware settings.
pub mod config;

/// Route table and `/chat` request handling.
pub mod handlers;

/// Axum server setup and lifecycle.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Loads the catalog and matcher, resolves the server settings and runs the
/// API until shutdown.
///
/// ## Errors
///
/// Fails on configuration or catalog errors, or if the server cannot bind.
pub async fn handle_serve(args: ServeArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let ctx = AppContext::load(global)?;
    let config = ServerConfig::resolve(&args, &ctx.config.server)?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config, Arc::new(ctx.chatbot)).await
}
