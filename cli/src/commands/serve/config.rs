//! # Serve Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! Resolves the address and middleware settings for `dronefaq serve` from
//! two layers:
//! 1. The `[server]` section of the loaded configuration file(s).
//! 2. Command-line flags, which win whenever they differ from their defaults.
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! enable_cors = false
//! ```
//!
use crate::core::config::ServerSection;
use crate::core::error::{FaqError, Result};
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

/// # Serve Command Arguments (`ServeArgs`)
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, default_value_t = 5000)]
    pub port: u16,

    /// Interface to bind (use 0.0.0.0 to listen on all interfaces).
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disable CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
}

impl ServerConfig {
    /// # Resolve Server Configuration (`ServerConfig::resolve`)
    ///
    /// Starts from the `[server]` section and lets each flag override it when
    /// the flag was moved off its default.
    ///
    /// ## Errors
    ///
    /// Returns `FaqError::Config` if the configured host is not an IP address.
    pub fn resolve(args: &ServeArgs, section: &ServerSection) -> Result<Self> {
        let cli_defaults = ServeArgs::parse_from([""]);

        let file_host: IpAddr = section.host.parse().map_err(|e| {
            FaqError::Config(format!("invalid server host '{}': {}", section.host, e))
        })?;

        let config = Self {
            host: if args.host != cli_defaults.host {
                args.host
            } else {
                file_host
            },
            port: if args.port != cli_defaults.port {
                args.port
            } else {
                section.port
            },
            enable_cors: section.enable_cors && !args.no_cors,
        };
        debug!("Resolved server config: {:?}", config);
        Ok(config)
    }
}
