//! # DroneFAQ Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout DroneFAQ. It follows
//! a two-level approach:
//! - `FaqError`: a `thiserror` enum naming the failures the application
//!   distinguishes (bad configuration, unusable catalog, rejected input,
//!   malformed HTTP requests).
//! - `Result<T>`: an alias for `anyhow::Result<T>` so command handlers can
//!   attach context to I/O and parsing failures.
//!
//! Input errors (`EmptyQuestion`, `InvalidInput`, `MalformedRequest`) are
//! never fatal: the delivery surfaces turn them into `status = "error"`
//! responses and keep serving. Only configuration and catalog errors abort
//! startup.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if threshold <= 0.0 {
//!     return Err(FaqError::Config(format!("threshold {} is out of range", threshold)))?;
//! }
//!
//! // Add context with anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the DroneFAQ application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaqError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The query was empty or whitespace only.
    #[error("Please provide a question.")]
    EmptyQuestion,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request envelope itself was unusable (missing field, bad JSON).
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
