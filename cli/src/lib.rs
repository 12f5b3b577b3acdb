//! # DroneFAQ
//!
//! File: cli/src/lib.rs
//!
//! Library half of the `dronefaq` package. The binary (`main.rs`) only
//! parses arguments and sets up logging; everything else lives here:
//!
//! - `faq`: catalog, matching strategies, formatting and the `Chatbot` facade
//! - `core`: configuration and errors
//! - `commands`: the console, HTTP and one-shot surfaces
//!
pub mod commands;
pub mod core;
pub mod faq;
