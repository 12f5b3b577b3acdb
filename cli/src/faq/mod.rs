//! # DroneFAQ Engine
//!
//! File: cli/src/faq/mod.rs
//!
//! ## Overview
//!
//! The question-answering pipeline shared by every delivery surface:
//!
//! ```text
//! query ─▶ Matcher::best_match(query, catalog) ─▶ MatchResult ─▶ ResponseFormatter::render ─▶ caller
//! ```
//!
//! ## Architecture
//!
//! - `text`: trimming, case folding, tokenisation and stop words.
//! - `catalog`: the immutable, ordered set of canonical question/answer pairs.
//! - `matcher`: the `MatchStrategy` trait, its three implementations and the
//!   thresholded `Matcher`.
//! - `formatter`: `ResponseEnvelope` plus the envelope and console formatters.
//! - `chatbot`: the `Chatbot` facade that validates input and ties the rest
//!   together.
//!
//! Nothing in this module performs I/O after the catalog is loaded, and
//! nothing is mutated after construction.
//!
pub mod catalog;
pub mod chatbot;
pub mod formatter;
pub mod matcher;
pub mod text;

pub use catalog::{CanonicalEntry, Catalog, CatalogSource, EntrySpec};
pub use chatbot::Chatbot;
pub use formatter::{
    ConsoleFormatter, EnvelopeFormatter, ResponseEnvelope, ResponseFormatter, Status,
    FALLBACK_MESSAGE,
};
pub use matcher::{
    HybridMatcher, KeywordMatcher, MatchResult, MatchStrategy, Matcher, Query, SimilarityMatcher,
    StrategyKind, DEFAULT_THRESHOLD,
};
