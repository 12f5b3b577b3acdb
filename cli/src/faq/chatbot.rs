//! # Chatbot Facade
//!
//! File: cli/src/faq/chatbot.rs
//!
//! `Chatbot` owns the catalog and the configured matcher and is the only
//! thing the delivery surfaces talk to. It validates raw input, runs the
//! matcher and hands the result to whichever formatter the surface uses.
//!
//! - `try_answer` is the fallible entry point: blank input is an
//!   `FaqError::EmptyQuestion`.
//! - `respond` never fails: input errors are rendered through the
//!   formatter's error path instead.
//!
use super::catalog::Catalog;
use super::formatter::ResponseFormatter;
use super::matcher::{MatchResult, Matcher};
use crate::core::error::FaqError;
use tracing::debug;

#[derive(Debug)]
pub struct Chatbot {
    catalog: Catalog,
    matcher: Matcher,
}

impl Chatbot {
    pub fn new(catalog: Catalog, matcher: Matcher) -> Self {
        Self { catalog, matcher }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// # Answer (`Chatbot::try_answer`)
    ///
    /// Matches `input` against the catalog.
    ///
    /// ## Errors
    ///
    /// Returns `FaqError::EmptyQuestion` if `input` is empty or whitespace.
    /// A query that matches nothing is *not* an error; it comes back as an
    /// unmatched `MatchResult`.
    pub fn try_answer(&self, input: &str) -> Result<MatchResult<'_>, FaqError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FaqError::EmptyQuestion);
        }

        let result = self.matcher.best_match(trimmed, &self.catalog);
        debug!(
            "Query {:?} -> {:?} (score {:.3}, strategy {})",
            trimmed,
            result.matched_entry().map(|entry| entry.question()),
            result.score(),
            self.matcher.strategy_name()
        );
        Ok(result)
    }

    /// # Respond (`Chatbot::respond`)
    ///
    /// Infallible version of `try_answer` that renders either the match or
    /// the input error with `formatter`.
    pub fn respond<F: ResponseFormatter>(&self, input: &str, formatter: &F) -> F::Output {
        match self.try_answer(input) {
            Ok(result) => formatter.render(&result),
            Err(e) => formatter.render_error(&e.to_string()),
        }
    }
}
