//! # Matching Engine
//!
//! File: cli/src/faq/matcher.rs
//!
//! ## Overview
//!
//! Scores a user query against every canonical question in the catalog and
//! picks the best one. Scoring is pluggable through the `MatchStrategy`
//! trait; three strategies ship with the crate:
//!
//! - `SimilarityMatcher`: Jaccard overlap between the query's tokens and the
//!   candidate question's tokens.
//! - `KeywordMatcher`: keyword hits in the query relative to the keywords
//!   derived from the candidate question, capped at 1. Listed extra keywords
//!   add hits but never raise the bar.
//! - `HybridMatcher`: fixed weighted average of the two (0.7 similarity,
//!   0.3 keyword), built by composing the other two strategies.
//!
//! `Matcher` wraps a strategy together with the acceptance threshold and
//! implements `best_match`, the one operation the delivery surfaces use.
//!
//! ## Rules
//!
//! - Every score is in `[0, 1]`.
//! - A blank query scores 0 and never matches.
//! - Among candidates sharing the top score, the earliest in catalog order
//!   wins.
//! - A top score below the threshold yields no matched entry, but the score
//!   itself is still reported.
//!
//! Everything here is a pure function of `(query, catalog)`; a `Matcher` can
//! be shared across threads without locking.
//!
//! ## Examples
//!
//! ```rust
//! use dronefaq::faq::{Catalog, Matcher, StrategyKind};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let matcher = Matcher::from_kind(StrategyKind::Hybrid, 0.4).unwrap();
//! let result = matcher.best_match("What is the flight time?", &catalog);
//! assert_eq!(
//!     result.matched_entry().map(|e| e.question()),
//!     Some("What is the flight time of this drone?")
//! );
//! ```
//!
use super::catalog::{CanonicalEntry, Catalog};
use super::text;
use crate::core::error::FaqError;
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

/// Default acceptance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.4;
/// Weight of the similarity score inside the hybrid strategy.
pub const SIMILARITY_WEIGHT: f64 = 0.7;
/// Weight of the keyword score inside the hybrid strategy.
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// A query prepared for scoring: normalised once, tokenised once.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    normalized: String,
    tokens: BTreeSet<String>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let normalized = text::normalize(raw);
        let tokens = text::tokenize(&normalized);
        Self { normalized, tokens }
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    /// True for empty or whitespace-only input.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// # Match Strategy (`MatchStrategy`)
///
/// Scores a single candidate for a prepared query. Implementations must
/// return a value in `[0, 1]` and must not keep state between calls.
pub trait MatchStrategy: Send + Sync + fmt::Debug {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    fn score_query(&self, query: &Query, candidate: &CanonicalEntry) -> f64;

    /// Convenience wrapper that prepares `query` first.
    fn score(&self, query: &str, candidate: &CanonicalEntry) -> f64 {
        self.score_query(&Query::new(query), candidate)
    }
}

/// Jaccard overlap of query tokens and candidate question tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityMatcher;

impl MatchStrategy for SimilarityMatcher {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn score_query(&self, query: &Query, candidate: &CanonicalEntry) -> f64 {
        let query_tokens = query.tokens();
        let question_tokens = candidate.question_tokens();
        if query_tokens.is_empty() || question_tokens.is_empty() {
            return 0.0;
        }
        let shared = query_tokens.intersection(question_tokens).count();
        let union = query_tokens.len() + question_tokens.len() - shared;
        shared as f64 / union as f64
    }
}

/// Keyword hits among the query tokens over the size of the candidate's
/// derived keyword set, capped at 1.
///
/// Extra keywords count as hits only. The exact question therefore always
/// scores 1, and a paraphrase using listed synonyms can too.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl MatchStrategy for KeywordMatcher {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn score_query(&self, query: &Query, candidate: &CanonicalEntry) -> f64 {
        let keywords = candidate.keywords();
        if keywords.is_empty() {
            return 0.0;
        }
        let hits = keywords
            .iter()
            .chain(candidate.extra_keywords())
            .filter(|keyword| query.tokens().contains(*keyword))
            .count();
        (hits as f64 / keywords.len() as f64).min(1.0)
    }
}

/// Fixed-weight blend of `SimilarityMatcher` and `KeywordMatcher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridMatcher {
    similarity: SimilarityMatcher,
    keyword: KeywordMatcher,
}

impl MatchStrategy for HybridMatcher {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn score_query(&self, query: &Query, candidate: &CanonicalEntry) -> f64 {
        let similarity = self.similarity.score_query(query, candidate);
        let keyword = self.keyword.score_query(query, candidate);
        similarity * SIMILARITY_WEIGHT + keyword * KEYWORD_WEIGHT
    }
}

/// # Strategy Selector (`StrategyKind`)
///
/// The closed set of built-in strategies, selectable by name with
/// `--strategy similarity|keyword|hybrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StrategyKind {
    Similarity,
    Keyword,
    #[default]
    Hybrid,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn MatchStrategy> {
        match self {
            StrategyKind::Similarity => Box::new(SimilarityMatcher),
            StrategyKind::Keyword => Box::new(KeywordMatcher),
            StrategyKind::Hybrid => Box::new(HybridMatcher::default()),
        }
    }

}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Similarity => "similarity",
            StrategyKind::Keyword => "keyword",
            StrategyKind::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Outcome of `Matcher::best_match`. Borrowed from the catalog, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'c> {
    entry: Option<&'c CanonicalEntry>,
    score: f64,
}

impl<'c> MatchResult<'c> {
    /// A result with no matched entry.
    pub fn unmatched(score: f64) -> Self {
        Self { entry: None, score }
    }

    pub fn matched_entry(&self) -> Option<&'c CanonicalEntry> {
        self.entry
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_match(&self) -> bool {
        self.entry.is_some()
    }
}

/// A scoring strategy paired with an acceptance threshold.
#[derive(Debug)]
pub struct Matcher {
    strategy: Box<dyn MatchStrategy>,
    threshold: f64,
}

impl Matcher {
    /// # Create Matcher (`Matcher::new`)
    ///
    /// ## Errors
    ///
    /// Returns `FaqError::Config` unless `threshold` is in `(0, 1]`. A zero
    /// threshold would let a catalog-wide score of 0 count as a match.
    pub fn new(strategy: Box<dyn MatchStrategy>, threshold: f64) -> Result<Self, FaqError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(FaqError::Config(format!(
                "acceptance threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        Ok(Self {
            strategy,
            threshold,
        })
    }

    pub fn from_kind(kind: StrategyKind, threshold: f64) -> Result<Self, FaqError> {
        Self::new(kind.build(), threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Scores one candidate, clamped to `[0, 1]`.
    pub fn score(&self, query: &str, candidate: &CanonicalEntry) -> f64 {
        self.strategy.score(query, candidate).clamp(0.0, 1.0)
    }

    /// # Best Match (`Matcher::best_match`)
    ///
    /// Scores every entry and keeps the first one holding the highest score.
    /// The entry is reported only if that score reaches the threshold.
    pub fn best_match<'c>(&self, query: &str, catalog: &'c Catalog) -> MatchResult<'c> {
        let query = Query::new(query);
        if query.is_blank() {
            return MatchResult::unmatched(0.0);
        }

        let mut best: Option<(&'c CanonicalEntry, f64)> = None;
        for entry in catalog.entries() {
            let score = self.strategy.score_query(&query, entry).clamp(0.0, 1.0);
            trace!(
                "{} score {:.3} for '{}'",
                self.strategy.name(),
                score,
                entry.question()
            );
            // Strictly greater: earlier entries keep ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score >= self.threshold => MatchResult {
                entry: Some(entry),
                score,
            },
            Some((_, score)) => MatchResult::unmatched(score),
            None => MatchResult::unmatched(0.0),
        }
    }
}
