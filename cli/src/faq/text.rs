//! # Text Normalisation
//!
//! File: cli/src/faq/text.rs
//!
//! Shared by the catalog (keyword derivation) and the matcher (query
//! preparation) so both sides of a comparison see identical tokens.
//!
//! A token is a maximal run of alphanumeric characters, lowercased. Everything
//! else (spaces, punctuation, `/`, apostrophes) separates tokens, so
//! `"Does this drone have GPS?"` becomes `{does, this, drone, have, gps}`.
//!
use std::collections::BTreeSet;

/// Function words ignored when keywords are derived from a question.
///
/// Only keyword derivation uses this list. Similarity scoring compares the
/// full token sets, stop words included.
const STOP_WORDS: &[&str] = &[
    // articles & determiners
    "the", "a", "an", "this", "that", "these", "those",
    // be-verbs
    "is", "are", "was", "were", "be", "been", "being", "am",
    // auxiliaries
    "have", "has", "had", "do", "does", "did",
    // modals
    "will", "would", "shall", "should", "may", "might", "can", "could", "must",
    // prepositions
    "to", "of", "in", "for", "on", "with", "at", "by", "from", "into", "about",
    // conjunctions
    "and", "or", "but", "if", "then", "than", "so", "as",
    // pronouns
    "i", "you", "he", "she", "it", "we", "they", "me", "my", "your", "its", "our", "their",
    // interrogatives
    "who", "what", "which", "when", "where", "how", "why",
];

/// Trims and lowercases raw input.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits text into its set of normalised tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Keywords for a question that ships without an explicit list: its tokens
/// minus stop words.
pub fn derive_keywords(question: &str) -> BTreeSet<String> {
    tokenize(question)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}
