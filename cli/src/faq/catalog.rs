//! # Question Catalog
//!
//! File: cli/src/faq/catalog.rs
//!
//! ## Overview
//!
//! The catalog is the ordered, immutable set of canonical question/answer
//! pairs the matcher scores against. It is loaded once at startup and then
//! shared read-only; no update or delete operation exists.
//!
//! ## Sources
//!
//! - `CatalogSource::Builtin`: the drone catalog embedded in the binary
//!   (`cli/assets/drone_faq.toml`).
//! - `CatalogSource::File`: a TOML file with `[[entries]]` tables, or a JSON
//!   file holding either `{"entries": [...]}` or a bare array. The format is
//!   picked from the extension (`.json` is JSON, anything else TOML).
//! - `CatalogSource::Inline`: entries given directly in `.dronefaq.toml`.
//!
//! Each entry has a `question`, an `answer` and optional `keywords`.
//!
//! ## Loading Rules
//!
//! - Entry order is preserved. It is the matcher's only tie-break order.
//! - Questions and answers are trimmed and must not be empty.
//! - Duplicate questions (same text after trimming and lowercasing) keep the
//!   first occurrence; later ones are skipped with a warning.
//! - A catalog with no entries is rejected.
//!
use super::text;
use crate::core::error::{FaqError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The built-in drone catalog, compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../assets/drone_faq.toml");

/// A catalog entry as written in a catalog or config file, before validation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    pub question: String,
    pub answer: String,
    /// Extra keywords. Each one present in a query counts as a hit on top of
    /// the keywords derived from the question itself.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl EntrySpec {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: Vec::new(),
        }
    }
}

/// Layout of a TOML catalog file (and the wrapped JSON form).
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    entries: Vec<EntrySpec>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped(CatalogFile),
    Bare(Vec<EntrySpec>),
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogSource {
    #[default]
    Builtin,
    File(PathBuf),
    Inline(Vec<EntrySpec>),
}

/// A validated canonical question with its answer and precomputed tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEntry {
    question: String,
    answer: String,
    keywords: BTreeSet<String>,
    extra_keywords: BTreeSet<String>,
    question_tokens: BTreeSet<String>,
}

impl CanonicalEntry {
    /// # Build Entry (`CanonicalEntry::from_spec`)
    ///
    /// Trims the question and answer, rejects blanks, and computes the token
    /// sets the matcher needs. The keywords are the question's non-stop-word
    /// tokens (all of its tokens if every word is a stop word), so the exact
    /// question always covers them. Listed keywords are tokenised the same way
    /// as queries (`"km/h"` contributes `km` and `h`) and kept apart as extras.
    pub fn from_spec(spec: &EntrySpec) -> std::result::Result<Self, FaqError> {
        let question = spec.question.trim();
        let answer = spec.answer.trim();
        if question.is_empty() {
            return Err(FaqError::Catalog(
                "catalog entry has an empty question".to_string(),
            ));
        }
        if answer.is_empty() {
            return Err(FaqError::Catalog(format!(
                "catalog entry '{}' has an empty answer",
                question
            )));
        }

        let question_tokens = text::tokenize(question);
        let mut keywords = text::derive_keywords(question);
        if keywords.is_empty() {
            keywords = question_tokens.clone();
        }
        let extra_keywords: BTreeSet<String> = spec
            .keywords
            .iter()
            .flat_map(|keyword| text::tokenize(keyword))
            .filter(|token| !keywords.contains(token))
            .collect();

        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords,
            extra_keywords,
            question_tokens,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Listed keywords that are not already among `keywords()`.
    pub fn extra_keywords(&self) -> &BTreeSet<String> {
        &self.extra_keywords
    }

    pub fn question_tokens(&self) -> &BTreeSet<String> {
        &self.question_tokens
    }
}

/// The immutable, ordered set of canonical entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CanonicalEntry>,
}

impl Catalog {
    /// # Load Catalog (`Catalog::load`)
    ///
    /// Reads the catalog from `source`, validates every entry and applies the
    /// duplicate policy.
    ///
    /// ## Errors
    ///
    /// Returns an error if a catalog file cannot be read or parsed, if an
    /// entry is blank, or if no entries remain.
    pub fn load(source: &CatalogSource) -> Result<Self> {
        let catalog = match source {
            CatalogSource::Builtin => {
                debug!("Loading built-in drone catalog");
                Self::from_toml_str(BUILTIN_CATALOG).context("Built-in catalog is invalid")?
            }
            CatalogSource::File(path) => Self::from_path(path)?,
            CatalogSource::Inline(specs) => {
                debug!("Loading {} inline catalog entries", specs.len());
                Self::from_specs(specs.clone())?
            }
        };
        info!("Catalog loaded with {} entries", catalog.len());
        Ok(catalog)
    }

    /// The built-in drone catalog.
    pub fn builtin() -> Result<Self> {
        Self::load(&CatalogSource::Builtin)
    }

    fn from_path(path: &Path) -> Result<Self> {
        info!("Loading catalog from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        parsed.with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).context("Failed to parse TOML catalog")?;
        Ok(Self::from_specs(file.entries)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let specs = match serde_json::from_str::<JsonCatalog>(content)
            .context("Failed to parse JSON catalog")?
        {
            JsonCatalog::Wrapped(file) => file.entries,
            JsonCatalog::Bare(entries) => entries,
        };
        Ok(Self::from_specs(specs)?)
    }

    /// # Build From Specs (`Catalog::from_specs`)
    ///
    /// Validates entries in order. The first occurrence of a question wins;
    /// later duplicates are logged and dropped.
    pub fn from_specs(specs: Vec<EntrySpec>) -> std::result::Result<Self, FaqError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(specs.len());

        for spec in &specs {
            let entry = CanonicalEntry::from_spec(spec)?;
            if !seen.insert(text::normalize(entry.question())) {
                warn!(
                    "Skipping duplicate catalog question '{}' (first occurrence kept)",
                    entry.question()
                );
                continue;
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(FaqError::Catalog(
                "catalog contains no entries".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    /// Read-only view of the entries in catalog order.
    pub fn entries(&self) -> &[CanonicalEntry] {
        &self.entries
    }

    /// Canonical questions in catalog order.
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CanonicalEntry::question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog_has_the_eight_drone_questions_in_order() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);
        let questions: Vec<&str> = catalog.questions().collect();
        assert_eq!(questions[0], "What is the flight time of this drone?");
        assert_eq!(questions[7], "Is it waterproof or weather-resistant?");
    }

    fn words(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_listed_keywords_are_tokenized_extras() {
        let catalog = Catalog::builtin().unwrap();
        let speed = &catalog.entries()[6];
        assert_eq!(speed.question(), "What is the maximum speed?");
        assert_eq!(words(speed.keywords()), vec!["maximum", "speed"]);
        // "maximum" and "speed" are listed too but already derived.
        assert_eq!(words(speed.extra_keywords()), vec!["h", "km", "mode", "sport"]);
        assert!(!speed.extra_keywords().contains("km/h"));
    }

    #[test]
    fn test_question_of_stop_words_keeps_all_tokens_as_keywords() {
        let catalog = Catalog::from_specs(vec![EntrySpec::new("What is it?", "A drone.")]).unwrap();
        assert_eq!(words(catalog.entries()[0].keywords()), vec!["is", "it", "what"]);
    }

    #[test]
    fn test_keywords_are_derived_from_question() {
        let catalog = Catalog::from_specs(vec![EntrySpec::new(
            "How long does charging take?",
            "About 90 minutes.",
        )])
        .unwrap();
        assert_eq!(
            words(catalog.entries()[0].keywords()),
            vec!["charging", "long", "take"]
        );
        assert!(catalog.entries()[0].extra_keywords().is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let catalog = Catalog::from_specs(vec![
            EntrySpec::new("Does it fold?", "Yes, the arms fold."),
            EntrySpec::new("Is there a case?", "A hard case is included."),
            EntrySpec::new("  does it FOLD? ", "Second answer that must be ignored."),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].answer(), "Yes, the arms fold.");
    }

    #[test]
    fn test_blank_question_or_answer_is_rejected() {
        let err = Catalog::from_specs(vec![EntrySpec::new("   ", "answer")]).unwrap_err();
        assert!(matches!(err, FaqError::Catalog(_)));

        let err = Catalog::from_specs(vec![EntrySpec::new("Question?", "")]).unwrap_err();
        assert!(err.to_string().contains("empty answer"));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let err = Catalog::from_specs(Vec::new()).unwrap_err();
        assert_eq!(err, FaqError::Catalog("catalog contains no entries".into()));
    }

    #[test]
    fn test_entries_are_trimmed() {
        let catalog =
            Catalog::from_specs(vec![EntrySpec::new("  Does it fold?\n", "  Yes.  ")]).unwrap();
        assert_eq!(catalog.entries()[0].question(), "Does it fold?");
        assert_eq!(catalog.entries()[0].answer(), "Yes.");
    }

    #[test]
    fn test_loads_toml_catalog_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("faq.toml");
        fs::write(
            &path,
            r#"
                [[entries]]
                question = "Can it fly at night?"
                answer = "Yes, it has navigation lights."
                keywords = ["night", "lights"]
            "#,
        )
        .unwrap();

        let catalog = Catalog::load(&CatalogSource::File(path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].question(), "Can it fly at night?");
    }

    #[test]
    fn test_loads_bare_and_wrapped_json_catalogs() {
        let dir = tempdir().unwrap();

        let bare = dir.path().join("bare.json");
        fs::write(
            &bare,
            r#"[{"question": "Is it loud?", "answer": "About 70 dB.", "keywords": ["loud", "noise"]}]"#,
        )
        .unwrap();
        let catalog = Catalog::load(&CatalogSource::File(bare)).unwrap();
        assert_eq!(catalog.entries()[0].answer(), "About 70 dB.");

        let wrapped = dir.path().join("wrapped.JSON");
        fs::write(
            &wrapped,
            r#"{"entries": [{"question": "Is it loud?", "answer": "About 70 dB."}]}"#,
        )
        .unwrap();
        let catalog = Catalog::load(&CatalogSource::File(wrapped)).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_or_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Catalog::load(&CatalogSource::File(missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[[entries]]\nquestion = 3\n").unwrap();
        let err = Catalog::load(&CatalogSource::File(broken)).unwrap_err();
        assert!(err.to_string().contains("Invalid catalog file"));
    }

    #[test]
    fn test_inline_source_is_validated() {
        let source = CatalogSource::Inline(vec![EntrySpec::new("Q?", "A.")]);
        assert_eq!(Catalog::load(&source).unwrap().len(), 1);
        assert!(Catalog::load(&CatalogSource::Inline(Vec::new())).is_err());
    }
}
