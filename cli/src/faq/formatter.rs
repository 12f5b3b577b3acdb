//! # Response Formatting
//!
//! File: cli/src/faq/formatter.rs
//!
//! ## Overview
//!
//! Turns a `MatchResult` into what a delivery surface sends back:
//! - `EnvelopeFormatter` builds a `ResponseEnvelope`, serialised by the HTTP
//!   API as `{"response", "confidence", "matched_question", "status"}`.
//! - `ConsoleFormatter` builds the text printed by the console loop and the
//!   `ask` command.
//!
//! "No confident match" is a normal outcome rendered with `status =
//! "success"` and the fallback message. `render_error` is the only path that
//! produces `status = "error"`; surfaces call it for rejected input and
//! malformed requests.
//!
use super::matcher::MatchResult;
use serde::{Deserialize, Serialize};

/// Sent whenever no canonical question clears the acceptance threshold.
pub const FALLBACK_MESSAGE: &str = "I'm not trained to answer this question yet. \
     Please visit https://www.comsats.edu.pk/ for more details.";

/// Outcome of a request as seen by the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// # Response Envelope (`ResponseEnvelope`)
///
/// The structured response of the HTTP API. `matched_question` is present
/// exactly when the confidence reached the acceptance threshold; error
/// envelopes carry confidence 0 and no matched question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub response: String,
    pub confidence: f64,
    pub matched_question: Option<String>,
    pub status: Status,
}

impl ResponseEnvelope {
    pub fn from_match(result: &MatchResult<'_>) -> Self {
        match result.matched_entry() {
            Some(entry) => Self {
                response: entry.answer().to_string(),
                confidence: result.score(),
                matched_question: Some(entry.question().to_string()),
                status: Status::Success,
            },
            None => Self {
                response: FALLBACK_MESSAGE.to_string(),
                confidence: result.score(),
                matched_question: None,
                status: Status::Success,
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: message.into(),
            confidence: 0.0,
            matched_question: None,
            status: Status::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// # Response Formatter (`ResponseFormatter`)
///
/// One implementation per delivery surface. Both methods are pure.
pub trait ResponseFormatter {
    type Output;

    fn render(&self, result: &MatchResult<'_>) -> Self::Output;

    fn render_error(&self, message: &str) -> Self::Output;
}

/// Produces `ResponseEnvelope`s for the HTTP API.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeFormatter;

impl ResponseFormatter for EnvelopeFormatter {
    type Output = ResponseEnvelope;

    fn render(&self, result: &MatchResult<'_>) -> ResponseEnvelope {
        ResponseEnvelope::from_match(result)
    }

    fn render_error(&self, message: &str) -> ResponseEnvelope {
        ResponseEnvelope::error(message)
    }
}

/// Produces console text:
///
/// ```text
/// Bot: The drone reaches speeds of up to 60 km/h (in Sport Mode).
/// (Confidence: 82.0%)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ResponseFormatter for ConsoleFormatter {
    type Output = String;

    fn render(&self, result: &MatchResult<'_>) -> String {
        let envelope = ResponseEnvelope::from_match(result);
        format!(
            "Bot: {}\n(Confidence: {})",
            envelope.response,
            format_confidence(envelope.confidence)
        )
    }

    fn render_error(&self, message: &str) -> String {
        format!("Bot (error): {}", message)
    }
}

/// Formats a `[0, 1]` confidence as a percentage with one decimal.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
