//! # Chat API Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! Routes served by `dronefaq serve`:
//!
//! | Method | Path      | Description                                  |
//! |--------|-----------|----------------------------------------------|
//! | GET    | `/`       | Service info, endpoints and usage examples   |
//! | GET    | `/health` | Liveness probe                               |
//! | GET    | `/chat`   | `?question=...` (or `?user_input=...`)       |
//! | POST   | `/chat`   | JSON body `{"question": "..."}`              |
//!
//! Every `/chat` response is a `ResponseEnvelope`. Answered queries
//! (including the fallback) are `200 OK`; anything rejected before reaching
//! the matcher is `400 Bad Request` with `status: "error"`.
//!
//! ## Examples
//!
//! ```bash
//! curl "http://127.0.0.1:5000/chat?question=What%20is%20the%20flight%20time"
//! curl -X POST http://127.0.0.1:5000/chat \
//!      -H 'Content-Type: application/json' \
//!      -d '{"question": "Does this drone have GPS?"}'
//! ```
//!
use crate::core::error::FaqError;
use crate::faq::{Chatbot, EnvelopeFormatter, ResponseEnvelope, ResponseFormatter};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

const SERVICE_NAME: &str = "Drone FAQ Chatbot API";
/// Accepted request field names, in lookup order.
const QUESTION_FIELDS: [&str; 2] = ["question", "user_input"];

type ChatReply = (StatusCode, Json<ResponseEnvelope>);

/// Builds the API routes. State is attached by the caller.
pub fn routes() -> Router<Arc<Chatbot>> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/chat", get(chat_get).post(chat_post))
        .fallback(not_found)
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/chat": "GET with ?question=... or POST with {\"question\": \"...\"}",
            "/health": "GET - health check",
        },
        "usage": {
            "GET": "/chat?question=What is the flight time?",
            "POST": "/chat with body {\"question\": \"What is the maximum range?\"}",
        },
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> (StatusCode, Json<ResponseEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(EnvelopeFormatter.render_error("Not found. See GET / for the available endpoints.")),
    )
}

async fn chat_get(
    State(bot): State<Arc<Chatbot>>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ChatReply {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return reject(FaqError::MalformedRequest(rejection.body_text())),
    };
    match question_from_params(&params) {
        Ok(question) => answer(&bot, question),
        Err(e) => reject(e),
    }
}

async fn chat_post(
    State(bot): State<Arc<Chatbot>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ChatReply {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return reject(FaqError::MalformedRequest(rejection.body_text())),
    };
    match question_from_body(&body) {
        Ok(question) => answer(&bot, question),
        Err(e) => reject(e),
    }
}

fn question_from_params(params: &HashMap<String, String>) -> Result<&str, FaqError> {
    QUESTION_FIELDS
        .iter()
        .find_map(|field| params.get(*field))
        .map(String::as_str)
        .ok_or_else(|| missing_field("query parameter"))
}

fn question_from_body(body: &Value) -> Result<&str, FaqError> {
    let object = body.as_object().ok_or_else(|| {
        FaqError::MalformedRequest("request body must be a JSON object".to_string())
    })?;
    let value = QUESTION_FIELDS
        .iter()
        .find_map(|field| object.get(*field))
        .ok_or_else(|| missing_field("field"))?;
    value
        .as_str()
        .ok_or_else(|| FaqError::InvalidInput("'question' must be a string".to_string()))
}

fn missing_field(kind: &str) -> FaqError {
    FaqError::MalformedRequest(format!("missing required {} 'question'", kind))
}

fn answer(bot: &Chatbot, question: &str) -> ChatReply {
    match bot.try_answer(question) {
        Ok(result) => {
            let envelope = EnvelopeFormatter.render(&result);
            debug!("Answered with confidence {:.3}", envelope.confidence);
            (StatusCode::OK, Json(envelope))
        }
        Err(e) => reject(e),
    }
}

fn reject(error: FaqError) -> ChatReply {
    warn!("Rejected chat request: {}", error);
    (
        StatusCode::BAD_REQUEST,
        Json(EnvelopeFormatter.render_error(&error.to_string())),
    )
}
