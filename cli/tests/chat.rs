//! # `dronefaq chat` Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! Drives the console loop through stdin.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_chat_help_then_exit() {
    Sandbox::new()
        .cmd()
        .args(["chat", "--no-banner"])
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available questions:"))
        .stdout(predicate::str::contains("7. What is the maximum speed?"))
        .stdout(predicate::str::ends_with("Bot: Thank you for visiting. Goodbye!\n"));
}

#[test]
fn test_chat_answers_until_end_of_input() {
    Sandbox::new()
        .cmd()
        .arg("chat")
        .write_stdin("Is it waterproof or weather resistant?\n\nWhat is the payload capacity?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drone FAQ Chatbot - Console Mode"))
        .stdout(predicate::str::contains("Bot: The drone is weather-resistant (IP43)"))
        .stdout(predicate::str::contains("Bot: The drone can safely carry up to 500–700 grams"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_chat_alias() {
    Sandbox::new()
        .cmd()
        .args(["c", "--no-banner"])
        .write_stdin("bye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}
