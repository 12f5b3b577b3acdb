//! # `dronefaq questions` Integration Tests
//!
//! File: cli/tests/questions.rs
//!
//! Also covers catalog selection through configuration files.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_questions_lists_builtin_catalog() {
    Sandbox::new()
        .cmd()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "1. What is the flight time of this drone?\n2. What is the maximum range?\n",
        ))
        .stdout(predicate::str::contains("8. Is it waterproof or weather-resistant?"));
}

#[test]
fn test_project_config_selects_json_catalog() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "faq.json",
        r#"[
            {"question": "Can I fly at night?", "answer": "Only with anti-collision lights."},
            {"question": "  can i fly at NIGHT?  ", "answer": "Duplicate, ignored."},
            {"question": "Is there a warranty?", "answer": "One year."}
        ]"#,
    );
    sandbox.write(".dronefaq.toml", "[catalog]\npath = \"faq.json\"\n");

    sandbox
        .cmd()
        .arg("q")
        .assert()
        .success()
        .stdout(predicate::eq("1. Can I fly at night?\n2. Is there a warranty?\n"));
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let sandbox = Sandbox::new();
    sandbox.write(
        ".dronefaq.toml",
        "[[catalog.entries]]\nquestion = \"Where is the manual?\"\nanswer = \"In the box.\"\n",
    );
    let nested = sandbox.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    sandbox
        .cmd()
        .current_dir(&nested)
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::eq("1. Where is the manual?\n"));
}

#[test]
fn test_user_config_is_used() {
    let sandbox = Sandbox::new();
    let user_dir = sandbox.path().join("xdg").join("dronefaq");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[[catalog.entries]]\nquestion = \"Who made this?\"\nanswer = \"Us.\"\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::eq("1. Who made this?\n"));
}

#[test]
fn test_missing_catalog_file_fails() {
    let sandbox = Sandbox::new();
    sandbox.write(".dronefaq.toml", "[catalog]\npath = \"nowhere.toml\"\n");

    sandbox
        .cmd()
        .arg("questions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_empty_catalog_fails() {
    let sandbox = Sandbox::new();
    sandbox.write("empty.json", "[]");
    sandbox.write(".dronefaq.toml", "[catalog]\npath = \"empty.json\"\n");

    sandbox
        .cmd()
        .arg("questions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog contains no entries"));
}
