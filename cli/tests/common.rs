//! # Integration Test Helpers
//!
//! File: cli/tests/common.rs
//!
//! Every test runs the `dronefaq` binary inside a `Sandbox`: a temporary
//! working directory marked as a repository root (so project config
//! discovery stops there) and an empty user config directory.
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create sandbox dir");
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        fs::create_dir(dir.path().join("xdg")).expect("Failed to create xdg dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// A `dronefaq` command isolated from the caller's environment.
    pub fn cmd(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("dronefaq").expect("Failed to find dronefaq binary for testing");
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("DRONEFAQ_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
