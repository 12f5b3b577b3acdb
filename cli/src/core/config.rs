//! # DroneFAQ Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the DroneFAQ configuration. The
//! only settings that affect answers are the catalog and the acceptance
//! threshold; the `[server]` section only shapes how `dronefaq serve` binds.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` or `DRONEFAQ_CONFIG` (when set,
//!    discovery is skipped entirely)
//! 2. Project-specific `.dronefaq.toml` in the current directory or an
//!    ancestor (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/dronefaq/config.toml`)
//! 4. Default values defined in the code
//!
//! Catalog paths are `~`-expanded and, when relative, resolved against the
//! directory of the file that names them.
//!
//! ## Examples
//!
//! ```toml
//! [matcher]
//! threshold = 0.45
//!
//! [catalog]
//! path = "faq/drone.toml"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! enable_cors = false
//! ```
//!
//! Inline entries can replace the catalog file:
//!
//! ```toml
//! [[catalog.entries]]
//! question = "Does it come with spare propellers?"
//! answer = "Yes, two spare sets are in the box."
//! keywords = ["spare", "propellers"]
//! ```
//!
use crate::core::error::{FaqError, Result};
use crate::faq::{CatalogSource, EntrySpec, DEFAULT_THRESHOLD};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the project configuration file searched for upwards from the
/// current directory.
pub const PROJECT_CONFIG_FILENAME: &str = ".dronefaq.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Matching parameters.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfig {
    /// Minimum confidence for a match to be reported (in `(0, 1]`).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Where the canonical questions come from. Leave both fields unset to use
/// the built-in drone catalog.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path to a TOML or JSON catalog file (can use ~).
    pub path: Option<String>,
    /// Inline catalog entries.
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
}

/// Defaults for `dronefaq serve`; command-line flags override them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}
pub(crate) fn default_port() -> u16 {
    5000
}
fn default_enable_cors() -> bool {
    true
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

impl Config {
    /// The catalog source this configuration selects.
    pub fn catalog_source(&self) -> CatalogSource {
        if !self.catalog.entries.is_empty() {
            CatalogSource::Inline(self.catalog.entries.clone())
        } else if let Some(path) = &self.catalog.path {
            CatalogSource::File(PathBuf::from(path))
        } else {
            CatalogSource::Builtin
        }
    }
}

/// # Load Configuration (`load_config`)
///
/// Builds the effective configuration. With `explicit` set, only that file is
/// read; otherwise the user and project files are discovered and merged.
///
/// ## Errors
///
/// Returns an error if a configuration file exists but cannot be read or
/// parsed, or if the merged configuration fails validation.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "DroneFAQ", "dronefaq") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in current directory or ancestors.",
            PROJECT_CONFIG_FILENAME
        );
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for
/// `.dronefaq.toml`, stopping at the first directory that holds `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one TOML configuration file and resolves its catalog path against
/// the file's directory.
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    resolve_catalog_path(&mut config, path.parent());
    Ok(config)
}

fn resolve_catalog_path(config: &mut Config, base_dir: Option<&Path>) {
    let Some(raw) = config.catalog.path.as_deref() else {
        return;
    };
    let mut resolved = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if resolved.is_relative() {
        if let Some(base) = base_dir {
            resolved = base.join(resolved);
        }
    }
    debug!("Resolved catalog path '{}' to {}", raw, resolved.display());
    config.catalog.path = Some(resolved.to_string_lossy().into_owned());
}

/// Project settings win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let mut merged = Config::default();

    merged.matcher.threshold = if project_cfg.matcher.threshold != defaults.matcher.threshold {
        project_cfg.matcher.threshold
    } else {
        user.matcher.threshold
    };
    // The catalog is taken as a whole; mixing one file's path with the other's
    // inline entries would be ambiguous.
    merged.catalog = if project_cfg.catalog != CatalogConfig::default() {
        project_cfg.catalog
    } else {
        user.catalog
    };
    merged.server.host = if project_cfg.server.host != defaults.server.host {
        project_cfg.server.host
    } else {
        user.server.host
    };
    merged.server.port = if project_cfg.server.port != defaults.server.port {
        project_cfg.server.port
    } else {
        user.server.port
    };
    merged.server.enable_cors = if project_cfg.server.enable_cors != defaults.server.enable_cors {
        project_cfg.server.enable_cors
    } else {
        user.server.enable_cors
    };
    merged
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let threshold = config.matcher.threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(anyhow!(FaqError::Config(format!(
            "matcher.threshold must be in (0, 1], got {}",
            threshold
        ))));
    }
    if config.catalog.path.is_some() && !config.catalog.entries.is_empty() {
        return Err(anyhow!(FaqError::Config(
            "set either catalog.path or catalog.entries, not both".to_string()
        )));
    }
    if let Some(path) = &config.catalog.path {
        if !Path::new(path).is_file() {
            return Err(anyhow!(FaqError::Config(format!(
                "Configured catalog path '{}' does not exist or is not a file.",
                path
            ))));
        }
    }
    if config.server.host.parse::<IpAddr>().is_err() {
        return Err(anyhow!(FaqError::Config(format!(
            "Invalid server.host '{}'. Expected an IP address such as 127.0.0.1.",
            config.server.host
        ))));
    }
    info!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_full_toml() {
        let toml_content = r#"
            [matcher]
            threshold = 0.55

            [[catalog.entries]]
            question = "Does it fold?"
            answer = "Yes."
            keywords = ["fold"]

            [server]
            host = "0.0.0.0"
            port = 8080
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.matcher.threshold, 0.55);
        assert_eq!(config.catalog.entries.len(), 1);
        assert_eq!(config.catalog.entries[0].keywords, vec!["fold"]);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.enable_cors); // Default
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matcher.threshold, 0.4);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.catalog_source(), CatalogSource::Builtin);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[matcher]\nstrategy = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_source_selection() {
        let mut config = Config::default();
        config.catalog.path = Some("/tmp/faq.toml".into());
        assert_eq!(
            config.catalog_source(),
            CatalogSource::File(PathBuf::from("/tmp/faq.toml"))
        );

        config.catalog.path = None;
        config.catalog.entries = vec![EntrySpec::new("Q?", "A.")];
        assert!(matches!(config.catalog_source(), CatalogSource::Inline(ref e) if e.len() == 1));
    }

    #[test]
    fn test_relative_catalog_path_resolves_against_config_dir() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, "[catalog]\npath = \"data/faq.toml\"\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        let expected = dir.path().join("data/faq.toml").to_string_lossy().into_owned();
        assert_eq!(config.catalog.path.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_absolute_catalog_path_is_kept() {
        let mut config = Config::default();
        config.catalog.path = Some("/srv/faq.json".into());
        resolve_catalog_path(&mut config, Some(Path::new("/etc/dronefaq")));
        assert_eq!(config.catalog.path.as_deref(), Some("/srv/faq.json"));
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let mut user = Config::default();
        user.matcher.threshold = 0.6;
        user.server.port = 9000;
        user.catalog.path = Some("/user/faq.toml".into());

        let mut project = Config::default();
        project.server.port = 7000;
        project.catalog.entries = vec![EntrySpec::new("Q?", "A.")];

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.matcher.threshold, 0.6); // project left default
        assert_eq!(merged.server.port, 7000);
        assert_eq!(merged.catalog.path, None); // catalog taken as a whole
        assert_eq!(merged.catalog.entries.len(), 1);
    }

    #[test]
    fn test_merge_without_project_returns_user() {
        let mut user = Config::default();
        user.server.enable_cors = false;
        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_find_project_config_walks_up_and_stops_at_git() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        let config_path = root.path().join("a").join(PROJECT_CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();
        assert_eq!(find_project_config_path(&nested), Some(config_path));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("faq.toml"),
            "[[entries]]\nquestion = \"Q?\"\nanswer = \"A.\"\n",
        )
        .unwrap();
        let config_path = dir.path().join("dronefaq.toml");
        fs::write(
            &config_path,
            "[matcher]\nthreshold = 0.5\n[catalog]\npath = \"faq.toml\"\n",
        )
        .unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.matcher.threshold, 0.5);
        assert!(matches!(config.catalog_source(), CatalogSource::File(p) if p.ends_with("faq.toml")));
    }

    #[test]
    fn test_validate_config_threshold_range() {
        for threshold in [0.0, -0.1, 1.01, f64::NAN] {
            let mut config = Config::default();
            config.matcher.threshold = threshold;
            let result = validate_config(&config);
            assert!(result.is_err(), "threshold {} accepted", threshold);
            assert!(result.unwrap_err().to_string().contains("matcher.threshold"));
        }
        let mut config = Config::default();
        config.matcher.threshold = 1.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_path_and_entries() {
        let dir = tempdir().unwrap();
        let faq = dir.path().join("faq.toml");
        fs::write(&faq, "").unwrap();

        let mut config = Config::default();
        config.catalog.path = Some(faq.to_string_lossy().into_owned());
        config.catalog.entries = vec![EntrySpec::new("Q?", "A.")];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn test_validate_config_missing_catalog_file() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.catalog.path = Some(dir.path().join("missing.toml").to_string_lossy().into_owned());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_config_invalid_host() {
        let mut config = Config::default();
        config.server.host = "localhost:80".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid server.host"));
    }
}
