//! Configuration management for GhostMocks generation.
//!
//! This module defines the `Config` struct that controls where fixtures and
//! generated tests are written and how the generated tests talk to the app
//! under test. The configuration can be created programmatically or loaded
//! from a YAML or TOML file, and the CLI layers its flags on top.
//!
//! # Examples
//!
//! ```no_run
//! use ghostmocks_core::config::{Config, DuplicatePolicy};
//!
//! let mut config = Config::new("session.har");
//! config.mocks_dir = "angular-demo/mocks".into();
//! config.tests_dir = "angular-demo/tests".into();
//! config.on_duplicate = DuplicatePolicy::Suffix;
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// What to do when two extracted responses resolve to the same endpoint name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Later responses overwrite earlier output (last write wins)
    #[default]
    Overwrite,
    /// Later responses are written as `<endpoint>_2`, `<endpoint>_3`, ...
    Suffix,
    /// Later responses are reported as failures and nothing is written
    Reject,
}

/// Configuration for a GhostMocks run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the HAR capture (usually given on the command line instead)
    #[serde(default)]
    pub har_path: PathBuf,

    /// Directory receiving `<endpoint>.json` fixtures
    #[serde(default = "default_mocks_dir")]
    pub mocks_dir: PathBuf,

    /// Directory receiving `<endpoint>.spec.ts` tests
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// URL the generated tests navigate to
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Selector of the rendered list items
    #[serde(default = "default_list_selector")]
    pub list_selector: String,

    /// How long the generated test waits for the list selector
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Additional object keys whose values are redacted
    #[serde(default)]
    pub extra_secret_keys: Vec<String>,

    /// Handling of endpoint name collisions
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,

    /// Optional Tera template replacing the built-in Playwright spec
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(har_path: impl Into<PathBuf>) -> Self {
        Self {
            har_path: har_path.into(),
            mocks_dir: default_mocks_dir(),
            tests_dir: default_tests_dir(),
            app_url: default_app_url(),
            list_selector: default_list_selector(),
            wait_timeout_ms: default_wait_timeout_ms(),
            extra_secret_keys: Vec::new(),
            on_duplicate: DuplicatePolicy::default(),
            template_path: None,
        }
    }

    /// Load configuration from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported config format for {} (expected .yaml, .yml or .toml)",
                    path.display()
                )))
            }
        };
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

fn default_mocks_dir() -> PathBuf {
    PathBuf::from("mocks")
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}

fn default_app_url() -> String {
    "http://localhost:4200".to_string()
}

fn default_list_selector() -> String {
    "li".to_string()
}

fn default_wait_timeout_ms() -> u64 {
    5000
}
