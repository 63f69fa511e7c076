//! Tutor configuration
//!
//! Values come from an optional JSON file and are then overridden by
//! environment variables:
//!
//! | Variable              | Field                  |
//! |-----------------------|------------------------|
//! | `OPENAI_API_KEY`      | `api_key`              |
//! | `GTUTOR_API_BASE`     | `api_base`             |
//! | `GTUTOR_MODEL`        | `model`                |
//! | `GTUTOR_TIMEOUT_SECS` | `request_timeout_secs` |
//! | `GTUTOR_SOCKET`       | `socket_path`          |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::graph::SampleOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Chat-completion API key; dialogue degrades when absent
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub socket_path: PathBuf,
    /// Parameters for the graph each new session starts with
    pub sample: SampleOptions,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            request_timeout_secs: 30,
            socket_path: PathBuf::from("/tmp/gtutor.sock"),
            sample: SampleOptions::default(),
        }
    }
}

impl TutorConfig {
    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// JSON file plus environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// JSON file only
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = fs::File::open(path.as_ref())?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(base) = lookup("GTUTOR_API_BASE") {
            self.api_base = base;
        }
        if let Some(model) = lookup("GTUTOR_MODEL") {
            self.model = model;
        }
        if let Some(raw) = lookup("GTUTOR_TIMEOUT_SECS") {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                TutorError::Config(format!("GTUTOR_TIMEOUT_SECS must be a number of seconds, got {:?}", raw))
            })?;
        }
        if let Some(socket) = lookup("GTUTOR_SOCKET") {
            self.socket_path = PathBuf::from(socket);
        }
        Ok(())
    }
}
