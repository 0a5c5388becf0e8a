//! Runtime configuration
//!
//! Settings come from a `.env`-style file read into an explicit struct.
//! Variables already set in the process environment win over the file, which
//! never modifies the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Environment variable naming an alternative configuration file
pub const ENV_FILE_VAR: &str = "WEATHER_AGENT_ENV";

const KEYS: &[&str] = &[
    "GOOGLE_API_KEY",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "LLM_GATEWAY",
    "SELFPLAY_MAX_ITERATIONS",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings shared by the REPL and the evaluation harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// LLM gateway base URL; the gateway handles authentication
    pub gateway: Option<String>,
    /// Examiner/subject round pairs per self-play run
    pub max_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            gateway: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl AgentConfig {
    /// Build from key/value pairs. Unknown keys are ignored, empty values
    /// count as unset.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let max_iterations = match vars.get("SELFPLAY_MAX_ITERATIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SELFPLAY_MAX_ITERATIONS",
                value: raw.clone(),
            })?,
            None => DEFAULT_MAX_ITERATIONS,
        };

        Ok(Self {
            api_key: vars
                .get("GOOGLE_API_KEY")
                .or_else(|| vars.get("GEMINI_API_KEY"))
                .cloned(),
            model: vars
                .get("GEMINI_MODEL")
                .cloned()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gateway: vars.get("LLM_GATEWAY").cloned(),
            max_iterations,
        })
    }

    /// Load from the file at `path`. Keys set in the process environment
    /// take precedence over the file. A missing file is not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AgentConfig::load`], with `lookup` standing in for the process
    /// environment.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut pairs = read_env_file(path)?;

        for key in KEYS {
            if let Some(value) = lookup(*key) {
                pairs.insert((*key).to_string(), value);
            }
        }

        let config = Self::from_pairs(pairs)?;
        if config.api_key.is_none() && config.gateway.is_none() {
            tracing::warn!(
                path = %path.display(),
                "No GOOGLE_API_KEY configured; model requests will fail"
            );
        }
        Ok(config)
    }

    /// Load from `$WEATHER_AGENT_ENV`, or `.env` in the working directory.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let path = std::env::var_os(ENV_FILE_VAR)
            .map_or_else(|| PathBuf::from(".env"), PathBuf::from);
        Self::load(path)
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_file_error = |source| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "No environment file");
            return Ok(HashMap::new());
        }
        Err(e) => return Err(env_file_error(e)),
    };

    iter.map(|item| item.map_err(env_file_error)).collect()
}
