use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file looked up in the current directory.
pub const CONFIG_FILE: &str = ".gh-pr-helper.toml";

/// Env var consulted when no backend token is configured.
pub const TOKEN_ENV_VAR: &str = "GH_PR_HELPER_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .gh-pr-helper.toml.
///
/// All fields are optional — the tool works with zero config, in which case
/// no backend is contacted and the fallback template is always used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Description backend (the external AI collaborator) settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Diff extraction timing knobs
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Description composition knobs
    #[serde(default)]
    pub compose: ComposeConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    /// HTTP endpoint the generation request envelope is POSTed to.
    /// If None, generation always takes the fallback-template path.
    pub endpoint: Option<String>,

    /// Bearer token for the endpoint. If None, falls back to the
    /// GH_PR_HELPER_TOKEN env var.
    pub token: Option<String>,
}

/// Timing constants for the lazy-loaded diff wait. The numbers are arbitrary,
/// so they live in config rather than code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upper bound on how long to wait for diff containers after activating
    /// the "Files changed" tab, in milliseconds.
    pub lazy_load_delay_ms: u64,

    /// Interval between container-presence polls, in milliseconds.
    pub poll_interval_ms: u64,

    /// Skip polling and sleep for the full lazy_load_delay_ms instead.
    pub use_fixed_delay: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lazy_load_delay_ms: 1000,
            poll_interval_ms: 100,
            use_fixed_delay: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Diff text longer than this is replaced by a placeholder note in the
    /// fallback template's "Changes Made" section.
    pub inline_diff_limit: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            inline_diff_limit: 200,
        }
    }
}

impl Config {
    /// Load configuration from .gh-pr-helper.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        if config.backend.token.is_none() {
            if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
                config.backend.token = Some(token);
            }
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the backend token: config file value takes precedence,
    /// falls back to the GH_PR_HELPER_TOKEN env var.
    pub fn backend_token(&self) -> Option<String> {
        self.backend
            .token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
    }
}
