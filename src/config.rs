use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Default cap on consecutive rejected replies before a strategy forfeits.
pub const DEFAULT_MAX_ILLEGAL_MOVES: u32 = 100;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub referee: RefereeConfig,
}

/// Settings for the match driver and the strategy processes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    /// Consecutive rejected replies after which the player forfeits.
    /// `0` keeps asking forever.
    pub max_illegal_moves: u32,
    /// How long to wait for a reply line. `None` waits forever.
    pub read_timeout_ms: Option<u64>,
    /// Print the board before every move.
    pub verbose: bool,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        RefereeConfig {
            max_illegal_moves: DEFAULT_MAX_ILLEGAL_MOVES,
            read_timeout_ms: None,
            verbose: false,
        }
    }
}

impl RefereeConfig {
    /// Forfeit limit for the match driver. `None` when retries are unbounded.
    pub fn illegal_move_limit(&self) -> Option<u32> {
        (self.max_illegal_moves > 0).then_some(self.max_illegal_moves)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.referee.read_timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "referee.read_timeout_ms must be > 0 (omit it for no timeout)".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
