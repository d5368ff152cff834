use std::path::PathBuf;
use std::time::Duration;

use crate::game::Player;

/// Errors raised while talking to a strategy program.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("failed to launch strategy {path}: {source}")]
    Launch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("strategy {name} closed its output before sending a move{}", stderr_suffix(.stderr))]
    StreamClosed { name: String, stderr: String },

    #[error("strategy {name} sent no move within {timeout:?}")]
    Timeout { name: String, timeout: Duration },

    #[error("strategy {name} sent a malformed move {reply:?}")]
    MalformedReply { name: String, reply: String },

    #[error("I/O error talking to strategy {name}: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },
}

impl StrategyError {
    /// Whether the match has to be aborted. A malformed reply is only an
    /// illegal move and the strategy gets asked again.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StrategyError::MalformedReply { .. })
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(" (stderr: {stderr})")
    }
}

/// Errors that abort a match before it reaches an outcome.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("player {player}: {source}")]
    Strategy {
        player: Player,
        source: StrategyError,
    },
}

/// Errors parsing the 42-character board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("board must have 42 squares, got {0}")]
    Length(usize),

    #[error("invalid board symbol {0:?}")]
    Symbol(char),
}

/// Errors parsing a request line on the strategy side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRequestError {
    #[error("request has no space between player and board: {0:?}")]
    MissingSeparator(String),

    #[error("invalid player symbol {0:?}")]
    Player(String),

    #[error("invalid board: {0}")]
    Board(#[from] ParseBoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
