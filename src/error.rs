use std::path::PathBuf;

use crate::game::Move;

/// Errors produced by the game engine and its text formats.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("unable to parse {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },

    #[error("coordinates ({col}, {row}) are outside the 8x8 board")]
    OutOfRange { col: i64, row: i64 },

    #[error("invalid saved game: {black} black pieces, {white} white pieces")]
    Format { black: usize, white: usize },

    #[error("invalid move {0}")]
    InvalidMove(Move),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
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
