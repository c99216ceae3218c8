use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the simulation: loading settings and driving audio.
/// The simulation itself has no error paths.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("music file not found: {}", .0.display())]
    MusicMissing(PathBuf),

    #[error("audio backend error: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
