//! Error types shared by the dialog crates

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    UiLoad(String),

    #[error("UI closed without reporting a result")]
    UiClosed,
}

pub type Result<T> = std::result::Result<T, DialogError>;
