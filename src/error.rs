use std::path::PathBuf;

use thiserror::Error;

use crate::core::sessions::UnknownSession;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Session(#[from] UnknownSession),
}
