use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but could not be parsed
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid key chord '{0}'")]
    InvalidChord(String),

    /// A localized label has no English entry to rank against
    #[error("action '{0}' has no resolvable label")]
    UnresolvedLabel(String),

    #[error("action id must not be empty")]
    EmptyActionId,

    #[error("logging error: {0}")]
    Logging(String),
}
