//! Error type shared by every nicelog operation.
//!
//! Logging has no failure isolation: a sink that cannot write, or a value
//! that cannot be converted for display, surfaces to the caller of the level
//! method exactly as it was raised.

use std::fmt;
use std::io;

/// Result alias used throughout nicelog.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while building or emitting a log record.
#[derive(Debug)]
pub enum LogError {
    /// The sink failed to write the record.
    Io(io::Error),
    /// A value could not be converted into a displayable [`Value`](crate::Value).
    Serialize(serde_json::Error),
    /// A global `log` or `tracing` backend was already installed.
    Install(String),
}

impl LogError {
    /// Create an install error from any displayable cause.
    pub fn install(cause: impl fmt::Display) -> Self {
        Self::Install(cause.to_string())
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write log record: {err}"),
            Self::Serialize(err) => write!(f, "failed to convert log value: {err}"),
            Self::Install(cause) => write!(f, "failed to install global logger: {cause}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Install(_) => None,
        }
    }
}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}
