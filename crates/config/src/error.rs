//! Error types for configuration loading and validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, or validating a configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or schema error; the message carries the RON position.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The file parsed but a value is out of range or inconsistent.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        let (kind, path, message) = match self {
            Self::Read { path, message } => ("Read error", path, message),
            Self::Parse { path, message } => ("Config parse error", path, message),
            Self::Validation { path, message } => ("Config validation error", path, message),
        };
        match path {
            Some(p) => format!("{} at {}: {}", kind, p.display(), message),
            None => format!("{}: {}", kind, message),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `path` to an error that does not carry one yet.
    pub(crate) fn with_path(self, p: &Path) -> Self {
        let fill = |path: Option<PathBuf>| path.or_else(|| Some(p.to_path_buf()));
        match self {
            Self::Read { path, message } => Self::Read {
                path: fill(path),
                message,
            },
            Self::Parse { path, message } => Self::Parse {
                path: fill(path),
                message,
            },
            Self::Validation { path, message } => Self::Validation {
                path: fill(path),
                message,
            },
        }
    }
}
