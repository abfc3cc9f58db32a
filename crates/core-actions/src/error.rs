//! Operation errors. Every failure leaves the buffer exactly as it was.

use core_pattern::{PatternError, SubstitutionError};
use core_state::StateError;
use std::path::Path;

/// User-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Pattern,
    NoBuffer,
    NoHistory,
    NoSelection,
    Validation,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("no document loaded; use `load` first")]
    NoBuffer,
    #[error("nothing to revert")]
    NoHistory,
    #[error("no active selection; run `select` first")]
    NoSelection,
    #[error("{0}")]
    Validation(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard: {0}")]
    Clipboard(String),
    #[error("pattern replace failed ({pattern}); literal retry failed ({literal})")]
    ReplaceFailed {
        pattern: String,
        literal: SubstitutionError,
    },
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Pattern(_) | Self::ReplaceFailed { .. } => ErrorKind::Pattern,
            Self::NoBuffer => ErrorKind::NoBuffer,
            Self::NoHistory => ErrorKind::NoHistory,
            Self::NoSelection => ErrorKind::NoSelection,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Io { .. } | Self::Clipboard(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn io(path: &Path, action: &str, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("{action} {}", path.display()),
            source,
        }
    }
}

impl From<StateError> for ActionError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::NoHistory => Self::NoHistory,
            StateError::NoSelection => Self::NoSelection,
        }
    }
}
