//! Hook loading errors.

use std::path::{Path, PathBuf};

use steer_rules::PatternError;
use thiserror::Error;

/// Why a hook load failed.
#[derive(Debug, Error)]
pub enum HookLoadErrorKind {
    /// Reading the directory or a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source path exists but is not a directory.
    #[error("not a directory")]
    NotADirectory,

    /// The file exceeds the configured size cap.
    #[error("file too large ({size} bytes > {max} bytes)")]
    FileTooLarge {
        /// Actual size.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The file is not a valid hook document.
    #[error("invalid hook JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file trigger pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A file trigger without patterns.
    #[error("file trigger '{trigger}' requires at least one pattern")]
    MissingPatterns {
        /// Trigger type as written.
        trigger: &'static str,
    },

    /// The action has an empty prompt or command.
    #[error("hook action '{action}' is empty")]
    EmptyAction {
        /// Action type as written.
        action: &'static str,
    },

    /// Two files map to the same hook id.
    #[error("duplicate hook id '{id}' (already loaded from {})", .first.display())]
    DuplicateId {
        /// The colliding id.
        id: String,
        /// File that claimed the id first.
        first: PathBuf,
    },
}

/// A failed hook load, naming the file or directory at fault.
#[derive(Debug, Error)]
#[error("failed to load hook {}: {cause}", .path.display())]
pub struct HookLoadError {
    /// File or directory that could not be loaded.
    pub path: PathBuf,
    /// Underlying failure.
    #[source]
    pub cause: HookLoadErrorKind,
}

impl HookLoadError {
    /// Attach a path to a failure.
    pub fn new(path: impl AsRef<Path>, cause: impl Into<HookLoadErrorKind>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cause: cause.into(),
        }
    }
}
