//! Error types for loading steering documents.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Structural problems in a single document's header.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first line opens a header block but no closing `---` follows.
    #[error("header block is opened but never closed")]
    MalformedHeader,

    /// The inclusion mode is not `always`, `fileMatch` or `manual`.
    #[error("invalid inclusion mode '{value}' (expected always, fileMatch or manual)")]
    InvalidInclusionMode {
        /// The rejected value, unquoted.
        value: String,
    },

    /// `inclusion: fileMatch` without any `fileMatchPattern`.
    #[error("inclusion mode fileMatch requires at least one fileMatchPattern")]
    MissingFilePatterns,
}

/// A glob pattern that failed to compile.
#[derive(Clone, Debug, Error)]
#[error("invalid glob pattern '{pattern}': {source}")]
pub struct PatternError {
    /// The pattern as written in the document.
    pub pattern: String,
    /// What the glob compiler rejected.
    #[source]
    pub source: globset::Error,
}

/// Why a load failed.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    /// Reading the directory or a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking the directory tree failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

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

    /// The document header is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A file pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Two files map to the same rule id.
    #[error("duplicate rule id '{id}' (already loaded from {})", .first.display())]
    DuplicateId {
        /// The colliding id.
        id: String,
        /// File that claimed the id first.
        first: PathBuf,
    },
}

/// A failed load, naming the file or directory at fault.
#[derive(Debug, Error)]
#[error("failed to load {}: {cause}", .path.display())]
pub struct LoadError {
    /// File or directory that could not be loaded.
    pub path: PathBuf,
    /// Underlying failure.
    #[source]
    pub cause: LoadErrorKind,
}

impl LoadError {
    /// Attach a path to a failure.
    pub fn new(path: impl AsRef<Path>, cause: impl Into<LoadErrorKind>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cause: cause.into(),
        }
    }

    /// The parse failure behind this error, if any.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.cause {
            LoadErrorKind::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure to start watching a rule directory.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The platform watcher could not be created or attached.
    #[error("failed to watch {}: {source}", .path.display())]
    Notify {
        /// Directory being watched.
        path: PathBuf,
        /// Backend error.
        #[source]
        source: notify::Error,
    },

    /// The worker thread could not be spawned.
    #[error("failed to spawn watcher thread: {0}")]
    Spawn(#[from] std::io::Error),
}
