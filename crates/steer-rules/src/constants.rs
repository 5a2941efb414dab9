//! Header keys and delimiters recognized in steering documents.

/// Line that opens and closes the header block.
pub const HEADER_DELIMITER: &str = "---";

/// Document title.
pub const KEY_TITLE: &str = "title";

/// One-line summary shown to hosts listing rules.
pub const KEY_DESCRIPTION: &str = "description";

/// Inclusion mode keys. `inclusion` is what editors write; `inclusionMode`
/// is accepted as an alias.
pub const KEYS_INCLUSION: &[&str] = &["inclusion", "inclusionMode"];

/// File pattern keys for `fileMatch` documents.
pub const KEYS_FILE_PATTERNS: &[&str] = &["fileMatchPattern", "fileMatchPatterns"];

/// Extension used for steering documents when none is configured.
pub const DEFAULT_EXTENSION: &str = "md";
