//! Where steering documents and hook files are read from.

use serde::{Deserialize, Serialize};

/// Default cap on a single source file (256 KiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024;

/// Steering document source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSourceSettings {
    /// Directory holding steering documents, relative to the project root
    /// unless absolute.
    pub directory: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File extensions (without the dot) treated as steering documents.
    pub extensions: Vec<String>,
    /// Files larger than this fail the load.
    pub max_file_size: u64,
}

impl Default for RuleSourceSettings {
    fn default() -> Self {
        Self {
            directory: ".kiro/steering".to_string(),
            recursive: false,
            extensions: vec!["md".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Hook configuration source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookSourceSettings {
    /// Directory holding hook files.
    pub directory: String,
    /// Load hooks at all.
    pub enabled: bool,
    /// File name suffixes treated as hook files.
    pub suffixes: Vec<String>,
    /// Files larger than this fail the load.
    pub max_file_size: u64,
}

impl Default for HookSourceSettings {
    fn default() -> Self {
        Self {
            directory: ".kiro/hooks".to_string(),
            enabled: true,
            suffixes: vec![".kiro.hook".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}
