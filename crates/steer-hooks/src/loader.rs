//! Hook file discovery and parsing.
//!
//! Only the top level of the hook directory is scanned. Files are loaded
//! in file-name order so repeated loads are identical.

use std::path::{Path, PathBuf};

use steer_rules::PatternSet;
use steer_settings::{DEFAULT_MAX_FILE_SIZE, HookSourceSettings};
use tracing::debug;

use crate::errors::{HookLoadError, HookLoadErrorKind};
use crate::registry::LoadedHook;
use crate::types::{HookConfig, HookTrigger};

/// Default hook file suffix.
pub const DEFAULT_HOOK_SUFFIX: &str = ".kiro.hook";

/// How a hook directory is enumerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookLoadOptions {
    /// File name suffixes treated as hook files.
    pub suffixes: Vec<String>,
    /// Files larger than this fail the load.
    pub max_file_size: u64,
}

impl Default for HookLoadOptions {
    fn default() -> Self {
        Self {
            suffixes: vec![DEFAULT_HOOK_SUFFIX.to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl From<&HookSourceSettings> for HookLoadOptions {
    fn from(settings: &HookSourceSettings) -> Self {
        Self {
            suffixes: settings.suffixes.clone(),
            max_file_size: settings.max_file_size,
        }
    }
}

impl HookLoadOptions {
    /// The hook id for `file_name`, or `None` if no suffix matches.
    fn hook_id<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if file_name.starts_with('.') {
            return None;
        }
        self.suffixes
            .iter()
            .filter_map(|suffix| file_name.strip_suffix(suffix.as_str()))
            .find(|id| !id.is_empty())
    }
}

/// A hook file found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookSource {
    /// File name without the hook suffix.
    pub id: String,
    /// Full path.
    pub path: PathBuf,
}

/// List hook files in `dir`, sorted by file name.
pub fn discover_hooks(
    dir: &Path,
    options: &HookLoadOptions,
) -> Result<Vec<HookSource>, HookLoadError> {
    let metadata = std::fs::metadata(dir).map_err(|e| HookLoadError::new(dir, e))?;
    if !metadata.is_dir() {
        return Err(HookLoadError::new(dir, HookLoadErrorKind::NotADirectory));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| HookLoadError::new(dir, e))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HookLoadError::new(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(id) = options.hook_id(file_name) {
            sources.push(HookSource {
                id: id.to_string(),
                path: path.clone(),
            });
        }
    }

    sources.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sources)
}

/// Read, parse, and validate one hook file.
pub fn load_hook(
    source: &HookSource,
    options: &HookLoadOptions,
) -> Result<LoadedHook, HookLoadError> {
    let path = &source.path;
    let fail = |cause: HookLoadErrorKind| HookLoadError::new(path, cause);

    let size = std::fs::metadata(path).map_err(|e| fail(e.into()))?.len();
    if size > options.max_file_size {
        return Err(fail(HookLoadErrorKind::FileTooLarge {
            size,
            max: options.max_file_size,
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| fail(e.into()))?;
    let config: HookConfig = serde_json::from_str(&content).map_err(|e| fail(e.into()))?;

    if config.then.payload().trim().is_empty() {
        return Err(fail(HookLoadErrorKind::EmptyAction {
            action: config.then.kind(),
        }));
    }

    let matcher = match &config.when {
        HookTrigger::FileEdited { patterns }
        | HookTrigger::FileCreated { patterns }
        | HookTrigger::FileDeleted { patterns } => {
            if patterns.is_empty() {
                return Err(fail(HookLoadErrorKind::MissingPatterns {
                    trigger: config.when.kind(),
                }));
            }
            Some(PatternSet::compile(patterns).map_err(|e| fail(e.into()))?)
        }
        HookTrigger::PromptSubmit | HookTrigger::AgentStop | HookTrigger::UserTriggered => None,
    };

    debug!(
        id = %source.id,
        trigger = config.when.kind(),
        enabled = config.enabled,
        "loaded hook"
    );

    Ok(LoadedHook {
        id: source.id.clone(),
        path: path.clone(),
        config,
        matcher,
    })
}
