//! Filesystem enumeration and per-file loading of steering documents.
//!
//! Documents are discovered in a deterministic order (sorted by
//! `/`-separated relative path) so two loads of the same directory produce
//! the same registry.

use std::path::{Path, PathBuf};

use steer_settings::{DEFAULT_MAX_FILE_SIZE, RuleSourceSettings};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::constants::DEFAULT_EXTENSION;
use crate::errors::{LoadError, LoadErrorKind};
use crate::parser::parse_rule_document;
use crate::pattern::PatternSet;
use crate::registry::LoadedRule;

/// How a rule directory is enumerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Accepted file extensions, without the dot, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Files larger than this fail the load.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl From<&RuleSourceSettings> for LoadOptions {
    fn from(settings: &RuleSourceSettings) -> Self {
        Self {
            recursive: settings.recursive,
            extensions: settings.extensions.clone(),
            max_file_size: settings.max_file_size,
        }
    }
}

impl LoadOptions {
    fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// A document found on disk, not yet read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSource {
    /// Relative path without extension, `/`-separated.
    pub id: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// Resolve a configured directory against the project root.
pub fn resolve_source_dir(project_root: &Path, directory: &str) -> PathBuf {
    let dir = Path::new(directory);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        project_root.join(dir)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Join path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Derive the rule id from a path relative to the root.
fn rule_id(relative: &Path) -> String {
    slash_path(&relative.with_extension(""))
}

/// List the documents under `root` in load order.
///
/// Hidden files and directories are skipped, as are files whose extension
/// is not accepted. A missing or unreadable root is an error.
pub fn discover_documents(
    root: &Path,
    options: &LoadOptions,
) -> Result<Vec<DocumentSource>, LoadError> {
    let metadata = std::fs::metadata(root).map_err(|e| LoadError::new(root, e))?;
    if !metadata.is_dir() {
        return Err(LoadError::new(root, LoadErrorKind::NotADirectory));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            LoadError::new(path, e)
        })?;

        let path = entry.path();
        // `is_file` follows symlinks, so linked documents are included
        if !path.is_file() || !options.accepts(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        sources.push((
            slash_path(relative),
            DocumentSource {
                id: rule_id(relative),
                path: path.to_path_buf(),
            },
        ));
    }

    // Walk order is depth-first; load order is by full relative path
    sources.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(sources.into_iter().map(|(_, source)| source).collect())
}

/// Read, parse, and compile one document.
pub fn load_document(
    source: &DocumentSource,
    options: &LoadOptions,
) -> Result<LoadedRule, LoadError> {
    let path = &source.path;

    let size = std::fs::metadata(path)
        .map_err(|e| LoadError::new(path, e))?
        .len();
    if size > options.max_file_size {
        return Err(LoadError::new(
            path,
            LoadErrorKind::FileTooLarge {
                size,
                max: options.max_file_size,
            },
        ));
    }

    let content = std::fs::read_to_string(path).map_err(|e| LoadError::new(path, e))?;
    let mut document = parse_rule_document(&content).map_err(|e| LoadError::new(path, e))?;

    let matcher = if document.file_patterns.is_empty() {
        None
    } else {
        Some(PatternSet::compile(&document.file_patterns).map_err(|e| LoadError::new(path, e))?)
    };

    if document.title.is_empty() {
        document.title.clone_from(&source.id);
    }

    debug!(
        id = %source.id,
        mode = %document.inclusion_mode,
        patterns = document.file_patterns.len(),
        "loaded steering document"
    );

    Ok(LoadedRule {
        id: source.id.clone(),
        path: path.clone(),
        document,
        matcher,
    })
}
