//! In-memory rule registry.
//!
//! Entries keep load order; lookups by id and by inclusion mode go through
//! indexes built once at load time. A registry is never mutated after it
//! is built: reloading produces a new one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info_span};

use crate::errors::{LoadError, LoadErrorKind};
use crate::loader::{self, LoadOptions};
use crate::pattern::PatternSet;
use crate::types::{InclusionMode, RuleDocument};

/// One loaded steering document with its identity and compiled patterns.
#[derive(Clone, Debug)]
pub struct LoadedRule {
    pub(crate) id: String,
    pub(crate) path: PathBuf,
    pub(crate) document: RuleDocument,
    pub(crate) matcher: Option<PatternSet>,
}

impl LoadedRule {
    /// Path relative to the loaded directory, without extension.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// File the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn document(&self) -> &RuleDocument {
        &self.document
    }

    /// Whether this rule is active for `path` under automatic inclusion.
    ///
    /// Manual rules never apply automatically.
    pub fn applies_to(&self, path: &str) -> bool {
        match self.document.inclusion_mode {
            InclusionMode::Always => true,
            InclusionMode::FileMatch => self.matcher.as_ref().is_some_and(|m| m.is_match(path)),
            InclusionMode::Manual => false,
        }
    }
}

/// Rules loaded from one directory.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    root: PathBuf,
    rules: Vec<LoadedRule>,
    by_id: HashMap<String, usize>,
    by_mode: HashMap<InclusionMode, Vec<usize>>,
}

impl RuleRegistry {
    /// Load every document in `dir` with default options.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(dir, &LoadOptions::default())
    }

    /// Load every document in `dir`.
    ///
    /// All-or-nothing: the first unreadable or malformed document fails the
    /// whole load.
    pub fn load_with(dir: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let root = dir.as_ref();
        let _span = info_span!("load_rules", root = %root.display()).entered();

        let sources = loader::discover_documents(root, options)?;
        let mut rules = Vec::with_capacity(sources.len());
        for source in &sources {
            rules.push(loader::load_document(source, options)?);
        }

        let registry = Self::from_rules(root.to_path_buf(), rules)?;
        debug!(count = registry.len(), "rule registry loaded");
        Ok(registry)
    }

    fn from_rules(root: PathBuf, rules: Vec<LoadedRule>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(rules.len());
        let mut by_mode: HashMap<InclusionMode, Vec<usize>> = HashMap::new();

        for (idx, rule) in rules.iter().enumerate() {
            if let Some(&first) = by_id.get(&rule.id) {
                let first: &LoadedRule = &rules[first];
                return Err(LoadError::new(
                    &rule.path,
                    LoadErrorKind::DuplicateId {
                        id: rule.id.clone(),
                        first: first.path.clone(),
                    },
                ));
            }
            let _ = by_id.insert(rule.id.clone(), idx);
            by_mode
                .entry(rule.document.inclusion_mode)
                .or_default()
                .push(idx);
        }

        Ok(Self {
            root,
            rules,
            by_id,
            by_mode,
        })
    }

    /// Directory this registry was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Documents active for `path`: every `always` rule plus every
    /// `fileMatch` rule with a matching pattern, in load order.
    pub fn rules_for(&self, path: &str) -> Vec<&RuleDocument> {
        self.entries_for(path)
            .into_iter()
            .map(LoadedRule::document)
            .collect()
    }

    /// Like [`rules_for`](Self::rules_for) but returns the full entries.
    pub fn entries_for(&self, path: &str) -> Vec<&LoadedRule> {
        self.rules.iter().filter(|r| r.applies_to(path)).collect()
    }

    /// Every `manual` rule, in load order.
    pub fn manual_rules(&self) -> Vec<&RuleDocument> {
        self.with_mode(InclusionMode::Manual)
            .into_iter()
            .map(LoadedRule::document)
            .collect()
    }

    /// Entries with the given inclusion mode, in load order.
    pub fn with_mode(&self, mode: InclusionMode) -> Vec<&LoadedRule> {
        self.by_mode
            .get(&mode)
            .map(|indexes| indexes.iter().map(|&i| &self.rules[i]).collect())
            .unwrap_or_default()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&LoadedRule> {
        self.by_id.get(id).map(|&i| &self.rules[i])
    }

    /// Whether an entry with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedRule> {
        self.rules.iter()
    }

    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the directory held no documents.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
