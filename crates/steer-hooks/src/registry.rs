//! Hook registry.
//!
//! Built once per load and never mutated; a reload builds a new registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use steer_rules::PatternSet;
use steer_settings::SteerSettings;
use tracing::debug;

use crate::errors::{HookLoadError, HookLoadErrorKind};
use crate::loader::{self, HookLoadOptions};
use crate::types::{HookConfig, HookEvent, HookTrigger};

/// One loaded hook file.
#[derive(Clone, Debug)]
pub struct LoadedHook {
    pub(crate) id: String,
    pub(crate) path: PathBuf,
    pub(crate) config: HookConfig,
    pub(crate) matcher: Option<PatternSet>,
}

impl LoadedHook {
    /// File name without the hook suffix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// File the hook was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed configuration.
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Whether this hook fires for `event` on `path`.
    ///
    /// Disabled and user-triggered hooks never fire. File triggers need a
    /// path that matches one of their patterns.
    pub fn fires_for(&self, event: HookEvent, path: Option<&str>) -> bool {
        if !self.config.enabled || self.config.when.event() != Some(event) {
            return false;
        }
        match &self.matcher {
            Some(matcher) => path.is_some_and(|p| matcher.is_match(p)),
            None => true,
        }
    }
}

/// Hooks loaded from one directory, in file-name order.
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: Vec<LoadedHook>,
    by_id: HashMap<String, usize>,
}

impl HookRegistry {
    /// Load every hook file in `dir` with default options.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, HookLoadError> {
        Self::load_with(dir, &HookLoadOptions::default())
    }

    /// Load every hook file in `dir`. The first bad file fails the load.
    pub fn load_with(
        dir: impl AsRef<Path>,
        options: &HookLoadOptions,
    ) -> Result<Self, HookLoadError> {
        let dir = dir.as_ref();
        let sources = loader::discover_hooks(dir, options)?;

        let mut registry = Self::default();
        for source in &sources {
            let hook = loader::load_hook(source, options)?;
            if let Some(&first) = registry.by_id.get(&hook.id) {
                return Err(HookLoadError::new(
                    &hook.path,
                    HookLoadErrorKind::DuplicateId {
                        id: hook.id.clone(),
                        first: registry.hooks[first].path.clone(),
                    },
                ));
            }
            let _ = registry.by_id.insert(hook.id.clone(), registry.hooks.len());
            registry.hooks.push(hook);
        }

        debug!(dir = %dir.display(), count = registry.len(), "hook registry loaded");
        Ok(registry)
    }

    /// Load the configured hook directory under `project_root`.
    ///
    /// Returns an empty registry when hooks are disabled in settings.
    pub fn load_from_settings(
        project_root: &Path,
        settings: &SteerSettings,
    ) -> Result<Self, HookLoadError> {
        if !settings.hooks.enabled {
            debug!("hooks disabled in settings");
            return Ok(Self::default());
        }
        let dir = steer_rules::loader::resolve_source_dir(project_root, &settings.hooks.directory);
        Self::load_with(dir, &HookLoadOptions::from(&settings.hooks))
    }

    /// Enabled hooks that fire for `event`, in load order.
    ///
    /// `path` is required for file events; without it no file hook fires.
    pub fn hooks_for(&self, event: HookEvent, path: Option<&str>) -> Vec<&LoadedHook> {
        self.hooks
            .iter()
            .filter(|h| h.fires_for(event, path))
            .collect()
    }

    /// Enabled hooks the user runs by hand.
    pub fn manual_hooks(&self) -> Vec<&LoadedHook> {
        self.hooks
            .iter()
            .filter(|h| h.config.enabled && h.config.when == HookTrigger::UserTriggered)
            .collect()
    }

    /// Look up a hook by id, enabled or not.
    pub fn get(&self, id: &str) -> Option<&LoadedHook> {
        self.by_id.get(id).map(|&i| &self.hooks[i])
    }

    /// Whether a hook with this id was loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All hooks in load order, including disabled ones.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedHook> {
        self.hooks.iter()
    }

    /// Number of loaded hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when the directory held no hook files.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HookAction;

    fn hook(id: &str, enabled: bool, when: HookTrigger) -> LoadedHook {
        let matcher = if when.patterns().is_empty() {
            None
        } else {
            Some(PatternSet::compile(when.patterns()).unwrap())
        };
        LoadedHook {
            id: id.to_string(),
            path: PathBuf::from(format!("{id}.kiro.hook")),
            config: HookConfig {
                enabled,
                name: id.to_string(),
                description: String::new(),
                version: "1".into(),
                when,
                then: HookAction::AskAgent {
                    prompt: format!("{id} prompt"),
                },
            },
            matcher,
        }
    }

    fn registry(hooks: Vec<LoadedHook>) -> HookRegistry {
        let by_id = hooks
            .iter()
            .enumerate()
            .map(|(i, h)| (h.id.clone(), i))
            .collect();
        HookRegistry { hooks, by_id }
    }

    fn ids(hooks: &[&LoadedHook]) -> Vec<String> {
        hooks.iter().map(|h| h.id().to_string()).collect()
    }

    fn sample() -> HookRegistry {
        registry(vec![
            hook(
                "go-vet",
                true,
                HookTrigger::FileEdited {
                    patterns: vec!["**/*.go".into()],
                },
            ),
            hook(
                "go-vet-off",
                false,
                HookTrigger::FileEdited {
                    patterns: vec!["**/*.go".into()],
                },
            ),
            hook(
                "new-tf",
                true,
                HookTrigger::FileCreated {
                    patterns: vec!["**/*.tf".into()],
                },
            ),
            hook("summary", true, HookTrigger::AgentStop),
            hook("docs", true, HookTrigger::UserTriggered),
            hook("docs-off", false, HookTrigger::UserTriggered),
        ])
    }

    #[test]
    fn file_event_matches_patterns() {
        let reg = sample();
        assert_eq!(
            ids(&reg.hooks_for(HookEvent::FileEdited, Some("cmd/main.go"))),
            vec!["go-vet"]
        );
        assert!(reg.hooks_for(HookEvent::FileEdited, Some("main.py")).is_empty());
        assert!(reg.hooks_for(HookEvent::FileEdited, None).is_empty());
    }

    #[test]
    fn event_kind_must_match() {
        let reg = sample();
        assert!(reg.hooks_for(HookEvent::FileDeleted, Some("x.tf")).is_empty());
        assert_eq!(
            ids(&reg.hooks_for(HookEvent::FileCreated, Some("x.tf"))),
            vec!["new-tf"]
        );
    }

    #[test]
    fn non_file_events_ignore_path() {
        let reg = sample();
        assert_eq!(ids(&reg.hooks_for(HookEvent::AgentStop, None)), vec!["summary"]);
        assert_eq!(
            ids(&reg.hooks_for(HookEvent::AgentStop, Some("any"))),
            vec!["summary"]
        );
        assert!(reg.hooks_for(HookEvent::PromptSubmit, None).is_empty());
    }

    #[test]
    fn disabled_hooks_never_returned() {
        let reg = sample();
        for event in [
            HookEvent::FileEdited,
            HookEvent::FileCreated,
            HookEvent::FileDeleted,
            HookEvent::PromptSubmit,
            HookEvent::AgentStop,
        ] {
            assert!(
                reg.hooks_for(event, Some("a/b.go"))
                    .iter()
                    .all(|h| h.config().enabled)
            );
        }
        assert_eq!(ids(&reg.manual_hooks()), vec!["docs"]);
    }

    #[test]
    fn lookup_includes_disabled() {
        let reg = sample();
        assert!(reg.get("go-vet-off").is_some());
        assert!(reg.contains("docs"));
        assert!(!reg.contains("missing"));
        assert_eq!(reg.len(), 6);
        assert_eq!(reg.iter().count(), 6);
        assert!(!HookRegistry::default().iter().any(|_| true));
    }

    #[test]
    fn settings_can_disable_hooks() {
        let mut settings = SteerSettings::default();
        settings.hooks.enabled = false;
        let reg = HookRegistry::load_from_settings(Path::new("/nonexistent"), &settings).unwrap();
        assert!(reg.is_empty());
    }
}
