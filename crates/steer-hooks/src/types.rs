//! Hook configuration types.
//!
//! Field and tag names are camelCase to match the JSON hook files editors
//! write. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Something that happened in the editor or agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookEvent {
    /// A file was saved.
    FileEdited,
    /// A file was created.
    FileCreated,
    /// A file was deleted.
    FileDeleted,
    /// The user submitted a prompt.
    PromptSubmit,
    /// The agent finished a turn.
    AgentStop,
}

impl HookEvent {
    /// Whether this event concerns a specific file path.
    pub fn is_file_event(self) -> bool {
        matches!(self, Self::FileEdited | Self::FileCreated | Self::FileDeleted)
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileEdited => write!(f, "fileEdited"),
            Self::FileCreated => write!(f, "fileCreated"),
            Self::FileDeleted => write!(f, "fileDeleted"),
            Self::PromptSubmit => write!(f, "promptSubmit"),
            Self::AgentStop => write!(f, "agentStop"),
        }
    }
}

/// The `when` block: what makes a hook fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HookTrigger {
    /// A matching file was saved.
    FileEdited {
        /// Glob patterns, same syntax as steering documents.
        patterns: Vec<String>,
    },
    /// A matching file was created.
    FileCreated {
        /// Glob patterns.
        patterns: Vec<String>,
    },
    /// A matching file was deleted.
    FileDeleted {
        /// Glob patterns.
        patterns: Vec<String>,
    },
    /// Every prompt submission.
    PromptSubmit,
    /// Every agent stop.
    AgentStop,
    /// Only when the user runs the hook by hand.
    UserTriggered,
}

impl HookTrigger {
    /// Header spelling of the trigger type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileEdited { .. } => "fileEdited",
            Self::FileCreated { .. } => "fileCreated",
            Self::FileDeleted { .. } => "fileDeleted",
            Self::PromptSubmit => "promptSubmit",
            Self::AgentStop => "agentStop",
            Self::UserTriggered => "userTriggered",
        }
    }

    /// The event this trigger listens for; `None` for manual hooks.
    pub fn event(&self) -> Option<HookEvent> {
        match self {
            Self::FileEdited { .. } => Some(HookEvent::FileEdited),
            Self::FileCreated { .. } => Some(HookEvent::FileCreated),
            Self::FileDeleted { .. } => Some(HookEvent::FileDeleted),
            Self::PromptSubmit => Some(HookEvent::PromptSubmit),
            Self::AgentStop => Some(HookEvent::AgentStop),
            Self::UserTriggered => None,
        }
    }

    /// File patterns for file triggers, empty otherwise.
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::FileEdited { patterns }
            | Self::FileCreated { patterns }
            | Self::FileDeleted { patterns } => patterns,
            Self::PromptSubmit | Self::AgentStop | Self::UserTriggered => &[],
        }
    }
}

/// The `then` block: what the agent is asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HookAction {
    /// Send a prompt to the agent.
    AskAgent {
        /// Prompt text.
        prompt: String,
    },
    /// Run a shell command.
    RunCommand {
        /// Command line.
        command: String,
    },
}

impl HookAction {
    /// Action type as written.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AskAgent { .. } => "askAgent",
            Self::RunCommand { .. } => "runCommand",
        }
    }

    /// The prompt or command text.
    pub fn payload(&self) -> &str {
        match self {
            Self::AskAgent { prompt } => prompt,
            Self::RunCommand { command } => command,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One hook file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookConfig {
    /// Disabled hooks load but never fire.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display name.
    pub name: String,
    /// What the hook is for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Schema version written by the editor.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Trigger.
    pub when: HookTrigger,
    /// Action.
    pub then: HookAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_file_hook() {
        let json = r#"{
            "enabled": true,
            "name": "Go lint",
            "description": "Vet after edits",
            "version": "1",
            "when": { "type": "fileEdited", "patterns": ["**/*.go"] },
            "then": { "type": "askAgent", "prompt": "Run go vet." }
        }"#;
        let hook: HookConfig = serde_json::from_str(json).unwrap();
        assert_eq!(hook.name, "Go lint");
        assert_eq!(hook.when.event(), Some(HookEvent::FileEdited));
        assert_eq!(hook.when.patterns(), ["**/*.go"]);
        assert_eq!(hook.then.kind(), "askAgent");
        assert_eq!(hook.then.payload(), "Run go vet.");
    }

    #[test]
    fn enabled_defaults_true_and_unknown_fields_ignored() {
        let json = r#"{
            "name": "Manual",
            "workspaceFolderName": "infra",
            "when": { "type": "userTriggered" },
            "then": { "type": "runCommand", "command": "terraform fmt" }
        }"#;
        let hook: HookConfig = serde_json::from_str(json).unwrap();
        assert!(hook.enabled);
        assert_eq!(hook.when, HookTrigger::UserTriggered);
        assert_eq!(hook.when.event(), None);
        assert!(hook.when.patterns().is_empty());
    }

    #[test]
    fn unknown_trigger_type_rejected() {
        let json = r#"{"name": "x", "when": {"type": "onSave"}, "then": {"type": "askAgent", "prompt": "p"}}"#;
        assert!(serde_json::from_str::<HookConfig>(json).is_err());
    }

    #[test]
    fn serialize_round_trip_shape() {
        let hook = HookConfig {
            enabled: false,
            name: "Stop".into(),
            description: String::new(),
            version: String::new(),
            when: HookTrigger::AgentStop,
            then: HookAction::AskAgent {
                prompt: "Summarize.".into(),
            },
        };
        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(value["when"]["type"], "agentStop");
        assert_eq!(value["then"]["type"], "askAgent");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn event_display_matches_trigger_kind() {
        let trigger = HookTrigger::FileDeleted { patterns: vec![] };
        assert_eq!(trigger.event().unwrap().to_string(), trigger.kind());
        assert!(HookEvent::FileCreated.is_file_event());
        assert!(!HookEvent::PromptSubmit.is_file_event());
    }
}
