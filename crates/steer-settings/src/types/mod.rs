//! Settings type definitions.
//!
//! Field names are camelCase on the wire. Every struct is `#[serde(default)]`
//! so a partial settings file only needs the keys it changes.

mod sources;

pub use sources::*;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "rules": { "directory": "docs/steering", "recursive": true },
///   "watch": { "enabled": true }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SteerSettings {
    /// Steering document source.
    pub rules: RuleSourceSettings,
    /// Hook configuration source.
    pub hooks: HookSourceSettings,
    /// Directory watching.
    pub watch: WatchSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Directory watching and reload behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatchSettings {
    /// Reload automatically when the source directory changes.
    pub enabled: bool,
    /// Quiet period after the last filesystem event before reloading.
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            debounce_ms: 250,
        }
    }
}

/// Log output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `"info"` or `"steer_rules=debug"`.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}
