//! Settings loading with deep merge and environment variable overrides.
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::SteerSettings;

/// Resolve the path to the settings file (`~/.steer/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".steer").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<SteerSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; a malformed one is an error.
pub fn load_settings_from_path(path: &Path) -> Result<SteerSettings> {
    let defaults = serde_json::to_value(SteerSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: SteerSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `STEER_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut SteerSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// Invalid values are logged and ignored so a typo in the environment never
/// prevents startup.
pub fn apply_overrides_from<F>(settings: &mut SteerSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let string = |name: &str| lookup(name).filter(|v| !v.is_empty());
    let boolean = |name: &str| {
        let raw = lookup(name)?;
        let parsed = parse_bool(&raw);
        if parsed.is_none() {
            warn!(key = name, value = %raw, "invalid boolean env var, ignoring");
        }
        parsed
    };

    // ── Sources ─────────────────────────────────────────────────────
    if let Some(v) = string("STEER_RULES_DIR") {
        settings.rules.directory = v;
    }
    if let Some(v) = boolean("STEER_RULES_RECURSIVE") {
        settings.rules.recursive = v;
    }
    if let Some(v) = string("STEER_HOOKS_DIR") {
        settings.hooks.directory = v;
    }
    if let Some(v) = boolean("STEER_HOOKS_ENABLED") {
        settings.hooks.enabled = v;
    }

    // ── Watch ───────────────────────────────────────────────────────
    if let Some(v) = boolean("STEER_WATCH") {
        settings.watch.enabled = v;
    }
    if let Some(raw) = lookup("STEER_WATCH_DEBOUNCE_MS") {
        match parse_u64_range(&raw, 0, 60_000) {
            Some(v) => settings.watch.debounce_ms = v,
            None => warn!(
                key = "STEER_WATCH_DEBOUNCE_MS",
                value = %raw,
                "invalid u64 env var, ignoring"
            ),
        }
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = string("STEER_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = boolean("STEER_LOG_JSON") {
        settings.logging.json = v;
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}
