//! # steer-settings
//!
//! Configuration for the steer loaders, resolved from three layers (lowest
//! priority first):
//! 1. **Compiled defaults**: [`SteerSettings::default()`]
//! 2. **User file**: `~/.steer/settings.json`, deep-merged over defaults
//! 3. **Environment variables**: `STEER_*` overrides
//!
//! # Usage
//!
//! ```no_run
//! use steer_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("steering rules live in {}", settings.rules.directory);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, deep_merge, load_settings, load_settings_from_path, settings_path,
};
pub use types::*;

use std::sync::OnceLock;

static SETTINGS: OnceLock<SteerSettings> = OnceLock::new();

/// Process-wide settings, loaded on first access.
///
/// Falls back to compiled defaults when the settings file cannot be read
/// or parsed.
pub fn get_settings() -> &'static SteerSettings {
    SETTINGS.get_or_init(|| match load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "failed to load settings, using defaults");
            SteerSettings::default()
        }
    })
}

/// Seed the process-wide settings before first access.
///
/// Hands the value back if settings were already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: SteerSettings) -> std::result::Result<(), SteerSettings> {
    SETTINGS.set(settings)
}
