//! # steer-logging
//!
//! `tracing` subscriber setup for hosts embedding the steer crates, plus an
//! in-memory capture layer for asserting on log output in tests.
//!
//! The library crates only emit events through the `tracing` macros; the
//! host decides where they go by calling one of the `init_*` functions once
//! at startup.

#![deny(unsafe_code)]

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

use steer_settings::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Default filter when neither the caller nor `RUST_LOG` supplies one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the env filter: `RUST_LOG` wins, then `level`, then [`DEFAULT_LEVEL`].
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize the global subscriber with compact human-readable output on stderr.
///
/// Subsequent calls are no-ops. `level` accepts any `EnvFilter` directive,
/// e.g. `"info"` or `"steer_rules=debug,warn"`.
pub fn init_subscriber(level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails only when a global subscriber is already set
    let _ = subscriber.try_init();
}

/// Initialize the global subscriber with newline-delimited JSON on stderr.
///
/// Intended for hosts that ship logs to a collector. Subsequent calls are no-ops.
pub fn init_json_subscriber(level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .json();

    let _ = subscriber.try_init();
}

/// Initialize the global subscriber from the `logging` settings section.
///
/// `json` selects [`init_json_subscriber`], otherwise [`init_subscriber`].
pub fn init_from_settings(settings: &LoggingSettings) {
    if settings.json {
        init_json_subscriber(&settings.level);
    } else {
        init_subscriber(&settings.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_subscriber_is_idempotent() {
        init_subscriber("warn");
        init_subscriber("debug");
        init_json_subscriber("info");
    }

    #[test]
    fn init_from_settings_accepts_both_formats() {
        init_from_settings(&LoggingSettings::default());
        init_from_settings(&LoggingSettings {
            level: "steer_rules=debug".to_string(),
            json: true,
        });
    }

    #[test]
    fn settings_level_becomes_filter() {
        let settings = LoggingSettings {
            level: "steer_rules=debug".to_string(),
            json: false,
        };
        let filter = build_filter(&settings.level).to_string();
        // RUST_LOG takes precedence when set in the test environment
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(filter.contains("steer_rules=debug"), "{filter}");
        }
    }

    #[test]
    fn invalid_level_falls_back() {
        // Must not panic on a directive EnvFilter rejects
        let _filter = build_filter("steer_rules=[[[");
    }
}
