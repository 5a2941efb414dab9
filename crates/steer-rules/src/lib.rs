//! # steer-rules
//!
//! Loader and registry for steering documents: Markdown files with an
//! optional `---` header selecting when the document applies.
//!
//! ```text
//! ---
//! title: Go conventions
//! inclusion: fileMatch
//! fileMatchPattern: "**/*.go, go.mod"
//! ---
//! Prefer table-driven tests.
//! ```
//!
//! - [`parser`] turns one document into a [`RuleDocument`]
//! - [`pattern`] compiles and matches glob patterns
//! - [`registry`] loads a directory all-or-nothing and answers
//!   [`RuleRegistry::rules_for`]
//! - [`store`] holds the current registry snapshot and swaps it on reload
//! - [`watcher`] reloads the store when the directory changes

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod loader;
pub mod parser;
pub mod pattern;
pub mod registry;
pub mod store;
pub mod types;
pub mod watcher;

pub use errors::{LoadError, LoadErrorKind, ParseError, PatternError, WatchError};
pub use loader::LoadOptions;
pub use parser::parse_rule_document;
pub use pattern::{FilePattern, PatternSet, compile_pattern, matches};
pub use registry::{LoadedRule, RuleRegistry};
pub use store::RuleStore;
pub use types::{InclusionMode, RuleDocument};
pub use watcher::RuleWatcher;
