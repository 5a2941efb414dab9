//! # steer-hooks
//!
//! Hook configurations tell an agent to act when something happens in the
//! editor: a file matching a pattern is saved, a prompt is submitted, the
//! agent stops, or the user clicks a button.
//!
//! Each hook lives in its own JSON file (`<name>.kiro.hook`):
//!
//! ```json
//! {
//!   "enabled": true,
//!   "name": "Go lint",
//!   "description": "Run vet after Go edits",
//!   "version": "1",
//!   "when": { "type": "fileEdited", "patterns": ["**/*.go"] },
//!   "then": { "type": "askAgent", "prompt": "Run go vet and fix findings." }
//! }
//! ```
//!
//! [`HookRegistry::load`] reads a directory of these all-or-nothing, reusing
//! the glob compiler from `steer-rules`, and [`HookRegistry::hooks_for`]
//! answers which hooks fire for an event.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod registry;
pub mod types;

pub use errors::{HookLoadError, HookLoadErrorKind};
pub use loader::HookLoadOptions;
pub use registry::{HookRegistry, LoadedHook};
pub use types::{HookAction, HookConfig, HookEvent, HookTrigger};
