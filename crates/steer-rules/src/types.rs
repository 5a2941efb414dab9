//! Core types for steering documents.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ParseError;

/// When a steering document is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InclusionMode {
    /// Included for every path.
    #[default]
    Always,
    /// Included when a file pattern matches the path.
    FileMatch,
    /// Included only on explicit request.
    Manual,
}

impl InclusionMode {
    /// The header spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::FileMatch => "fileMatch",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for InclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InclusionMode {
    type Err = ParseError;

    /// Exact, case-sensitive match on the header spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "fileMatch" => Ok(Self::FileMatch),
            "manual" => Ok(Self::Manual),
            other => Err(ParseError::InvalidInclusionMode {
                value: other.to_string(),
            }),
        }
    }
}

/// A parsed steering document.
///
/// `file_patterns` is non-empty exactly when the mode is
/// [`InclusionMode::FileMatch`]; the parser is the only constructor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    pub(crate) title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) inclusion_mode: InclusionMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) file_patterns: Vec<String>,
    pub(crate) body: String,
}

impl RuleDocument {
    /// Title from the header, or the rule id when the header has none.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional header description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// When this document applies.
    pub fn inclusion_mode(&self) -> InclusionMode {
        self.inclusion_mode
    }

    /// Glob patterns, in header order. Empty unless the mode is `fileMatch`.
    pub fn file_patterns(&self) -> &[String] {
        &self.file_patterns
    }

    /// Everything after the header block.
    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            InclusionMode::Always,
            InclusionMode::FileMatch,
            InclusionMode::Manual,
        ] {
            assert_eq!(mode.as_str().parse::<InclusionMode>(), Ok(mode));
        }
    }

    #[test]
    fn mode_parse_is_case_sensitive() {
        assert_eq!(
            "Always".parse::<InclusionMode>(),
            Err(ParseError::InvalidInclusionMode {
                value: "Always".into()
            })
        );
        assert!("filematch".parse::<InclusionMode>().is_err());
        assert!("".parse::<InclusionMode>().is_err());
    }

    #[test]
    fn default_mode_is_always() {
        assert_eq!(InclusionMode::default(), InclusionMode::Always);
    }

    #[test]
    fn mode_serializes_camel_case() {
        let json = serde_json::to_string(&InclusionMode::FileMatch).unwrap();
        assert_eq!(json, "\"fileMatch\"");
    }
}
