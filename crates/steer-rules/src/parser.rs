//! Steering document parser.
//!
//! A document may open with a header block delimited by `---` lines. The
//! header is a small YAML subset: `key: value` pairs, inline arrays
//! (`[a, b]`), and `- item` lists. Blank lines and `#` comments (whole-line,
//! or trailing after whitespace outside quotes) are ignored, as are unknown
//! keys.

use crate::constants::{
    HEADER_DELIMITER, KEY_DESCRIPTION, KEY_TITLE, KEYS_FILE_PATTERNS, KEYS_INCLUSION,
};
use crate::errors::ParseError;
use crate::types::{InclusionMode, RuleDocument};

/// Header fields this crate understands, before validation.
#[derive(Debug, Default)]
struct RawHeader {
    title: Option<String>,
    description: Option<String>,
    inclusion: Option<String>,
    file_patterns: Vec<String>,
}

/// Parse raw document text into a [`RuleDocument`].
///
/// Without a header block the whole text is the body and the mode is
/// `always`. A header without a title yields an empty title; the loader
/// substitutes the rule id.
pub fn parse_rule_document(raw: &str) -> Result<RuleDocument, ParseError> {
    let Some((header, body)) = split_header(raw)? else {
        return Ok(RuleDocument {
            title: String::new(),
            description: None,
            inclusion_mode: InclusionMode::Always,
            file_patterns: Vec::new(),
            body: raw.to_string(),
        });
    };

    let raw_header = parse_header(header);

    let inclusion_mode = match raw_header.inclusion.as_deref() {
        Some(value) => value.parse()?,
        None => InclusionMode::Always,
    };

    let file_patterns = match inclusion_mode {
        InclusionMode::FileMatch if raw_header.file_patterns.is_empty() => {
            return Err(ParseError::MissingFilePatterns);
        }
        InclusionMode::FileMatch => raw_header.file_patterns,
        // Patterns only mean something for fileMatch documents
        InclusionMode::Always | InclusionMode::Manual => Vec::new(),
    };

    Ok(RuleDocument {
        title: raw_header.title.unwrap_or_default(),
        description: raw_header.description,
        inclusion_mode,
        file_patterns,
        body: body.to_string(),
    })
}

/// Split off the header block.
///
/// Returns `Ok(None)` when the first line is not a delimiter, and
/// `(header, body)` otherwise. The body starts after the closing
/// delimiter's line break.
fn split_header(raw: &str) -> Result<Option<(&str, &str)>, ParseError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != HEADER_DELIMITER {
        return Ok(None);
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == HEADER_DELIMITER {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok(Some((header, body)));
        }
        offset += line.len();
    }

    Err(ParseError::MalformedHeader)
}

fn parse_header(header: &str) -> RawHeader {
    let mut fields = RawHeader::default();
    let lines: Vec<&str> = header.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = strip_comment(value);

        if key == KEY_TITLE {
            fields.title = Some(unquote(value).to_string());
        } else if key == KEY_DESCRIPTION {
            fields.description = Some(unquote(value).to_string());
        } else if KEYS_INCLUSION.contains(&key) {
            fields.inclusion = Some(unquote(value).to_string());
        } else if KEYS_FILE_PATTERNS.contains(&key) {
            fields.file_patterns = parse_pattern_list(value, &lines, &mut i);
        }
    }

    fields
}

/// Read a pattern list written inline (`a, b` or `[a, b]`) or as `- item`
/// lines following the key.
fn parse_pattern_list(value: &str, lines: &[&str], i: &mut usize) -> Vec<String> {
    if !value.is_empty() {
        let inner = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            Some(inner) => inner,
            None => unquote(value),
        };
        return split_patterns(inner);
    }

    let mut items = Vec::new();
    while let Some(line) = lines.get(*i) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            *i += 1;
            continue;
        }
        let Some(item) = line.strip_prefix('-') else {
            break;
        };
        items.extend(split_patterns(unquote(strip_comment(item))));
        *i += 1;
    }
    items
}

/// Drop a trailing ` # comment` outside quotes and trim the rest.
///
/// A `#` only starts a comment at the beginning of the value or after
/// whitespace, so `a#b` is kept whole.
fn strip_comment(value: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev_is_space = true;
    for (idx, c) in value.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') if prev_is_space => return value[..idx].trim(),
            _ => {}
        }
        prev_is_space = c.is_whitespace();
    }
    value.trim()
}

/// Split a comma-separated pattern list.
///
/// Commas inside `{...}` alternations, `[...]` classes, or quotes belong to
/// the pattern. Empty entries are dropped.
pub fn split_patterns(list: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in list.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{' | '[') => depth += 1,
            (None, '}' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                push_pattern(&mut patterns, &list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    push_pattern(&mut patterns, &list[start..]);
    patterns
}

fn push_pattern(patterns: &mut Vec<String>, raw: &str) {
    let pattern = unquote(raw);
    if !pattern.is_empty() {
        patterns.push(pattern.to_string());
    }
}

/// Strip surrounding whitespace and one pair of matching quotes.
fn unquote(s: &str) -> &str {
    let trimmed = s.trim();
    for q in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
        {
            return inner;
        }
    }
    trimmed
}
