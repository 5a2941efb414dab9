//! Glob pattern compilation and path matching.
//!
//! - `*` matches any run of characters except `/`
//! - `**` as a whole path component matches any run including `/`
//! - `?`, `[...]` classes and `{a,b}` alternation are supported
//!
//! Matching is case-sensitive and anchored to the whole path. Paths are
//! separator-normalized before matching (`\` becomes `/`, leading `./` is
//! dropped). In patterns only a leading `./` is dropped: `\` escapes the
//! next character, so patterns must use `/` as the separator.

use std::borrow::Cow;

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::errors::PatternError;

/// Normalize a path for matching: `\` becomes `/` and leading `./` is dropped.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let mut normalized = if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    };

    let mut skip = 0;
    while normalized[skip..].starts_with("./") {
        skip += 2;
        while normalized[skip..].starts_with('/') {
            skip += 1;
        }
    }
    if skip > 0 {
        normalized = Cow::Owned(normalized[skip..].to_string());
    }
    normalized
}

fn build_glob(pattern: &str) -> Result<Glob, PatternError> {
    let trimmed = pattern.trim_start_matches("./");
    GlobBuilder::new(trimmed)
        .literal_separator(true)
        .case_insensitive(false)
        .backslash_escape(true)
        .build()
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}

/// A single compiled pattern.
#[derive(Clone, Debug)]
pub struct FilePattern {
    source: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(normalize_path(path).as_ref())
    }
}

/// Compile one pattern, rejecting malformed globs (e.g. an unclosed `[`).
pub fn compile_pattern(pattern: &str) -> Result<FilePattern, PatternError> {
    let glob = build_glob(pattern)?;
    Ok(FilePattern {
        source: pattern.to_string(),
        matcher: glob.compile_matcher(),
    })
}

/// Match `path` against `pattern` in one step.
///
/// A pattern that does not compile matches nothing. Use [`compile_pattern`]
/// to surface the error instead.
pub fn matches(path: &str, pattern: &str) -> bool {
    compile_pattern(pattern).is_ok_and(|p| p.is_match(path))
}

/// Several patterns compiled into one matcher; a path matches when any
/// pattern does.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternSet {
    /// Compile every pattern, failing on the first malformed one.
    pub fn compile<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut sources = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let _ = builder.add(build_glob(pattern)?);
            sources.push(pattern.to_string());
        }
        let set = builder.build().map_err(|source| PatternError {
            pattern: sources.join(", "),
            source,
        })?;
        Ok(Self {
            patterns: sources,
            set,
        })
    }

    /// Whether any pattern matches `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(normalize_path(path).as_ref())
    }

    /// Patterns in the order given.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern was given; an empty set matches nothing.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn double_star_crosses_directories() {
        assert!(matches("internal/storage/db.go", "**/*.go"));
        assert!(matches("main.go", "**/*.go"));
        assert!(!matches("main.py", "**/*.go"));
    }

    #[test]
    fn single_star_stays_in_one_component() {
        assert!(matches("readme.md", "*.md"));
        assert!(!matches("docs/readme.md", "*.md"));
        assert!(matches("docs/readme.md", "docs/*.md"));
        assert!(!matches("docs/api/readme.md", "docs/*.md"));
    }

    #[test]
    fn trailing_double_star() {
        assert!(matches("infra/modules/vpc/main.tf", "infra/**"));
        assert!(!matches("app/main.tf", "infra/**"));
    }

    #[test]
    fn anchored_not_substring() {
        assert!(!matches("src/main.rs.bak", "**/*.rs"));
        assert!(!matches("xsrc/lib.rs", "src/*.rs"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!matches("README.MD", "*.md"));
        assert!(matches("README.md", "*.md"));
    }

    #[test]
    fn separators_normalized() {
        assert!(matches("internal\\storage\\db.go", "**/*.go"));
        assert!(matches("./docs/readme.md", "docs/*.md"));
        assert!(matches("docs/readme.md", "./docs/*.md"));
    }

    #[test]
    fn backslash_in_pattern_escapes() {
        assert!(!matches("docs/a.md", "docs\\*.md"));
        assert!(matches("docs*.md", "docs\\*.md"));
        assert!(matches("docs\\a.md", "docs/*.md"));
    }

    #[test]
    fn classes_and_alternation() {
        assert!(matches("src/app.tsx", "**/*.{ts,tsx}"));
        assert!(matches("v1.txt", "v[0-9].txt"));
        assert!(!matches("va.txt", "v[0-9].txt"));
    }

    #[test]
    fn malformed_pattern_rejected_at_compile() {
        let err = compile_pattern("src/[abc.rs").unwrap_err();
        assert_eq!(err.pattern, "src/[abc.rs");
        assert!(err.to_string().contains("src/[abc.rs"));
        assert!(!matches("src/a.rs", "src/[abc.rs"));
    }

    #[test]
    fn compiled_pattern_keeps_source() {
        let p = compile_pattern("./**/*.go").unwrap();
        assert_eq!(p.as_str(), "./**/*.go");
        assert!(p.is_match("cmd/main.go"));
    }

    #[test]
    fn pattern_set_any_match() {
        let set = PatternSet::compile(["**/*.tf", "**/*.tfvars"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_match("env/prod.tfvars"));
        assert!(set.is_match("main.tf"));
        assert!(!set.is_match("main.go"));
        assert_eq!(set.patterns(), ["**/*.tf", "**/*.tfvars"]);
    }

    #[test]
    fn pattern_set_reports_bad_pattern() {
        let err = PatternSet::compile(["*.go", "{unclosed"]).unwrap_err();
        assert_eq!(err.pattern, "{unclosed");
    }

    #[test]
    fn empty_pattern_set_matches_nothing() {
        let set = PatternSet::compile(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_match("anything"));
    }

    #[test]
    fn normalize_path_cases() {
        assert_eq!(normalize_path("a/b"), "a/b");
        assert_eq!(normalize_path("./a/b"), "a/b");
        assert_eq!(normalize_path(".//./a"), "a");
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
        assert!(matches!(normalize_path("a/b"), Cow::Borrowed(_)));
    }

    proptest! {
        #[test]
        fn star_never_crosses_separator(
            dir in "[a-z]{1,8}",
            name in "[a-z]{1,8}",
        ) {
            let path = format!("{dir}/{name}.md");
            prop_assert!(!matches(&path, "*.md"));
            prop_assert!(matches(&path, "**/*.md"));
            prop_assert!(matches(&path, "*/*.md"));
        }
    }
}
