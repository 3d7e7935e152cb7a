//! Ant-style glob matching over segmented names.
//!
//! The same dialect serves two separators: `/` for directory paths and `.`
//! for package names. `*` matches within a single segment, `**` matches any
//! number of whole segments including zero, and `?` matches one character.

use thiserror::Error;

/// Invalid glob pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("glob pattern '{pattern}' contains an empty segment")]
    EmptySegment { pattern: String },
}

#[derive(Debug, Clone)]
enum Segment {
    /// `**`: zero or more whole segments.
    Any,
    /// A literal segment, possibly holding `*` / `?` wildcards.
    Literal(String),
}

/// A compiled, reusable glob.
///
/// The empty pattern, `*`, and `**` all compile to a match-everything glob,
/// which also admits the empty name (the default package).
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    separator: char,
    segments: Vec<Segment>,
    match_all: bool,
}

impl Glob {
    /// Compile a pattern for the given segment separator.
    pub fn compile(pattern: &str, separator: char) -> Result<Self, PatternError> {
        let pattern = pattern.trim().to_string();
        if pattern.is_empty() || pattern == "*" || pattern == "**" {
            return Ok(Self {
                pattern,
                separator,
                segments: Vec::new(),
                match_all: true,
            });
        }

        let mut segments = Vec::new();
        for raw in pattern.split(separator) {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment {
                    pattern: pattern.clone(),
                });
            }
            if raw == "**" {
                segments.push(Segment::Any);
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        Ok(Self {
            pattern,
            separator,
            segments,
            match_all: false,
        })
    }

    /// Compile a directory-path glob (`/`-separated).
    pub fn path(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, '/')
    }

    /// Compile a package-name glob (`.`-separated).
    pub fn package(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, '.')
    }

    /// The pattern this glob was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this glob admits every name.
    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    /// Test a name against the glob.
    pub fn matches(&self, name: &str) -> bool {
        if self.match_all {
            return true;
        }
        let parts: Vec<&str> = name.split(self.separator).collect();
        match_segments(&self.segments, &parts)
    }
}

impl std::fmt::Display for Glob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

fn match_segments(pattern: &[Segment], name: &[&str]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((Segment::Any, rest)) => {
            (0..=name.len()).any(|skip| match_segments(rest, &name[skip..]))
        }
        Some((Segment::Literal(literal), rest)) => match name.split_first() {
            Some((head, tail)) => wildcard_match(literal, head) && match_segments(rest, tail),
            None => false,
        },
    }
}

/// Match a single token against a pattern where `*` spans any run of
/// characters (separators included) and `?` matches exactly one.
pub(crate) fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    wildcard_rec(&pattern, &text)
}

fn wildcard_rec(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => {
            wildcard_rec(rest, text) || (!text.is_empty() && wildcard_rec(pattern, &text[1..]))
        }
        Some(('?', rest)) => !text.is_empty() && wildcard_rec(rest, &text[1..]),
        Some((ch, rest)) => text.first() == Some(ch) && wildcard_rec(rest, &text[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_patterns() {
        for pattern in ["", "*", "**", "  **  "] {
            let glob = Glob::path(pattern).unwrap();
            assert!(glob.is_match_all(), "pattern {pattern:?}");
            assert!(glob.matches("src/main/java"));
            assert!(glob.matches(""));
        }
    }

    #[test]
    fn test_path_subtree() {
        let glob = Glob::path("src/generated/**").unwrap();
        assert!(glob.matches("src/generated"));
        assert!(glob.matches("src/generated/java"));
        assert!(glob.matches("src/generated/java/deep/down"));
        assert!(!glob.matches("src/main/java"));
        assert!(!glob.matches("other/src/generated"));
    }

    #[test]
    fn test_star_stays_within_segment() {
        let glob = Glob::path("src/*/java").unwrap();
        assert!(glob.matches("src/main/java"));
        assert!(glob.matches("src/test/java"));
        assert!(!glob.matches("src/a/b/java"));
    }

    #[test]
    fn test_double_star_matches_zero_segments() {
        let glob = Glob::path("src/**/java").unwrap();
        assert!(glob.matches("src/java"));
        assert!(glob.matches("src/main/java"));
        assert!(glob.matches("src/a/b/java"));
        assert!(!glob.matches("src/main"));
    }

    #[test]
    fn test_question_mark() {
        let glob = Glob::path("src/v?").unwrap();
        assert!(glob.matches("src/v1"));
        assert!(glob.matches("src/v2"));
        assert!(!glob.matches("src/v10"));
        assert!(!glob.matches("src/v"));
    }

    #[test]
    fn test_package_direct_children() {
        let glob = Glob::package("com.acme.*").unwrap();
        assert!(glob.matches("com.acme.widgets"));
        assert!(!glob.matches("com.other.thing"));
        assert!(!glob.matches("com.acme.widgets.inner"));
    }

    #[test]
    fn test_package_default_package() {
        let glob = Glob::package("*").unwrap();
        assert!(glob.matches(""));
        assert!(glob.matches("com.acme"));
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(matches!(
            Glob::path("src//java"),
            Err(PatternError::EmptySegment { .. })
        ));
        assert!(matches!(
            Glob::package("com..acme"),
            Err(PatternError::EmptySegment { .. })
        ));
    }

    #[test]
    fn test_wildcard_match_spans() {
        assert!(wildcard_match("*Generator", "com.acme.BeanGenerator"));
        assert!(wildcard_match("com.*", "com.acme.deep.Foo"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("?", ""));
        assert!(!wildcard_match("com.*", "org.acme.Foo"));
    }
}
