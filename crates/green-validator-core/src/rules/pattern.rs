//! Delimited pattern support for the `regex` rule.
//!
//! Patterns arrive in delimited form, `/body/flags`, exactly as written in
//! the rule spec. The body is compiled with the `regex` crate, which runs
//! in linear time, and the compiled program is capped by a size limit.
//! [`PatternCache`] keeps compiled patterns so a spec reused across many
//! subjects compiles once.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors that make a pattern unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Empty pattern")]
    Empty,

    #[error("Delimiter must not be alphanumeric, backslash or whitespace: {0:?}")]
    InvalidDelimiter(char),

    #[error("No ending delimiter {0:?} found")]
    MissingEndDelimiter(char),

    #[error("Unknown modifier {0:?}")]
    UnknownModifier(char),

    #[error("Failed to compile pattern: {0}")]
    Compile(String),
}

/// A pattern split into its body and modifier flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedPattern<'a> {
    pub body: &'a str,
    pub flags: &'a str,
}

impl<'a> DelimitedPattern<'a> {
    /// Split `/body/flags` (or `#body#`, `{body}`, ...) into its parts.
    pub fn split(pattern: &'a str) -> Result<Self, PatternError> {
        let pattern = pattern.trim_start();
        let mut chars = pattern.char_indices();

        let (_, open) = chars.next().ok_or(PatternError::Empty)?;
        if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
            return Err(PatternError::InvalidDelimiter(open));
        }

        let close = match open {
            '(' => ')',
            '[' => ']',
            '{' => '}',
            '<' => '>',
            other => other,
        };

        let body_start = open.len_utf8();
        let mut depth = 0usize;
        let mut escaped = false;

        for (idx, c) in chars {
            if escaped {
                escaped = false;
                continue;
            }

            if c == '\\' {
                escaped = true;
            } else if c == close && depth == 0 {
                return Ok(Self {
                    body: &pattern[body_start..idx],
                    flags: &pattern[idx + close.len_utf8()..],
                });
            } else if c == close {
                depth -= 1;
            } else if c == open && open != close {
                depth += 1;
            }
        }

        Err(PatternError::MissingEndDelimiter(close))
    }
}

/// Compile a delimited pattern.
///
/// Supported modifiers: `i` (case-insensitive), `m` (multi-line), `s` (dot
/// matches newline), `x` (extended), `U` (ungreedy), `A` (anchored at the
/// start), `D` and `u` (accepted, already the engine's behavior).
pub fn compile(pattern: &str, size_limit: usize) -> Result<Regex, PatternError> {
    let parts = DelimitedPattern::split(pattern)?;
    let mut body = parts.body.to_string();
    let mut anchored = false;

    let mut case_insensitive = false;
    let mut multi_line = false;
    let mut dot_all = false;
    let mut extended = false;
    let mut ungreedy = false;

    for flag in parts.flags.chars() {
        match flag {
            'i' => case_insensitive = true,
            'm' => multi_line = true,
            's' => dot_all = true,
            'x' => extended = true,
            'U' => ungreedy = true,
            'A' => anchored = true,
            'D' | 'u' => {}
            c if c.is_whitespace() => {}
            other => return Err(PatternError::UnknownModifier(other)),
        }
    }

    if anchored {
        body = format!(r"\A(?:{})", body);
    }

    RegexBuilder::new(&body)
        .case_insensitive(case_insensitive)
        .multi_line(multi_line)
        .dot_matches_new_line(dot_all)
        .ignore_whitespace(extended)
        .swap_greed(ungreedy)
        .size_limit(size_limit)
        .build()
        .map_err(|e| PatternError::Compile(e.to_string()))
}

/// Compiled patterns held by one [`PatternCache`] before it starts over.
pub const PATTERN_CACHE_CAPACITY: usize = 64;

/// Compiled patterns keyed by pattern text and size limit.
///
/// Failures are kept too, so a broken pattern is not recompiled for every
/// subject. When full, the cache is cleared.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    compiled: HashMap<(String, usize), Result<Regex, PatternError>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern`, or reuse the result of an earlier compile.
    pub fn compile(&mut self, pattern: &str, size_limit: usize) -> Result<&Regex, PatternError> {
        let key = (pattern.to_string(), size_limit);

        if self.compiled.len() >= PATTERN_CACHE_CAPACITY && !self.compiled.contains_key(&key) {
            tracing::trace!(capacity = PATTERN_CACHE_CAPACITY, "Pattern cache full, clearing");
            self.compiled.clear();
        }

        self.compiled
            .entry(key)
            .or_insert_with(|| compile(pattern, size_limit))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1 << 20;

    #[test]
    fn test_split_slash_delimited() {
        let parts = DelimitedPattern::split("/^[A-Z]{3}$/i").unwrap();
        assert_eq!(parts.body, "^[A-Z]{3}$");
        assert_eq!(parts.flags, "i");
    }

    #[test]
    fn test_split_escaped_delimiter() {
        let parts = DelimitedPattern::split(r"/a\/b/").unwrap();
        assert_eq!(parts.body, r"a\/b");
        assert_eq!(parts.flags, "");
    }

    #[test]
    fn test_split_bracket_delimiters() {
        let parts = DelimitedPattern::split("{a{2}b}").unwrap();
        assert_eq!(parts.body, "a{2}b");

        let parts = DelimitedPattern::split("#[0-9]+#").unwrap();
        assert_eq!(parts.body, "[0-9]+");
    }

    #[test]
    fn test_split_errors() {
        assert_eq!(DelimitedPattern::split(""), Err(PatternError::Empty));
        assert_eq!(
            DelimitedPattern::split("abc"),
            Err(PatternError::InvalidDelimiter('a'))
        );
        assert_eq!(
            DelimitedPattern::split("/abc"),
            Err(PatternError::MissingEndDelimiter('/'))
        );
    }

    #[test]
    fn test_compile_and_match() {
        let re = compile("/^[A-Z]{3}[0-9]{3}$/", LIMIT).unwrap();
        assert!(re.is_match("ABC123"));
        assert!(!re.is_match("abc123"));

        let re = compile(r"/^[\w\.-]+@[\w\.-]+\.\w+$/", LIMIT).unwrap();
        assert!(re.is_match("test@example.com"));
    }

    #[test]
    fn test_compile_case_insensitive() {
        let re = compile("/^[A-Z]{3}$/i", LIMIT).unwrap();
        assert!(re.is_match("abc"));
    }

    #[test]
    fn test_compile_anchored_modifier() {
        let re = compile("/[0-9]+/A", LIMIT).unwrap();
        assert!(re.is_match("123abc"));
        assert!(!re.is_match("abc123"));
    }

    #[test]
    fn test_unknown_modifier() {
        assert_eq!(
            compile("/a/q", LIMIT).unwrap_err(),
            PatternError::UnknownModifier('q')
        );
    }

    #[test]
    fn test_unsupported_syntax_fails_to_compile() {
        // Backreferences are not supported by the linear-time engine.
        assert!(matches!(
            compile(r"/(a)\1/", LIMIT),
            Err(PatternError::Compile(_))
        ));
    }

    #[test]
    fn test_size_limit() {
        assert!(matches!(
            compile("/(?:a{1000}){1000}/", 1024),
            Err(PatternError::Compile(_))
        ));
    }

    #[test]
    fn test_cache_reuses_compiled_pattern() {
        let mut cache = PatternCache::new();
        assert!(cache.is_empty());

        assert!(cache.compile("/^[0-9]+$/", LIMIT).unwrap().is_match("123"));
        assert!(!cache.compile("/^[0-9]+$/", LIMIT).unwrap().is_match("abc"));
        assert_eq!(cache.len(), 1);

        // A different size limit is a different program.
        cache.compile("/^[0-9]+$/", LIMIT / 2).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_keeps_failures() {
        let mut cache = PatternCache::new();
        for _ in 0..3 {
            assert_eq!(
                cache.compile("/a/q", LIMIT).unwrap_err(),
                PatternError::UnknownModifier('q')
            );
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clears_when_full() {
        let mut cache = PatternCache::new();
        for n in 0..PATTERN_CACHE_CAPACITY {
            cache.compile(&format!("/^{}$/", n), LIMIT).unwrap();
        }
        assert_eq!(cache.len(), PATTERN_CACHE_CAPACITY);

        // Hits never evict.
        cache.compile("/^0$/", LIMIT).unwrap();
        assert_eq!(cache.len(), PATTERN_CACHE_CAPACITY);

        assert!(cache.compile("/^new$/", LIMIT).unwrap().is_match("new"));
        assert_eq!(cache.len(), 1);
    }
}
