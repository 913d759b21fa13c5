// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-value input validation.

use regex::Regex;
use thiserror::Error;

/// Accepts anything.
pub const ALL: &str = ".*";
/// Optionally signed integer, including the empty and sign-only prefixes typed on the way.
pub const INT: &str = "[+-]?[0-9]*";
/// Unsigned integer.
pub const UINT: &str = "[0-9]*";
/// Optionally signed decimal number.
pub const FLOAT: &str = r"[+-]?[0-9]*\.?[0-9]*";

/// A validator pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid input validator '{pattern}'")]
pub struct ValidatorError {
    /// The rejected pattern.
    pub pattern: String,
    /// Why it was rejected.
    #[source]
    pub source: regex::Error,
}

/// Regular expression matched against the entire prospective text of an edit box.
#[derive(Clone, Debug)]
pub struct Validator {
    pattern: String,
    // `None` for the accept-everything default.
    regex: Option<Regex>,
}

impl Validator {
    /// Compile `pattern`. The pattern must match the whole text, not a substring of it.
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|source| ValidatorError {
            pattern: pattern.into(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.into(),
            regex: Some(regex),
        })
    }

    /// The pattern as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` for the accept-everything pattern.
    #[must_use]
    pub fn accepts_all(&self) -> bool {
        self.pattern == ALL
    }

    /// Returns `true` if `text` matches as a whole.
    #[must_use]
    pub fn matches(&self, text: &[char]) -> bool {
        match &self.regex {
            Some(regex) if !self.accepts_all() => regex.is_match(&text.iter().collect::<String>()),
            _ => true,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            pattern: ALL.into(),
            regex: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn presets_match_whole_text() {
        let int = Validator::new(INT).unwrap();
        assert!(int.matches(&chars("-12")));
        assert!(int.matches(&chars("+")), "sign alone is a valid prefix");
        assert!(!int.matches(&chars("1-2")));
        let uint = Validator::new(UINT).unwrap();
        assert!(uint.matches(&chars("")));
        assert!(!uint.matches(&chars("-1")));
        let float = Validator::new(FLOAT).unwrap();
        assert!(float.matches(&chars("-.5")));
        assert!(!float.matches(&chars("1.2.3")));
    }

    #[test]
    fn pattern_is_anchored() {
        let v = Validator::new("[a-c]+").unwrap();
        assert!(v.matches(&chars("abc")));
        assert!(!v.matches(&chars("abcd")), "a matching substring is not enough");
        let alt = Validator::new("a|b").unwrap();
        assert!(!alt.matches(&chars("ab")), "alternation is grouped before anchoring");
    }

    #[test]
    fn bad_pattern_reports_error() {
        let err = Validator::new("(").unwrap_err();
        assert_eq!(err.pattern, "(");
    }

    #[test]
    fn default_accepts_everything() {
        let v = Validator::default();
        assert!(v.accepts_all());
        assert!(v.matches(&chars("line\nbreak")));
    }
}
