// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values and scalar conversions.

use alloc::string::String;
use alloc::vec::Vec;

/// A property value: its raw text, plus its items when the text is a `[...]` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    raw: String,
    list: Option<Vec<String>>,
}

impl Value {
    /// A scalar value stored verbatim.
    #[must_use]
    pub fn raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let list = split_list(&raw);
        Self { raw, list }
    }

    /// A list of already-encoded items.
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let mut raw = String::from("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                raw.push_str(", ");
            }
            raw.push_str(item);
        }
        raw.push(']');
        Self {
            raw,
            list: Some(items),
        }
    }

    /// The value text as written.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        &self.raw
    }

    /// Encoded list items, if the value is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        self.list.as_deref()
    }

    /// Returns `true` if the value is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.list.is_some()
    }
}

// Split `[a, "b, c"]` on commas outside quotes; items are trimmed and keep their quotes.
fn split_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut backslash = false;
    for ch in inner.chars() {
        if in_quotes {
            current.push(ch);
            if ch == '"' && !backslash {
                in_quotes = false;
            }
            backslash = ch == '\\' && !backslash;
            continue;
        }
        match ch {
            ',' => items.push(core::mem::take(&mut current).trim().into()),
            '"' => {
                in_quotes = true;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    items.push(current.trim().into());
    Some(items)
}

/// Wrap `s` in double quotes, escaping backslashes, quotes, newlines, and tabs.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Inverse of [`quote`]. Text that is not quoted is returned unchanged.
#[must_use]
pub fn unquote(s: &str) -> String {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return s.into();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// `true`/`false` in any case, or `1`/`0`.
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

/// Unsigned integer, surrounding whitespace ignored.
#[must_use]
pub fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

/// Finite float, surrounding whitespace ignored.
#[must_use]
pub fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse().ok().filter(|v: &f64| v.is_finite())
}

/// Exactly one character. The empty string is `'\0'`, the serialized form of "no character".
#[must_use]
pub fn parse_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some('\0'),
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_round_trips_escapes() {
        let s = "say \"hi\"\\\n\tok";
        assert_eq!(unquote(&quote(s)), s);
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn unquote_leaves_bare_text() {
        assert_eq!(unquote("Int"), "Int");
        assert_eq!(unquote("\""), "\"", "a lone quote is not a quoted string");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn list_split_respects_quotes() {
        let v = Value::raw("[a, \"b, c\" ,d]");
        assert_eq!(
            v.as_list().unwrap(),
            ["a", "\"b, c\"", "d"],
            "commas inside quotes do not split"
        );
        assert_eq!(Value::raw("[]").as_list().unwrap().len(), 0);
        assert!(!Value::raw("plain").is_list());
    }

    #[test]
    fn list_constructor_builds_raw_text() {
        let v = Value::list(["\"x\"", "\"y\""]);
        assert_eq!(v.as_raw(), "[\"x\", \"y\"]");
        assert_eq!(v, Value::raw("[\"x\", \"y\"]"));
    }

    #[test]
    fn bool_parsing() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn scalar_parsing() {
        assert_eq!(parse_u32(" 12 "), Some(12));
        assert_eq!(parse_u32("-1"), None);
        assert_eq!(parse_f64("1.5"), Some(1.5));
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_char("*"), Some('*'));
        assert_eq!(parse_char(""), Some('\0'));
        assert_eq!(parse_char("ab"), None);
    }
}
