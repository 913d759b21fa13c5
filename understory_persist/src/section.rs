// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections and typed property access.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::LoadError;
use crate::value::{Value, parse_bool, parse_char, parse_f64, parse_u32, quote, unquote};

/// A named block of properties and nested sections.
///
/// The root of a parsed document is a section with an empty name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    properties: BTreeMap<String, Value>,
    children: Vec<Self>,
}

impl Section {
    /// Create an empty section.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Raw value of `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns `true` if `key` is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    /// Remove `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Child sections in order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable child sections.
    pub fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Append a child section.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// First child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Children named `name`, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    // --- typed getters ---

    /// Unquoted string value of `key`.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<String> {
        self.property(key).map(|v| unquote(v.as_raw()))
    }

    /// Boolean value of `key`.
    pub fn bool(&self, key: &str) -> Result<Option<bool>, LoadError> {
        self.typed(key, parse_bool)
    }

    /// Unsigned integer value of `key`.
    pub fn u32(&self, key: &str) -> Result<Option<u32>, LoadError> {
        self.typed(key, parse_u32)
    }

    /// Floating point value of `key`.
    pub fn f64(&self, key: &str) -> Result<Option<f64>, LoadError> {
        self.typed(key, parse_f64)
    }

    /// Single character value of `key`.
    pub fn char(&self, key: &str) -> Result<Option<char>, LoadError> {
        self.typed(key, parse_char)
    }

    /// Unquoted list items of `key`. Fails if the value is not a list.
    pub fn list(&self, key: &str) -> Result<Option<Vec<String>>, LoadError> {
        let Some(value) = self.property(key) else {
            return Ok(None);
        };
        let items = value
            .as_list()
            .ok_or_else(|| LoadError::ExpectedList(key.to_string()))?;
        Ok(Some(items.iter().map(|i| unquote(i)).collect()))
    }

    /// Unquoted string value of `key`, failing if absent.
    pub fn required_string(&self, key: &str) -> Result<String, LoadError> {
        self.string(key)
            .ok_or_else(|| LoadError::MissingProperty(key.to_string()))
    }

    fn typed<T>(&self, key: &str, conv: impl Fn(&str) -> Option<T>) -> Result<Option<T>, LoadError> {
        let Some(value) = self.property(key) else {
            return Ok(None);
        };
        let raw = value.as_raw();
        conv(&unquote(raw))
            .map(Some)
            .ok_or_else(|| LoadError::invalid(key, raw))
    }

    // --- typed setters ---

    /// Store `value` as a quoted string.
    pub fn set_string(&mut self, key: impl Into<String>, value: &str) {
        self.set(key, Value::raw(quote(value)));
    }

    /// Store `true` or `false`.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, Value::raw(if value { "true" } else { "false" }));
    }

    /// Store an unsigned integer.
    pub fn set_u32(&mut self, key: impl Into<String>, value: u32) {
        self.set(key, Value::raw(format!("{value}")));
    }

    /// Store a float.
    pub fn set_f64(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, Value::raw(format!("{value}")));
    }

    /// Store a list of quoted strings.
    pub fn set_list<I, S>(&mut self, key: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set(key, Value::list(items.into_iter().map(|s| quote(s.as_ref()))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn typed_getters_convert_and_report() {
        let mut s = Section::new("X");
        s.set_bool("Flag", true);
        s.set_u32("Size", 13);
        s.set_f64("Ratio", 0.5);
        s.set("Bad", Value::raw("maybe"));
        assert_eq!(s.bool("Flag"), Ok(Some(true)));
        assert_eq!(s.u32("Size"), Ok(Some(13)));
        assert_eq!(s.f64("Ratio"), Ok(Some(0.5)));
        assert_eq!(s.bool("Missing"), Ok(None));
        assert_eq!(s.bool("Bad"), Err(LoadError::invalid("Bad", "maybe")));
    }

    #[test]
    fn list_requires_brackets() {
        let mut s = Section::new("X");
        s.set_list("Items", ["a", "b, c"]);
        s.set_string("Text", "a");
        assert_eq!(
            s.list("Items"),
            Ok(Some(vec!["a".to_string(), "b, c".to_string()]))
        );
        assert_eq!(s.list("Text"), Err(LoadError::ExpectedList("Text".into())));
        assert_eq!(s.list("None"), Ok(None));
    }

    #[test]
    fn strings_are_unquoted_on_read() {
        let mut s = Section::new("X");
        s.set_string("Text", "say \"hi\"");
        assert_eq!(s.property("Text").unwrap().as_raw(), "\"say \\\"hi\\\"\"");
        assert_eq!(s.string("Text").as_deref(), Some("say \"hi\""));
        assert_eq!(
            s.required_string("Other"),
            Err(LoadError::MissingProperty("Other".into()))
        );
    }

    #[test]
    fn children_lookup_by_name() {
        let mut s = Section::new("");
        s.push_child(Section::new("Item"));
        s.push_child(Section::new("Other"));
        s.push_child(Section::new("Item"));
        assert_eq!(s.children_named("Item").count(), 2);
        assert!(s.child("Other").is_some());
        assert!(s.child("Nope").is_none());
    }
}
