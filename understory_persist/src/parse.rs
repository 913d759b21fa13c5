// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive-descent parser for the section format.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{ParseError, ParseErrorKind};
use crate::section::Section;
use crate::value::Value;

/// Parse a document into a root section with an empty name.
pub fn parse(input: &str) -> Result<Section, ParseError> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
        line: 1,
    };
    let mut root = Section::new("");
    parser.parse_items(&mut root, &[], false)?;
    Ok(root)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.line,
            kind,
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(found) => self.error(ParseErrorKind::Unexpected { expected, found }),
            None => self.error(ParseErrorKind::UnexpectedEof(expected)),
        }
    }

    // Returns true if a comment started at the cursor and was consumed.
    fn skip_comment(&mut self) -> Result<bool, ParseError> {
        match (self.peek(), self.peek_at(1)) {
            (Some('/'), Some('/')) => {
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
                Ok(true)
            }
            (Some('/'), Some('*')) => {
                self.pos += 2;
                loop {
                    match self.bump() {
                        Some('*') if self.peek() == Some('/') => {
                            self.pos += 1;
                            return Ok(true);
                        }
                        Some(_) => {}
                        None => return Err(self.error(ParseErrorKind::UnexpectedEof("comment"))),
                    }
                }
            }
            _ => Ok(false),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    if !self.skip_comment()? {
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // Consume a quoted string including both quotes, appending it verbatim.
    fn read_quoted(&mut self, out: &mut String) -> Result<(), ParseError> {
        let Some(open) = self.bump() else {
            return Err(self.error(ParseErrorKind::UnexpectedEof("string")));
        };
        out.push(open);
        let mut backslash = false;
        while let Some(ch) = self.bump() {
            out.push(ch);
            if ch == '"' && !backslash {
                return Ok(());
            }
            backslash = ch == '\\' && !backslash;
        }
        Err(self.error(ParseErrorKind::UnexpectedEof("string")))
    }

    fn read_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '"' => self.read_quoted(&mut name)?,
                '/' if matches!(self.peek_at(1), Some('/' | '*')) => break,
                c if c.is_whitespace() || matches!(c, '=' | ';' | ':' | '{' | '}') => break,
                c => {
                    name.push(c);
                    self.bump();
                }
            }
        }
        Ok(name)
    }

    // Raw value text up to `;` or `}`. Whitespace runs collapse to one space.
    fn read_value(&mut self, key: &str) -> Result<String, ParseError> {
        let mut value = String::new();
        let mut pending_space = false;
        loop {
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEof("value"))),
                Some(';' | '}') => break,
                Some('=' | '{') => return Err(self.unexpected("value")),
                Some('/') if self.skip_comment()? => pending_space = !value.is_empty(),
                Some(c) if c.is_whitespace() => {
                    self.bump();
                    pending_space = !value.is_empty();
                }
                Some(c) => {
                    if pending_space {
                        value.push(' ');
                        pending_space = false;
                    }
                    if c == '"' {
                        self.read_quoted(&mut value)?;
                    } else {
                        value.push(c);
                        self.bump();
                    }
                }
            }
        }
        if self.peek() == Some(';') {
            self.bump();
        }
        if value.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyValue(key.into())));
        }
        Ok(value)
    }

    fn skip_optional_semicolon(&mut self) -> Result<(), ParseError> {
        self.skip_trivia()?;
        if self.peek() == Some(';') {
            self.bump();
        }
        Ok(())
    }

    fn parse_items(
        &mut self,
        section: &mut Section,
        ancestors: &[&Section],
        nested: bool,
    ) -> Result<(), ParseError> {
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None if nested => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof("section")));
                }
                None => return Ok(()),
                Some('}') if nested => {
                    self.bump();
                    return self.skip_optional_semicolon();
                }
                _ => {}
            }

            let name = self.read_name()?;
            self.skip_trivia()?;
            match self.peek() {
                Some('=') if !name.is_empty() => {
                    self.bump();
                    self.skip_trivia()?;
                    if self.peek() == Some('{') {
                        self.parse_child(section, ancestors, name, None)?;
                    } else {
                        let value = self.read_value(&name)?;
                        section.set(name, Value::raw(value));
                    }
                }
                Some('{') => self.parse_child(section, ancestors, name, None)?,
                Some(':') => {
                    self.bump();
                    self.skip_trivia()?;
                    let base_name = self.read_name()?;
                    if base_name.is_empty() {
                        return Err(self.unexpected("base section name"));
                    }
                    let base = find_base(section, ancestors, &base_name)
                        .ok_or_else(|| self.error(ParseErrorKind::UnknownBase(base_name)))?;
                    self.skip_trivia()?;
                    if self.peek() != Some('{') {
                        return Err(self.unexpected("'{'"));
                    }
                    self.parse_child(section, ancestors, name, Some(base))?;
                }
                _ if name.is_empty() => return Err(self.unexpected("property or section name")),
                _ => return Err(self.unexpected("'{', '=' or ':'")),
            }
        }
    }

    // Cursor is on `{`.
    fn parse_child(
        &mut self,
        parent: &mut Section,
        ancestors: &[&Section],
        name: String,
        base: Option<Section>,
    ) -> Result<(), ParseError> {
        self.bump();
        let mut child = Section::new(name);
        {
            let mut chain: Vec<&Section> = ancestors.to_vec();
            chain.push(parent);
            self.parse_items(&mut child, &chain, true)?;
        }
        if let Some(base) = base {
            for (key, value) in base.properties() {
                if !child.contains(key) {
                    child.set(key, value.clone());
                }
            }
            for base_child in base.children() {
                if child.child(base_child.name()).is_none() {
                    child.push_child(base_child.clone());
                }
            }
        }
        parent.push_child(child);
        Ok(())
    }
}

// Nearest earlier section named `name`: siblings first, then each ancestor's children.
fn find_base(section: &Section, ancestors: &[&Section], name: &str) -> Option<Section> {
    core::iter::once(section)
        .chain(ancestors.iter().rev().copied())
        .find_map(|s| s.child(name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_sections_and_root_properties() {
        let text = "Version = 1;\nTreeView {\n    TextSize = 13;\n    Item {\n        Text = \"Root\";\n    }\n}\n";
        let root = parse(text).unwrap();
        assert_eq!(root.u32("Version"), Ok(Some(1)));
        let tv = root.child("TreeView").unwrap();
        assert_eq!(tv.u32("TextSize"), Ok(Some(13)));
        assert_eq!(
            tv.child("Item").unwrap().string("Text").as_deref(),
            Some("Root")
        );
    }

    #[test]
    fn comments_and_whitespace_are_ignored() {
        let text = "// header\nA { /* inline */ Key = some   spaced // trailing\n value; }";
        let root = parse(text).unwrap();
        assert_eq!(
            root.child("A").unwrap().property("Key").unwrap().as_raw(),
            "some spaced value"
        );
    }

    #[test]
    fn quoted_values_keep_special_characters() {
        let root = parse("A { Text = \"a;b}c // not a comment\"; }").unwrap();
        assert_eq!(
            root.child("A").unwrap().string("Text").as_deref(),
            Some("a;b}c // not a comment")
        );
    }

    #[test]
    fn inheritance_copies_missing_properties_and_children() {
        let text = "Base { A = 1; B = 2; Inner { X = 1; } }\nDerived : Base { B = 3; }";
        let root = parse(text).unwrap();
        let derived = root.child("Derived").unwrap();
        assert_eq!(derived.u32("A"), Ok(Some(1)));
        assert_eq!(derived.u32("B"), Ok(Some(3)), "own value wins");
        assert!(derived.child("Inner").is_some());
    }

    #[test]
    fn inheritance_finds_base_in_ancestors() {
        let text = "Base { A = 1; }\nOuter { Derived : Base { } }";
        let root = parse(text).unwrap();
        let derived = root.child("Outer").unwrap().child("Derived").unwrap();
        assert_eq!(derived.u32("A"), Ok(Some(1)));
    }

    #[test]
    fn errors_report_line_numbers() {
        let err = parse("A {\n  B = 1;\n  C = ;\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, ParseErrorKind::EmptyValue("C".into()));

        let err = parse("A {\n B = 1;\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof("section"));

        let err = parse("A : Missing { }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownBase("Missing".into()));

        let err = parse("A B").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Unexpected { found: 'B', .. }));
    }

    #[test]
    fn key_with_section_value() {
        let root = parse("Renderer = { Color = red; };").unwrap();
        assert_eq!(
            root.child("Renderer").unwrap().property("Color").unwrap().as_raw(),
            "red"
        );
    }

    #[test]
    fn trailing_semicolon_after_section_is_allowed() {
        let root = parse("A { }; B { }").unwrap();
        assert_eq!(root.children().len(), 2);
    }
}
