// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text emission.

use alloc::string::String;
use alloc::vec::Vec;

use crate::section::Section;

const INDENT: &str = "    ";

/// Write `root` as text.
///
/// Root properties come first as `key = value;` lines, followed by each child section.
/// Sections are separated by blank lines and nested content is indented by four spaces.
#[must_use]
pub fn emit(root: &Section) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (key, value) in root.properties() {
        lines.push(property_line(key, value.as_raw()));
    }
    if root.properties().next().is_some() && !root.children().is_empty() {
        lines.push(String::new());
    }
    push_children(&mut lines, root.children());

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn property_line(key: &str, value: &str) -> String {
    let mut line = String::with_capacity(key.len() + value.len() + 4);
    line.push_str(key);
    line.push_str(" = ");
    line.push_str(value);
    line.push(';');
    line
}

fn push_children(lines: &mut Vec<String>, children: &[Section]) {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        section_lines(lines, child);
    }
}

fn section_lines(lines: &mut Vec<String>, section: &Section) {
    if section.name().is_empty() {
        lines.push("{".into());
    } else {
        let mut header = String::from(section.name());
        header.push_str(" {");
        lines.push(header);
    }

    let mut body = Vec::new();
    for (key, value) in section.properties() {
        body.push(property_line(key, value.as_raw()));
    }
    if section.properties().next().is_some() && !section.children().is_empty() {
        body.push(String::new());
    }
    push_children(&mut body, section.children());

    for line in body {
        if line.is_empty() {
            lines.push(line);
        } else {
            let mut indented = String::from(INDENT);
            indented.push_str(&line);
            lines.push(indented);
        }
    }
    lines.push("}".into());
}
