// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_persist --heading-base-level=0

//! Understory Persist: a small, human-editable property format.
//!
//! Widgets and themes save themselves as a tree of [`Section`]s. Each section has a name,
//! a sorted map of properties, and an ordered list of child sections:
//!
//! ```text
//! // Line and block comments are allowed anywhere whitespace is.
//! TreeView {
//!     TextSize = 13;
//!     Item {
//!         Text = "Root";
//!         Items = ["Child1", "Child2"];
//!     }
//! }
//!
//! Dark : TreeView {
//!     TextSize = 15;  /* overrides the base, keeps its Item child */
//! }
//! ```
//!
//! - Values are raw text up to `;`. Quoted strings keep their escapes (`\"`, `\\`, `\n`,
//!   `\t`) until read with [`Section::string`] or [`unquote`].
//! - `[a, "b, c"]` is a list value; commas inside quotes do not split.
//! - `Name : Base { ... }` copies the properties and children of an earlier section named
//!   `Base` that the new section does not define itself. `Base` is looked up among the
//!   preceding siblings, then among the siblings of each ancestor.
//! - Parse errors carry the 1-based line at which parsing stopped.
//!
//! [`emit`] writes properties in sorted key order and children in insertion order, so
//! `parse(&emit(&s))` reproduces `s`.
//!
//! ## Example
//!
//! ```rust
//! use understory_persist::{Section, emit, parse};
//!
//! let mut item = Section::new("Item");
//! item.set_string("Text", "Root");
//! item.set_list("Items", ["Child1", "Child2"]);
//! let mut root = Section::new("");
//! root.push_child(item);
//!
//! let text = emit(&root);
//! let back = parse(&text).unwrap();
//! assert_eq!(back, root);
//! assert_eq!(
//!     back.children()[0].list("Items").unwrap(),
//!     Some(vec!["Child1".to_string(), "Child2".to_string()])
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod emit;
mod error;
mod parse;
mod section;
mod value;

pub use emit::emit;
pub use error::{LoadError, ParseError, ParseErrorKind};
pub use parse::parse;
pub use section::Section;
pub use value::{Value, parse_bool, parse_char, parse_f64, parse_u32, quote, unquote};
