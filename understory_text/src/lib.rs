// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_text --heading-base-level=0

//! Understory Text: the logical half of a single-line text field.
//!
//! - [`SelectionModel`]: owns a character buffer plus a selection anchor and caret. Every
//!   index is a logical character count, independent of masking or pixels.
//! - [`TextMetrics`]: the read-only glyph measurement surface consumed at the input
//!   boundary (pixel to index) and the output boundary (index to pixel).
//! - [`text_width`], [`caret_offset`], and [`index_at_offset`]: measurement helpers over a
//!   `&[char]` run.
//! - [`word_start_before`] and [`word_end_after`]: word navigation used by Ctrl+arrow keys.
//!
//! ## Invariants
//!
//! For every sequence of operations on a [`SelectionModel`],
//! `0 <= sel_start, sel_end <= len` holds and the selection is the half-open range
//! `[min(sel_start, sel_end), max(sel_start, sel_end))`. The caret is `sel_end`.
//!
//! Insertion is gated by a caller-supplied predicate over the prospective buffer. A refused
//! insertion leaves the buffer, the caret, and the selection untouched.
//!
//! ## Example
//!
//! ```rust
//! use understory_text::SelectionModel;
//!
//! let mut model = SelectionModel::from_text("12");
//! let digits = |t: &[char]| t.iter().all(char::is_ascii_digit);
//!
//! assert!(!model.insert("a", digits));
//! assert_eq!(model.to_string(), "12");
//!
//! assert!(model.insert("3", digits));
//! assert_eq!(model.to_string(), "123");
//! assert_eq!(model.caret(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod metrics;
mod selection;
mod word;

pub use metrics::{
    MonospaceMetrics, TextMetrics, TextStyle, caret_offset, index_at_offset, text_width,
};
pub use selection::SelectionModel;
pub use word::{word_end_after, word_start_before};
