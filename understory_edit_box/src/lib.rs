// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_edit_box --heading-base-level=0

//! Understory Edit Box: a single-line text field.
//!
//! [`EditBox`] keeps a character buffer with a caret and a selection, and crops the text
//! horizontally so the caret stays in view. Every edit, whether typed, pasted or set from
//! code, passes through one acceptance gate:
//!
//! - the [`Validator`] must match the whole resulting text,
//! - the length must stay within [`EditBox::maximum_characters`] (0 for unlimited),
//! - in width-limited mode the text must fit the box.
//!
//! Refused edits leave the box untouched and fire no notification.
//!
//! The box is a [`Widget`](understory_widget::Widget): place it in a
//! [`Container`](understory_widget::Container) to receive pointer, key and text input.
//!
//! ## Example
//!
//! ```rust
//! use understory_edit_box::{EditBox, UINT};
//! use understory_widget::Theme;
//!
//! let mut amount = EditBox::new(&Theme::default());
//! amount.set_input_validator(UINT).unwrap();
//! amount.set_maximum_characters(3);
//!
//! for ch in "12a34".chars() {
//!     amount.insert_char(ch);
//! }
//! assert_eq!(amount.text(), "123");
//! ```

mod edit_box;
mod input;
mod persist;
mod validator;

pub use edit_box::{Alignment, EditBox, TextRun, TextRuns};
pub use validator::{ALL, FLOAT, INT, UINT, Validator, ValidatorError};
