// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll --heading-base-level=0

//! Understory Scroll: renderer-agnostic scroll state for widgets.
//!
//! Three small models cover the ways widgets map content coordinates to a bounded viewport:
//!
//! - [`CropWindow`]: a 1D crop offset for single-line content such as an edit box. It
//!   supports two policies: [`OverflowPolicy::Scroll`] keeps the caret in view by moving the
//!   crop, [`OverflowPolicy::LimitToViewport`] pins the crop at zero and leaves it to the
//!   owner to reject content that does not fit.
//! - [`Scrollbar`]: an integer scrollbar model (`maximum`, `value`, `viewport_size`) with
//!   wheel handling, thumb geometry, dragging, and page jumps on the track.
//! - [`RowStrip`]: a strip of fixed-height rows with hit testing and scroll-to-reveal.
//!
//! ## Invariants
//!
//! - `0 <= crop offset <= max(0, content - viewport)` after [`CropWindow::clamp_to_content`].
//! - `value <= maximum - viewport_size` when `maximum >= viewport_size`, else `value == 0`,
//!   after every [`Scrollbar`] mutation.
//!
//! ## Example
//!
//! ```rust
//! use understory_scroll::{CropWindow, RowStrip, Scrollbar, Orientation};
//!
//! // Keep a caret at x = 250 visible inside a 100px wide field.
//! let mut crop = CropWindow::new(100.0);
//! crop.ensure_visible(250.0);
//! assert_eq!(crop.offset(), 150.0);
//!
//! // A vertical scrollbar over 10 rows of 20px in a 60px viewport.
//! let rows = RowStrip::new(20.0, 10);
//! let mut bar = Scrollbar::new(Orientation::Vertical);
//! bar.set_viewport_size(60);
//! bar.set_maximum(200);
//! bar.set_value(1000);
//! assert_eq!(bar.value(), 140);
//! assert_eq!(rows.row_at(5.0, f64::from(bar.value())), Some(7));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod crop;
mod rows;
mod scrollbar;

pub use crop::{CropWindow, OverflowPolicy};
pub use rows::{RowStrip, ScrollAlign};
pub use scrollbar::{Orientation, Scrollbar};
