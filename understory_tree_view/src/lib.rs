// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_view --heading-base-level=0

//! Understory Tree View: an expandable list of labeled rows.
//!
//! [`TreeView`] shows a [`Hierarchy`](understory_hierarchy::Hierarchy) one row per visible
//! node, indented by depth, with a disclosure icon on every branch. Rows scroll vertically
//! and horizontally, and selection follows the node rather than the row, so expanding or
//! collapsing above it never moves the highlight to another item.
//!
//! Interaction:
//!
//! - a press selects a row, and a release on the icon of the selected row toggles it;
//! - a second click on the same row inside the double-click window toggles a branch or
//!   reports a leaf through [`TreeView::on_double_click`];
//! - the arrow keys walk rows, fold branches, and climb to parents;
//! - wheel events that find the view already at its end bubble to the parent once the
//!   edge tolerance has passed.
//!
//! ## Example
//!
//! ```rust
//! use understory_tree_view::TreeView;
//! use understory_widget::Theme;
//!
//! let mut tree = TreeView::new(&Theme::default());
//! tree.add_item(&["Assets", "Textures", "grass.png"], true);
//! tree.add_item(&["Assets", "Sounds"], true);
//! tree.collapse(&["Assets", "Textures"]);
//!
//! assert_eq!(tree.visible_paths().len(), 3);
//! assert!(tree.select_item(&["Assets", "Textures", "grass.png"]));
//! assert_eq!(tree.visible_paths().len(), 4);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod input;
mod persist;
mod tree_view;

pub use tree_view::TreeView;
