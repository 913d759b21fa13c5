// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hierarchy --heading-base-level=0

//! Understory Hierarchy: a labeled tree for tree views and menus.
//!
//! Nodes live in an arena owned by [`Hierarchy`]. Parent and child links are generational
//! [`NodeId`] handles rather than pointers, so there are no reference cycles, cloning is a
//! plain copy of the arena, and stale handles are detected instead of dangling.
//!
//! - Nodes are addressed by label paths (`["File", "Recent", "a.txt"]`).
//! - Sibling labels are unique. Inserting a duplicate label under the same parent fails.
//! - Each node carries a user payload `T` (for example an enabled flag for menu entries).
//! - [`Hierarchy::visible_nodes`] is the depth-first flattening restricted to nodes whose
//!   ancestors are all expanded. It is recomputed inside every mutating call, so it can
//!   never be observed out of date.
//!
//! ## Example
//!
//! ```rust
//! use understory_hierarchy::Hierarchy;
//!
//! let mut tree: Hierarchy = Hierarchy::new();
//! tree.add_path(&["A", "A1"], true);
//! tree.add_path(&["A", "A2", "A2a"], true);
//! tree.add_path(&["B", "B1"], true);
//! tree.collapse(&["B"]);
//!
//! let labels: Vec<&str> = tree
//!     .visible_nodes()
//!     .iter()
//!     .map(|&id| tree.label(id).unwrap())
//!     .collect();
//! assert_eq!(labels, ["A", "A1", "A2", "A2a", "B"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Hierarchy;
pub use types::{Item, NodeId};
