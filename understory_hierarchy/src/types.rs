// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy: node identifiers and owned snapshots.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in a [`Hierarchy`](crate::Hierarchy) (generational).
///
/// A slot can be reused after its node is removed; the generation distinguishes the new
/// occupant from handles to the old one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Owned copy of a subtree, used for inspection and persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    /// Node label.
    pub label: String,
    /// Whether the node is expanded.
    pub expanded: bool,
    /// Children in order.
    pub children: Vec<Self>,
}
