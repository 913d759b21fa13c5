// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core hierarchy implementation: structure, path addressing, expansion, flattening.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::types::{Item, NodeId};

/// An arena-backed tree of labeled nodes.
///
/// `T` is a per-node payload created with [`Default`] when path-based insertion creates
/// intermediate nodes.
#[derive(Clone)]
pub struct Hierarchy<T = ()> {
    /// slots
    nodes: Vec<Option<Node<T>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    visible: Vec<NodeId>,
}

impl<T> core::fmt::Debug for Hierarchy<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Hierarchy")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("roots", &self.roots.len())
            .field("visible", &self.visible.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for Hierarchy<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            visible: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    label: String,
    expanded: bool,
    depth: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T,
}

impl<T> Hierarchy<T> {
    /// Create an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns `true` if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Insert a node labeled `label` under `parent` (or as a root if `None`).
    ///
    /// New nodes start expanded. Returns `None` if `parent` is stale or a sibling already
    /// uses `label`.
    pub fn insert(&mut self, parent: Option<NodeId>, label: &str, data: T) -> Option<NodeId> {
        if self.child_by_label(parent, label).is_some() {
            return None;
        }
        self.append(parent, label, data)
    }

    /// Insert like [`Hierarchy::insert`] but allow a label that a sibling already uses.
    ///
    /// Path lookups resolve to the first sibling with a label, so repeated labels are only
    /// suitable for entries that are never addressed by path, such as menu separators.
    /// Returns `None` if `parent` is stale.
    pub fn append(&mut self, parent: Option<NodeId>, label: &str, data: T) -> Option<NodeId> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return None;
        }
        let depth = parent.map_or(0, |p| self.node(p).depth + 1);
        let node = |generation| Node {
            generation,
            label: label.to_string(),
            expanded: true,
            depth,
            parent,
            children: Vec::new(),
            data,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) => self.node_mut(p).children.push(id),
            None => self.roots.push(id),
        }
        self.rebuild_visible();
        Some(id)
    }

    /// Node at `path`, matching one label per level starting from the roots.
    #[must_use]
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut current = None;
        for segment in path {
            current = Some(self.child_by_label(current, segment.as_ref())?);
        }
        current
    }

    /// Labels from the root down to `id`, or empty for a stale id.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut cur = Some(id).filter(|&id| self.is_alive(id));
        while let Some(n) = cur {
            let node = self.node(n);
            path.push(node.label.clone());
            cur = node.parent;
        }
        path.reverse();
        path
    }

    /// Label of `id`.
    #[must_use]
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.label.as_str())
    }

    /// Rename `id`. Fails if a sibling already uses `label` or `id` is stale.
    pub fn rename(&mut self, id: NodeId, label: &str) -> bool {
        let Some(node) = self.node_opt(id) else {
            return false;
        };
        if node.label == label {
            return true;
        }
        if self.child_by_label(node.parent, label).is_some() {
            return false;
        }
        self.node_mut(id).label = label.to_string();
        true
    }

    /// Payload of `id`.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// Mutable payload of `id`.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_opt_mut(id).map(|n| &mut n.data)
    }

    /// Depth of `id` (roots are 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node_opt(id).map(|n| n.depth)
    }

    /// Whether `id` is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.expanded)
    }

    /// Returns `true` if `id` is live and has no children.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.children.is_empty())
    }

    /// Root nodes in order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    #[must_use]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Children of `parent`, or the roots for `None`.
    #[must_use]
    pub fn siblings_under(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(p) => self.children_of(p),
            None => &self.roots,
        }
    }

    /// Set the expanded flag of a single node. Returns `true` if it changed.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        if let Some(n) = self.node_opt_mut(id)
            && n.expanded != expanded
        {
            n.expanded = expanded;
            self.rebuild_visible();
            return true;
        }
        false
    }

    /// Expand the node at `path` together with every ancestor on the path.
    ///
    /// Returns `false` if the path does not exist.
    pub fn expand<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some(id) = self.find(path) else {
            return false;
        };
        self.expand_with_ancestors(id);
        true
    }

    /// Expand `id` and all its ancestors.
    pub fn expand_with_ancestors(&mut self, id: NodeId) {
        let mut cur = Some(id).filter(|&id| self.is_alive(id));
        while let Some(n) = cur {
            let node = self.node_mut(n);
            node.expanded = true;
            cur = node.parent;
        }
        self.rebuild_visible();
    }

    /// Collapse only the node at `path`. Returns `false` if the path does not exist.
    pub fn collapse<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some(id) = self.find(path) else {
            return false;
        };
        self.set_expanded(id, false);
        true
    }

    /// Expand every node.
    pub fn expand_all(&mut self) {
        self.set_all_expanded(true);
    }

    /// Collapse every node.
    pub fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&mut self, expanded: bool) {
        for n in self.nodes.iter_mut().flatten() {
            n.expanded = expanded;
        }
        self.rebuild_visible();
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }
        self.free_subtree(id);
        self.rebuild_visible();
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Remove the node at `path`.
    ///
    /// With `prune_empty_parents`, ancestors left without children are removed as well,
    /// stopping at the first ancestor that still has children. Returns `false` if the path
    /// does not exist.
    pub fn remove_path<S: AsRef<str>>(&mut self, path: &[S], prune_empty_parents: bool) -> bool {
        let Some(id) = self.find(path) else {
            return false;
        };
        let mut parent = self.parent_of(id);
        self.remove(id);
        if prune_empty_parents {
            while let Some(p) = parent
                && self.children_of(p).is_empty()
            {
                parent = self.parent_of(p);
                self.remove(p);
            }
        }
        true
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.roots.clear();
        self.visible.clear();
    }

    /// Nodes whose ancestors are all expanded, in depth-first order.
    #[must_use]
    pub fn visible_nodes(&self) -> &[NodeId] {
        &self.visible
    }

    /// Position of `id` in [`Hierarchy::visible_nodes`].
    #[must_use]
    pub fn visible_index_of(&self, id: NodeId) -> Option<usize> {
        self.visible.iter().position(|&v| v == id)
    }

    /// Owned copy of the whole forest.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Item> {
        self.roots.iter().map(|&r| self.snapshot_node(r)).collect()
    }

    fn snapshot_node(&self, id: NodeId) -> Item {
        let node = self.node(id);
        Item {
            label: node.label.clone(),
            expanded: node.expanded,
            children: node
                .children
                .iter()
                .map(|&c| self.snapshot_node(c))
                .collect(),
        }
    }

    /// Previous sibling of `id`, considering roots as siblings of each other.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings_under(self.node_opt(id)?.parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    // --- internals ---

    fn child_by_label(&self, parent: Option<NodeId>, label: &str) -> Option<NodeId> {
        self.siblings_under(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).label == label)
    }

    fn rebuild_visible(&mut self) {
        let mut visible = core::mem::take(&mut self.visible);
        visible.clear();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            visible.push(id);
            let node = self.node(id);
            if node.expanded {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        self.visible = visible;
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

impl<T: Default> Hierarchy<T> {
    /// Add a node at `path`.
    ///
    /// Every segment but the last must already exist unless `create_parents` is set, in
    /// which case missing intermediate nodes are created (existing ones are reused). Fails
    /// without mutating anything if the path is empty, a parent is missing and may not be
    /// created, or the final label already exists under its parent.
    pub fn add_path<S: AsRef<str>>(&mut self, path: &[S], create_parents: bool) -> Option<NodeId> {
        let (last, parents) = path.split_last()?;
        let mut parent = None;
        let mut depth_found = 0;
        for segment in parents {
            match self.child_by_label(parent, segment.as_ref()) {
                Some(id) => {
                    parent = Some(id);
                    depth_found += 1;
                }
                None => break,
            }
        }
        if depth_found < parents.len() && !create_parents {
            return None;
        }
        if depth_found == parents.len() && self.child_by_label(parent, last.as_ref()).is_some() {
            return None;
        }
        for segment in &parents[depth_found..] {
            parent = Some(self.insert(parent, segment.as_ref(), T::default())?);
        }
        self.insert(parent, last.as_ref(), T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn labels(tree: &Hierarchy) -> Vec<&str> {
        tree.visible_nodes()
            .iter()
            .map(|&id| tree.label(id).unwrap())
            .collect()
    }

    #[test]
    fn visible_list_skips_collapsed_subtrees() {
        let mut tree: Hierarchy = Hierarchy::new();
        tree.add_path(&["A", "A1"], true).unwrap();
        tree.add_path(&["A", "A2", "A2a"], true).unwrap();
        tree.add_path(&["B", "B1"], true).unwrap();
        assert!(tree.collapse(&["B"]));
        assert_eq!(labels(&tree), ["A", "A1", "A2", "A2a", "B"]);
    }

    #[test]
    fn add_path_without_create_fails_cleanly() {
        let mut tree: Hierarchy = Hierarchy::new();
        assert!(tree.add_path(&["A", "B"], false).is_none());
        assert!(tree.is_empty(), "no partial insertion");
        assert!(tree.add_path::<&str>(&[], true).is_none(), "empty path");
    }

    #[test]
    fn duplicate_sibling_labels_are_rejected() {
        let mut tree: Hierarchy = Hierarchy::new();
        let a = tree.add_path(&["A"], false).unwrap();
        assert!(tree.add_path(&["A"], false).is_none());
        assert!(tree.insert(None, "A", ()).is_none());
        let b = tree.insert(None, "B", ()).unwrap();
        assert!(!tree.rename(b, "A"), "rename onto a sibling label");
        assert!(tree.rename(a, "C"));
        // Same label under different parents is fine.
        tree.add_path(&["C", "x"], false).unwrap();
        tree.add_path(&["B", "x"], false).unwrap();
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn append_allows_repeated_labels() {
        let mut tree: Hierarchy = Hierarchy::new();
        let menu = tree.insert(None, "File", ()).unwrap();
        let first = tree.append(Some(menu), "-", ()).unwrap();
        let second = tree.append(Some(menu), "-", ()).unwrap();
        assert_ne!(first, second);
        assert_eq!(tree.children_of(menu), [first, second]);
        assert_eq!(tree.find(&["File", "-"]), Some(first));
        tree.remove(menu);
        assert!(tree.append(Some(menu), "-", ()).is_none(), "stale parent");
    }

    #[test]
    fn create_parents_reuses_existing_nodes() {
        let mut tree: Hierarchy = Hierarchy::new();
        tree.add_path(&["Root", "Child1"], true).unwrap();
        let c2 = tree.add_path(&["Root", "Child2"], true).unwrap();
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.path_of(c2), vec!["Root", "Child2"]);
        assert_eq!(tree.depth(c2), Some(1));
    }

    #[test]
    fn expand_forces_ancestors_open_but_collapse_is_local() {
        let mut tree: Hierarchy = Hierarchy::new();
        let leaf = tree.add_path(&["a", "b", "c"], true).unwrap();
        tree.collapse_all();
        assert_eq!(labels(&tree), ["a"]);
        assert!(tree.expand(&["a", "b"]));
        assert_eq!(labels(&tree), ["a", "b", "c"]);
        assert!(tree.collapse(&["a", "b"]));
        assert!(tree.is_expanded(tree.find(&["a"]).unwrap()), "parent stays open");
        assert_eq!(tree.visible_index_of(leaf), None);
        assert!(!tree.expand(&["missing"]));
    }

    #[test]
    fn remove_path_prunes_empty_ancestors() {
        let mut tree: Hierarchy = Hierarchy::new();
        tree.add_path(&["a", "b", "c"], true).unwrap();
        tree.add_path(&["a", "d"], true).unwrap();
        assert!(tree.remove_path(&["a", "b", "c"], true));
        assert!(tree.find(&["a", "b"]).is_none(), "b became empty");
        assert!(tree.find(&["a"]).is_some(), "a still has d");
        assert!(tree.remove_path(&["a", "d"], false));
        assert!(tree.find(&["a"]).is_some(), "no pruning requested");
        assert!(!tree.remove_path(&["zzz"], true));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree: Hierarchy = Hierarchy::new();
        let root = tree.insert(None, "root", ()).unwrap();
        let a = tree.insert(Some(root), "a", ()).unwrap();
        tree.remove(a);
        assert!(!tree.is_alive(a));
        let b = tree.insert(Some(root), "b", ()).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        assert!(tree.label(a).is_none());
        assert!(tree.insert(Some(a), "x", ()).is_none(), "stale parent");
    }

    #[test]
    fn prev_sibling_treats_roots_as_siblings() {
        let mut tree: Hierarchy = Hierarchy::new();
        let a1 = tree.add_path(&["a", "a1"], true).unwrap();
        let a2 = tree.add_path(&["a", "a2"], true).unwrap();
        let b = tree.add_path(&["b"], true).unwrap();
        let a = tree.find(&["a"]).unwrap();
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.prev_sibling(a), None);
        assert_eq!(tree.prev_sibling(a2), Some(a1));
        assert_eq!(tree.prev_sibling(a1), None);
    }

    #[test]
    fn clear_and_snapshot() {
        let mut tree: Hierarchy = Hierarchy::new();
        tree.add_path(&["x", "y"], true).unwrap();
        tree.collapse(&["x"]);
        let snap = tree.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(!snap[0].expanded);
        assert_eq!(snap[0].children[0].label, "y");
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.visible_nodes().is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn payload_is_per_node() {
        let mut tree: Hierarchy<u32> = Hierarchy::new();
        let id = tree.add_path(&["a"], false).unwrap();
        *tree.data_mut(id).unwrap() = 7;
        assert_eq!(tree.data(id), Some(&7));
    }
}
