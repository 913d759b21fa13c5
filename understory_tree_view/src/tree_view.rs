// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree view state, row geometry, and the path-addressed API.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Rect, Size};
use understory_event_state::click::DoubleClickState;
use understory_event_state::tolerance::EdgeScrollTolerance;
use understory_hierarchy::{Hierarchy, Item, NodeId};
use understory_scroll::{Orientation, RowStrip, ScrollAlign, Scrollbar};
use understory_text::{TextStyle, text_width};
use understory_widget::{Signal, Theme};

/// Expandable list of labeled rows.
///
/// Items are addressed by label paths such as `["Root", "Child"]`. Selection and hover refer
/// to rows of the visible list, which is rebuilt inside every call that changes the tree
/// or the expanded state, so they never point at a stale row.
pub struct TreeView {
    pub(crate) theme: Theme,
    pub(crate) size: Size,
    pub(crate) items: Hierarchy,
    pub(crate) rows: RowStrip,
    pub(crate) vertical: Scrollbar,
    pub(crate) horizontal: Scrollbar,
    pub(crate) selected: Option<NodeId>,
    pub(crate) hovered: Option<usize>,
    pub(crate) max_right: f64,
    pub(crate) focused: bool,
    pub(crate) mouse_down: bool,
    pub(crate) double_click: DoubleClickState<usize>,
    pub(crate) tolerance: EdgeScrollTolerance,
    pub(crate) on_item_select: Signal<Vec<String>>,
    pub(crate) on_double_click: Signal<Vec<String>>,
    pub(crate) on_expand: Signal<Vec<String>>,
    pub(crate) on_collapse: Signal<Vec<String>>,
    pub(crate) on_right_click: Signal<Vec<String>>,
}

impl core::fmt::Debug for TreeView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeView")
            .field("size", &self.size)
            .field("items", &self.items)
            .field("selected", &self.selected_index())
            .field("hovered", &self.hovered)
            .field("vertical", &self.vertical.value())
            .field("horizontal", &self.horizontal.value())
            .finish_non_exhaustive()
    }
}

impl TreeView {
    /// Create an empty tree view styled by `theme`.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        let style = theme.style();
        let line_height = theme.metrics.line_height(style);
        let mut tree = Self {
            theme: theme.clone(),
            size: Size::new(
                line_height * 10.0,
                theme.item_height * 7.0 + 2.0 * theme.padding,
            ),
            items: Hierarchy::new(),
            rows: RowStrip::new(theme.item_height, 0),
            vertical: Scrollbar::new(Orientation::Vertical),
            horizontal: Scrollbar::new(Orientation::Horizontal),
            selected: None,
            hovered: None,
            max_right: 0.0,
            focused: false,
            mouse_down: false,
            double_click: DoubleClickState::with_window(theme.double_click_time),
            tolerance: EdgeScrollTolerance::with_threshold(theme.edge_scroll_tolerance),
            on_item_select: Signal::new(),
            on_double_click: Signal::new(),
            on_expand: Signal::new(),
            on_collapse: Signal::new(),
            on_right_click: Signal::new(),
        };
        tree.set_item_height(theme.item_height);
        tree
    }

    // --- signals ---

    /// Emitted with the path of the newly selected item, or an empty path on deselection.
    pub fn on_item_select(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_item_select
    }

    /// Emitted with the path of a leaf that was double clicked.
    pub fn on_double_click(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_double_click
    }

    /// Emitted with the path of a branch the user expanded.
    pub fn on_expand(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_expand
    }

    /// Emitted with the path of a branch the user collapsed.
    pub fn on_collapse(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_collapse
    }

    /// Emitted with the path of an item that was right clicked.
    pub fn on_right_click(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_right_click
    }

    // --- items ---

    /// Add an item at `path`.
    ///
    /// Missing parents are created only with `create_parents`. Returns `false` if a parent
    /// is missing, the path is empty, or the label is already used by a sibling.
    pub fn add_item<S: AsRef<str>>(&mut self, path: &[S], create_parents: bool) -> bool {
        let added = self.items.add_path(path, create_parents).is_some();
        if added {
            self.refresh();
        }
        added
    }

    /// Expand the item at `path` and every ancestor. Returns `false` if it does not exist.
    pub fn expand<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let found = self.items.expand(path);
        self.refresh();
        found
    }

    /// Collapse the item at `path`. Returns `false` if it does not exist.
    pub fn collapse<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let found = self.items.collapse(path);
        self.refresh();
        found
    }

    /// Expand every item.
    pub fn expand_all(&mut self) {
        self.items.expand_all();
        self.refresh();
    }

    /// Collapse every item.
    pub fn collapse_all(&mut self) {
        self.items.collapse_all();
        self.refresh();
    }

    /// Remove the item at `path` with its children.
    ///
    /// With `prune_empty_parents`, ancestors left without children go too.
    pub fn remove_item<S: AsRef<str>>(&mut self, path: &[S], prune_empty_parents: bool) -> bool {
        let removed = self.items.remove_path(path, prune_empty_parents);
        self.refresh();
        removed
    }

    /// Remove every item.
    pub fn remove_all_items(&mut self) {
        self.items.clear();
        self.refresh();
    }

    /// Owned copy of the items.
    #[must_use]
    pub fn nodes(&self) -> Vec<Item> {
        self.items.snapshot()
    }

    /// Paths of the rows currently listed, top to bottom.
    #[must_use]
    pub fn visible_paths(&self) -> Vec<Vec<String>> {
        self.items
            .visible_nodes()
            .iter()
            .map(|&id| self.items.path_of(id))
            .collect()
    }

    // --- selection ---

    /// Select the item at `path`, expanding its ancestors first.
    ///
    /// Returns `false`, leaving the selection alone, if the item does not exist.
    pub fn select_item<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some(id) = self.items.find(path) else {
            return false;
        };
        if let Some(parent) = self.items.parent_of(id) {
            self.items.expand_with_ancestors(parent);
            self.refresh();
        }
        let index = self.items.visible_index_of(id);
        self.select_index(index);
        true
    }

    /// Clear the selection.
    pub fn deselect_item(&mut self) {
        self.select_index(None);
    }

    /// Path of the selected item, empty when nothing is selected.
    #[must_use]
    pub fn selected_item(&self) -> Vec<String> {
        self.selected
            .map(|id| self.items.path_of(id))
            .unwrap_or_default()
    }

    /// Row of the selected item.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.items.visible_index_of(id))
    }

    /// Row under the pointer.
    #[must_use]
    pub const fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    // --- configuration ---

    /// Widget size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.refresh();
    }

    /// Row height.
    #[must_use]
    pub const fn item_height(&self) -> f64 {
        self.theme.item_height
    }

    /// Change the row height. The scrollbars step by one row per wheel notch.
    pub fn set_item_height(&mut self, height: f64) {
        self.theme.item_height = height.max(0.0);
        self.rows.set_row_height(self.theme.item_height);
        let step = to_px(self.theme.item_height);
        self.vertical.set_scroll_amount(step);
        self.horizontal.set_scroll_amount(step);
        self.refresh();
    }

    /// Character size.
    #[must_use]
    pub const fn text_size(&self) -> u32 {
        self.theme.text_size
    }

    /// Change the character size.
    pub fn set_text_size(&mut self, size: u32) {
        self.theme.text_size = size;
        self.refresh();
    }

    /// Vertical scroll offset in pixels.
    #[must_use]
    pub const fn vertical_scrollbar_value(&self) -> u32 {
        self.vertical.value()
    }

    /// Scroll vertically, clamped to the content.
    pub fn set_vertical_scrollbar_value(&mut self, value: u32) {
        self.vertical.set_value(value);
    }

    /// Horizontal scroll offset in pixels.
    #[must_use]
    pub const fn horizontal_scrollbar_value(&self) -> u32 {
        self.horizontal.value()
    }

    /// Scroll horizontally, clamped to the content.
    pub fn set_horizontal_scrollbar_value(&mut self, value: u32) {
        self.horizontal.set_value(value);
    }

    /// Grace period before wheel events at an end bubble to the parent.
    pub fn set_edge_scroll_tolerance(&mut self, threshold: core::time::Duration) {
        self.tolerance.threshold = threshold;
    }

    // --- internals ---

    pub(crate) fn style(&self) -> TextStyle {
        self.theme.style()
    }

    pub(crate) fn select_index(&mut self, index: Option<usize>) {
        let id = index.and_then(|i| self.items.visible_nodes().get(i).copied());
        if id == self.selected {
            return;
        }
        self.selected = id;
        let path = self.selected_item();
        self.on_item_select.emit(&path);
    }

    // Move the selection by keyboard and scroll it into view.
    pub(crate) fn select_and_reveal(&mut self, index: usize) {
        self.select_index(Some(index));
        let scroll = self.rows.reveal(
            index,
            f64::from(self.vertical.value()),
            f64::from(self.vertical.viewport_size()),
            ScrollAlign::Nearest,
        );
        self.vertical.set_value(to_px(scroll));
    }

    pub(crate) fn path_at(&self, index: usize) -> Vec<String> {
        self.items
            .visible_nodes()
            .get(index)
            .map(|&id| self.items.path_of(id))
            .unwrap_or_default()
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<NodeId> {
        self.items.visible_nodes().get(index).copied()
    }

    /// Flip the branch at `index` and report it. Leaves are left alone.
    pub(crate) fn toggle(&mut self, index: usize) -> bool {
        let Some(id) = self.node_at(index) else {
            return false;
        };
        if self.items.is_leaf(id) {
            return false;
        }
        let expanded = !self.items.is_expanded(id);
        self.items.set_expanded(id, expanded);
        self.refresh();
        let path = self.items.path_of(id);
        if expanded {
            self.on_expand.emit(&path);
        } else {
            self.on_collapse.emit(&path);
        }
        true
    }

    /// Side of the square disclosure icon.
    #[must_use]
    pub fn icon_size(&self) -> f64 {
        let h = self.theme.item_height;
        let wanted = (h / 2.0).round();
        let line = (h / 10.0).round();
        // Odd line widths stay centred in the "+".
        ((wanted - line) / 2.0).floor() * 2.0 + line
    }

    pub(crate) fn icon_padding(&self) -> f64 {
        self.icon_size() / 4.0
    }

    // Content x of the icon of a row at `depth`.
    pub(crate) fn icon_x(&self, depth: usize) -> f64 {
        let pad = self.icon_padding();
        pad + (self.icon_size() + pad) * count_f64(depth)
    }

    pub(crate) fn text_padding(&self) -> f64 {
        self.theme.metrics.line_height(self.style()) / 10.0
    }

    // Content x of the label of a row at `depth`.
    pub(crate) fn text_x(&self, depth: usize) -> f64 {
        self.icon_x(depth) + self.icon_size() + self.icon_padding() + self.text_padding()
    }

    pub(crate) fn label_width(&self, id: NodeId) -> f64 {
        let label: Vec<char> = self.items.label(id).unwrap_or_default().chars().collect();
        text_width(&*self.theme.metrics, &label, self.style())
    }

    /// Icon rectangle of row `index` in local coordinates.
    #[must_use]
    pub fn icon_rect(&self, index: usize) -> Option<Rect> {
        let id = self.node_at(index)?;
        let depth = self.items.depth(id)?;
        let icon = self.icon_size();
        let pad = self.theme.padding;
        let x = pad + self.icon_x(depth) - f64::from(self.horizontal.value());
        let y = pad + self.rows.row_top(index, f64::from(self.vertical.value()))
            + (self.theme.item_height - icon) / 2.0;
        Some(Rect::new(x, y, x + icon, y + icon))
    }

    /// Local rectangle in which rows are hit and drawn.
    #[must_use]
    pub fn item_area(&self) -> Rect {
        let pad = self.theme.padding;
        let mut right = self.size.width - pad;
        if self.vertical.is_shown() {
            right -= self.theme.scrollbar_width;
        }
        let mut bottom = self.size.height - pad;
        if self.horizontal.is_shown() {
            bottom -= self.theme.scrollbar_width;
        }
        Rect::new(pad, pad, right.max(pad), bottom.max(pad))
    }

    pub(crate) fn vertical_track(&self) -> Rect {
        let w = self.theme.scrollbar_width;
        let bottom = if self.horizontal.is_shown() {
            self.size.height - w
        } else {
            self.size.height
        };
        Rect::new(self.size.width - w, 0.0, self.size.width, bottom.max(0.0))
    }

    pub(crate) fn horizontal_track(&self) -> Rect {
        let w = self.theme.scrollbar_width;
        let right = if self.vertical.is_shown() {
            self.size.width - w
        } else {
            self.size.width
        };
        Rect::new(0.0, self.size.height - w, right.max(0.0), self.size.height)
    }

    /// Row under local `pos`, if it is inside the item area.
    #[must_use]
    pub fn row_at(&self, pos: kurbo::Point) -> Option<usize> {
        if !self.item_area().contains(pos) {
            return None;
        }
        self.rows
            .row_at(pos.y - self.theme.padding, f64::from(self.vertical.value()))
    }

    /// Rebuild everything derived from the visible list: row count, hover, label extents
    /// and the scrollbar ranges.
    pub(crate) fn refresh(&mut self) {
        let visible = self.items.visible_nodes().len();
        self.rows.set_len(visible);
        if self
            .selected
            .is_some_and(|id| self.items.visible_index_of(id).is_none())
        {
            self.selected = None;
        }
        self.hovered = self.hovered.filter(|&h| h < visible);

        let pad = self.theme.padding;
        self.max_right = self
            .items
            .visible_nodes()
            .iter()
            .map(|&id| {
                let depth = self.items.depth(id).unwrap_or(0);
                self.text_x(depth) + self.label_width(id) + pad
            })
            .fold(0.0, f64::max);

        let bar = self.theme.scrollbar_width;
        let inner_w = self.size.width - 2.0 * pad;
        let inner_h = self.size.height - 2.0 * pad;
        self.vertical
            .set_maximum(to_px(self.theme.item_height * count_f64(visible)));
        self.horizontal.set_maximum(to_px(self.max_right));
        if self.max_right + bar > inner_w {
            self.vertical.set_viewport_size(to_px(inner_h - bar));
        } else {
            self.vertical.set_viewport_size(to_px(inner_h));
        }
        if self.vertical.is_shown() {
            self.horizontal.set_viewport_size(to_px(inner_w - bar));
        } else {
            self.horizontal.set_viewport_size(to_px(inner_w));
        }
        if self.horizontal.is_shown() {
            self.horizontal
                .set_maximum(to_px(self.max_right + self.icon_padding()));
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Row counts and depths stay far below 2^52."
)]
fn count_f64(n: usize) -> f64 {
    n as f64
}

// Round to whole pixels, saturating at the u32 range.
pub(crate) fn to_px(v: f64) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Range checked above."
        )]
        let px = v.round() as u32;
        px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::RefCell;

    fn tree() -> TreeView {
        let mut tree = TreeView::new(&Theme::default());
        tree.add_item(&["A", "A1"], true);
        tree.add_item(&["A", "A2", "A2a"], true);
        tree.add_item(&["B", "B1"], true);
        tree.collapse(&["B"]);
        tree
    }

    fn labels(tree: &TreeView) -> Vec<String> {
        tree.visible_paths()
            .into_iter()
            .map(|p| p.last().cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn visible_rows_follow_expansion() {
        let mut tree = tree();
        assert_eq!(labels(&tree), ["A", "A1", "A2", "A2a", "B"]);
        tree.expand(&["B"]);
        assert_eq!(labels(&tree), ["A", "A1", "A2", "A2a", "B", "B1"]);
        tree.collapse_all();
        assert_eq!(labels(&tree), ["A", "B"]);
    }

    #[test]
    fn add_item_respects_parents_and_duplicates() {
        let mut tree = tree();
        assert!(!tree.add_item(&["C", "C1"], false), "missing parent");
        assert!(!tree.add_item(&["A", "A1"], true), "duplicate sibling");
        assert!(tree.add_item(&["A", "A3"], false));
        let empty: [&str; 0] = [];
        assert!(!tree.add_item(&empty, true));
    }

    #[test]
    fn select_item_expands_ancestors_and_reports() {
        let mut tree = tree();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        tree.on_item_select().connect(move |p| sink.borrow_mut().push(p.clone()));

        assert!(tree.select_item(&["B", "B1"]));
        assert_eq!(tree.selected_index(), Some(5));
        assert!(!tree.select_item(&["B", "nope"]));
        assert_eq!(tree.selected_item(), ["B", "B1"]);
        tree.deselect_item();
        assert_eq!(
            *log.borrow(),
            vec![vec!["B".to_string(), "B1".to_string()], Vec::new()]
        );
    }

    #[test]
    fn selection_follows_node_across_rebuilds() {
        let mut tree = tree();
        tree.select_item(&["B"]);
        assert_eq!(tree.selected_index(), Some(4));
        tree.collapse(&["A"]);
        assert_eq!(tree.selected_index(), Some(1), "row index remapped");
        tree.select_item(&["A", "A2", "A2a"]);
        tree.collapse(&["A", "A2"]);
        assert_eq!(tree.selected_index(), None, "hidden rows drop the selection");
        assert!(tree.selected_item().is_empty());
    }

    #[test]
    fn removing_selected_item_clears_selection() {
        let mut tree = tree();
        assert!(tree.remove_item(&["A", "A2", "A2a"], true));
        assert_eq!(labels(&tree), ["A", "A1", "B"], "A2 was pruned, A stays");
        tree.select_item(&["A", "A1"]);
        assert!(tree.remove_item(&["A", "A1"], false));
        assert_eq!(tree.selected_index(), None);
        assert_eq!(labels(&tree), ["A", "B"]);
        assert!(tree.nodes()[0].children.is_empty());
    }

    #[test]
    fn icon_geometry_from_item_height() {
        let tree = TreeView::new(&Theme::default());
        assert_eq!(tree.icon_size(), 10.0);
        assert_eq!(tree.icon_x(0), 2.5);
        assert_eq!(tree.icon_x(2), 2.5 + 2.0 * 12.5);
    }

    #[test]
    fn scrollbars_track_content() {
        let mut tree = TreeView::new(&Theme::default());
        tree.set_size(Size::new(200.0, 104.0));
        for i in 0..10 {
            tree.add_item(&[alloc::format!("item {i}")], false);
        }
        assert_eq!(tree.vertical.maximum(), 200);
        assert_eq!(tree.vertical.viewport_size(), 100);
        assert!(tree.vertical.is_shown());
        assert!(!tree.horizontal.is_shown());
        tree.set_vertical_scrollbar_value(1000);
        assert_eq!(tree.vertical_scrollbar_value(), 100);
        assert_eq!(tree.row_at(kurbo::Point::new(10.0, 2.0)), Some(5));
    }
}
