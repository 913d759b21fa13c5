// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu state and the path-addressed API.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use understory_hierarchy::{Hierarchy, NodeId};
use understory_text::{TextStyle, text_width};
use understory_widget::{EventCx, Signal, Theme};

/// Label that turns a menu item into a separator line.
pub const SEPARATOR: &str = "-";

/// Per-node state: menus and items share it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) enabled: bool,
    /// Child highlighted in this node's popup, if any.
    pub(crate) selected: Option<usize>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            enabled: true,
            selected: None,
        }
    }
}

/// Owned copy of a menu and its items, as returned by [`MenuBar::menus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    /// Label shown on the bar or in the popup.
    pub text: String,
    /// Disabled menus cannot be opened and disabled items cannot be activated.
    pub enabled: bool,
    /// Items in display order.
    pub items: Vec<Menu>,
}

/// Horizontal bar of menus whose popups open as the container overlay.
///
/// Top-level menus are roots of a [`Hierarchy`]. At most one of them is open, and inside the
/// open menu every popup highlights at most one item, so the open popups always form a single
/// chain from the bar down to the deepest submenu. Closing or switching menus clears the whole
/// chain before anything else becomes visible.
pub struct MenuBar {
    pub(crate) theme: Theme,
    pub(crate) size: Size,
    pub(crate) menus: Hierarchy<Entry>,
    pub(crate) open: Option<NodeId>,
    pub(crate) minimum_sub_menu_width: f64,
    pub(crate) inverted: bool,
    pub(crate) mouse_down: bool,
    pub(crate) on_popup: bool,
    /// Window position of the bar, from the most recent event.
    pub(crate) origin: Point,
    /// Window width popups must fit in, from the most recent event.
    pub(crate) viewport_width: f64,
    pub(crate) on_menu_item_click: Signal<Vec<String>>,
}

impl core::fmt::Debug for MenuBar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuBar")
            .field("size", &self.size)
            .field("menus", &self.menus)
            .field("open", &self.open_menu_index())
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

impl MenuBar {
    /// Create an empty menu bar styled by `theme`.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        Self {
            theme: theme.clone(),
            size: Size::new(0.0, theme.menu_bar_height),
            menus: Hierarchy::new(),
            open: None,
            minimum_sub_menu_width: theme.minimum_sub_menu_width,
            inverted: false,
            mouse_down: false,
            on_popup: false,
            origin: Point::ZERO,
            viewport_width: f64::INFINITY,
            on_menu_item_click: Signal::new(),
        }
    }

    /// Emitted with the path of an activated item, or `[menu]` for a menu without items.
    pub fn on_menu_item_click(&mut self) -> &mut Signal<Vec<String>> {
        &mut self.on_menu_item_click
    }

    // --- structure ---

    /// Append a top-level menu. Returns `false` if a menu with that label exists.
    pub fn add_menu(&mut self, text: &str) -> bool {
        self.menus.insert(None, text, Entry::default()).is_some()
    }

    /// Add an item at `path`, where `path[0]` is the top-level menu.
    ///
    /// Missing menus and submenus are created only with `create_parents`. A last segment of
    /// [`SEPARATOR`] adds a separator; separators may repeat within a popup.
    pub fn add_menu_item<S: AsRef<str>>(&mut self, path: &[S], create_parents: bool) -> bool {
        let Some((last, parents)) = path.split_last() else {
            return false;
        };
        if parents.is_empty() {
            return false;
        }
        if last.as_ref() != SEPARATOR {
            return self.menus.add_path(path, create_parents).is_some();
        }
        let parent = match self.menus.find(parents) {
            Some(id) => id,
            None if create_parents => match self.menus.add_path(parents, true) {
                Some(id) => id,
                None => return false,
            },
            None => return false,
        };
        self.menus
            .append(Some(parent), SEPARATOR, Entry::default())
            .is_some()
    }

    /// Remove a top-level menu with all its items.
    pub fn remove_menu(&mut self, text: &str) -> bool {
        let removed = self.menus.remove_path(&[text], false);
        self.after_removal();
        removed
    }

    /// Remove the item at `path`. With `prune_empty_parents`, submenus and menus left
    /// without items go too.
    pub fn remove_menu_item<S: AsRef<str>>(&mut self, path: &[S], prune_empty_parents: bool) -> bool {
        if path.len() < 2 {
            return false;
        }
        let removed = self.menus.remove_path(path, prune_empty_parents);
        self.after_removal();
        removed
    }

    /// Remove every item below the menu or submenu at `path`, keeping the node itself.
    pub fn remove_sub_menu_items<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some(id) = self.menus.find(path) else {
            return false;
        };
        let children: Vec<NodeId> = self.menus.children_of(id).to_vec();
        for child in children {
            self.menus.remove(child);
        }
        self.after_removal();
        true
    }

    /// Remove every menu.
    pub fn remove_all_menus(&mut self) {
        self.menus.clear();
        self.open = None;
    }

    // Removal shifts item indices, so the open chain is cleared. An open menu that lost its
    // popup closes. The overlay router notices on the next pointer event.
    fn after_removal(&mut self) {
        let Some(root) = self.open else {
            return;
        };
        if !self.menus.is_alive(root) || self.menus.is_leaf(root) {
            self.open = None;
        } else {
            self.close_chain(root);
        }
    }

    // --- enabled state ---

    /// Enable or disable a top-level menu. Disabling the open menu closes it.
    pub fn set_menu_enabled(&mut self, text: &str, enabled: bool) -> bool {
        let Some(id) = self.menus.find(&[text]) else {
            return false;
        };
        if !enabled && self.open == Some(id) {
            self.close_state();
        }
        self.set_entry_enabled(id, enabled);
        true
    }

    /// Whether a top-level menu exists and is enabled.
    #[must_use]
    pub fn menu_enabled(&self, text: &str) -> bool {
        self.menus
            .find(&[text])
            .is_some_and(|id| self.is_enabled(id))
    }

    /// Enable or disable the item at `path`. Disabling a highlighted item clears the
    /// highlight and closes its submenu.
    pub fn set_menu_item_enabled<S: AsRef<str>>(&mut self, path: &[S], enabled: bool) -> bool {
        if path.len() < 2 {
            return false;
        }
        let Some(id) = self.menus.find(path) else {
            return false;
        };
        if !enabled
            && let Some(parent) = self.menus.parent_of(id)
            && self.selected_item(parent) == Some(id)
        {
            self.close_chain(parent);
        }
        self.set_entry_enabled(id, enabled);
        true
    }

    /// Whether the item at `path` exists and is enabled.
    #[must_use]
    pub fn menu_item_enabled<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.len() >= 2
            && self
                .menus
                .find(path)
                .is_some_and(|id| self.is_enabled(id))
    }

    fn set_entry_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(entry) = self.menus.data_mut(id) {
            entry.enabled = enabled;
        }
    }

    // --- open state ---

    /// Open the top-level menu at `index`, closing any other open menu first.
    ///
    /// Returns `false` if there is no such menu.
    pub fn open_menu(&mut self, index: usize, cx: &mut EventCx<'_>) -> bool {
        let Some(&id) = self.menus.roots().get(index) else {
            return false;
        };
        self.remember(cx);
        if self.open == Some(id) {
            return true;
        }
        self.close_state();
        self.open = Some(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(menu = ?self.menus.label(id), "menu opened");
        cx.open_overlay();
        cx.request_redraw();
        true
    }

    /// Close the open menu. Returns `false` if none was open.
    pub fn close_menu(&mut self, cx: &mut EventCx<'_>) -> bool {
        if !self.close_state() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("menu closed");
        cx.close_overlay();
        cx.request_redraw();
        true
    }

    /// Index of the open top-level menu.
    #[must_use]
    pub fn open_menu_index(&self) -> Option<usize> {
        let open = self.open?;
        self.menus.roots().iter().position(|&r| r == open)
    }

    /// Labels along the open chain: the open menu, then each highlighted item.
    #[must_use]
    pub fn active_path(&self) -> Vec<String> {
        let mut path = Vec::new();
        let mut cur = self.open;
        while let Some(id) = cur {
            path.push(String::from(self.menus.label(id).unwrap_or_default()));
            cur = self.selected_item(id);
        }
        path
    }

    /// Forget the open menu and its chain without notifying anyone.
    pub(crate) fn close_state(&mut self) -> bool {
        let Some(root) = self.open.take() else {
            return false;
        };
        self.close_chain(root);
        self.on_popup = false;
        true
    }

    /// Clear the highlight of `id` and of every submenu below it. Returns `true` if
    /// anything was highlighted.
    pub(crate) fn close_chain(&mut self, id: NodeId) -> bool {
        let mut changed = false;
        let mut cur = Some(id);
        while let Some(node) = cur {
            let selected = self
                .menus
                .data_mut(node)
                .and_then(|entry| entry.selected.take());
            changed |= selected.is_some();
            cur = selected.and_then(|i| self.menus.children_of(node).get(i).copied());
        }
        changed
    }

    /// Clear the highlight of the deepest highlighted leaf.
    pub(crate) fn deselect_bottom_item(&mut self) -> bool {
        let Some(mut menu) = self.open else {
            return false;
        };
        while let Some(item) = self.selected_item(menu) {
            if self.menus.is_leaf(item) {
                return self.close_chain(menu);
            }
            menu = item;
        }
        false
    }

    pub(crate) fn remember(&mut self, cx: &EventCx<'_>) {
        self.origin = cx.origin();
        self.viewport_width = cx.viewport().width;
    }

    // --- queries ---

    pub(crate) fn selected_item(&self, id: NodeId) -> Option<NodeId> {
        let index = self.menus.data(id)?.selected?;
        self.menus.children_of(id).get(index).copied()
    }

    pub(crate) fn is_enabled(&self, id: NodeId) -> bool {
        self.menus.data(id).is_some_and(|e| e.enabled)
    }

    pub(crate) fn is_separator(&self, id: NodeId) -> bool {
        self.menus.label(id) == Some(SEPARATOR)
    }

    /// Owned copy of every menu.
    #[must_use]
    pub fn menus(&self) -> Vec<Menu> {
        self.menus
            .roots()
            .iter()
            .map(|&id| self.snapshot(id))
            .collect()
    }

    fn snapshot(&self, id: NodeId) -> Menu {
        Menu {
            text: String::from(self.menus.label(id).unwrap_or_default()),
            enabled: self.is_enabled(id),
            items: self
                .menus
                .children_of(id)
                .iter()
                .map(|&c| self.snapshot(c))
                .collect(),
        }
    }

    // --- configuration ---

    /// Bar height, which is also the height of every popup row.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Smallest popup width.
    #[must_use]
    pub const fn minimum_sub_menu_width(&self) -> f64 {
        self.minimum_sub_menu_width
    }

    /// Change the smallest popup width.
    pub fn set_minimum_sub_menu_width(&mut self, width: f64) {
        self.minimum_sub_menu_width = width.max(0.0);
    }

    /// Whether popups open upwards.
    #[must_use]
    pub const fn inverted_menu_direction(&self) -> bool {
        self.inverted
    }

    /// Open popups upwards, for a bar at the bottom of the window.
    pub fn set_inverted_menu_direction(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// Character size.
    #[must_use]
    pub const fn text_size(&self) -> u32 {
        self.theme.text_size
    }

    /// Change the character size.
    pub fn set_text_size(&mut self, size: u32) {
        self.theme.text_size = size;
    }

    pub(crate) fn style(&self) -> TextStyle {
        self.theme.style()
    }

    pub(crate) fn label_width(&self, id: NodeId) -> f64 {
        let label: Vec<char> = self.menus.label(id).unwrap_or_default().chars().collect();
        text_width(&*self.theme.metrics, &label, self.style())
    }
}
