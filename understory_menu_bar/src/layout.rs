// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar and popup geometry, in the bar's local coordinates.

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_hierarchy::NodeId;

use crate::menu_bar::MenuBar;

/// One open popup in the chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Popup {
    /// Menu or submenu whose items the popup lists.
    pub(crate) menu: NodeId,
    pub(crate) rect: Rect,
    /// Preferred side for the next submenu.
    pub(crate) opens_right: bool,
}

/// Popups from the open menu down to the deepest open submenu.
pub(crate) type PopupChain = SmallVec<[Popup; 4]>;

impl MenuBar {
    pub(crate) fn bar_height(&self) -> f64 {
        self.size.height
    }

    /// Width of a top-level menu on the bar.
    pub(crate) fn bar_menu_width(&self, id: NodeId) -> f64 {
        self.label_width(id) + 2.0 * self.theme.distance_to_side
    }

    /// Left edge of the top-level menu at `index`.
    pub(crate) fn bar_menu_x(&self, index: usize) -> f64 {
        self.menus
            .roots()
            .iter()
            .take(index)
            .map(|&id| self.bar_menu_width(id))
            .sum()
    }

    /// Combined width of every top-level menu.
    pub(crate) fn menus_width(&self) -> f64 {
        self.bar_menu_x(self.menus.roots().len())
    }

    /// Top-level menu under `x`, with its index.
    pub(crate) fn bar_menu_at(&self, x: f64) -> Option<(usize, NodeId)> {
        if x < 0.0 {
            return None;
        }
        let mut right = 0.0;
        for (index, &id) in self.menus.roots().iter().enumerate() {
            right += self.bar_menu_width(id);
            if x < right {
                return Some((index, id));
            }
        }
        None
    }

    pub(crate) fn on_bar(&self, pos: Point) -> bool {
        pos.x >= 0.0
            && pos.y >= 0.0
            && pos.x < self.size.width.max(self.menus_width())
            && pos.y < self.bar_height()
    }

    /// Row height of a popup item.
    pub(crate) fn item_height(&self, id: NodeId) -> f64 {
        if self.is_separator(id) {
            self.theme.separator_thickness + 2.0 * self.theme.separator_vertical_padding
        } else {
            self.bar_height()
        }
    }

    /// Size of the popup listing the items of `menu`.
    pub(crate) fn popup_height(&self, menu: NodeId) -> f64 {
        self.menus
            .children_of(menu)
            .iter()
            .map(|&id| self.item_height(id))
            .sum()
    }

    pub(crate) fn popup_width(&self, menu: NodeId) -> f64 {
        let dts = self.theme.distance_to_side;
        let arrow = self.bar_height() / 4.0 + dts;
        self.menus
            .children_of(menu)
            .iter()
            .map(|&id| {
                let mut width = self.label_width(id) + 2.0 * dts;
                if !self.menus.is_leaf(id) {
                    width += arrow;
                }
                width
            })
            .fold(self.minimum_sub_menu_width, f64::max)
    }

    /// The chain of open popups.
    ///
    /// The top popup hangs below its bar menu, or above it with an inverted direction, and
    /// is pushed left to fit inside the window. Each submenu opens beside its highlighted
    /// item, on its parent's preferred side unless only the other side has more room.
    pub(crate) fn popups(&self) -> PopupChain {
        let mut chain = PopupChain::new();
        let Some(index) = self.open_menu_index() else {
            return chain;
        };
        let root = self.menus.roots()[index];
        let bar_h = self.bar_height();
        let viewport = self.viewport_width;
        let origin = self.origin.x;

        let width = self.popup_width(root);
        let height = self.popup_height(root);
        let mut x = self.bar_menu_x(index);
        let y = if self.inverted { -height } else { bar_h };
        let mut opens_right = true;
        if origin + x + width > viewport {
            x = (viewport - width).max(0.0) - origin;
            opens_right = false;
        }
        let mut popup = Popup {
            menu: root,
            rect: Rect::new(x, y, x + width, y + height),
            opens_right,
        };
        chain.push(popup);

        loop {
            let Some(selected) = self.menus.data(popup.menu).and_then(|e| e.selected) else {
                break;
            };
            let items = self.menus.children_of(popup.menu);
            let Some(&item) = items.get(selected) else {
                break;
            };
            if self.menus.is_leaf(item) {
                break;
            }
            let sub_w = self.popup_width(item);
            let sub_h = self.popup_height(item);
            let left = origin + popup.rect.x0;
            let w = popup.rect.width();
            let mut opens_right = popup.opens_right;
            let dx = if opens_right {
                let overflow = left + w + sub_w - viewport;
                if overflow > 0.0 && overflow < left {
                    opens_right = false;
                    -sub_w
                } else {
                    w
                }
            } else if left < sub_w && viewport - w - left > left {
                opens_right = true;
                w
            } else {
                -sub_w
            };
            let mut dy: f64 = items[..selected]
                .iter()
                .map(|&id| self.item_height(id))
                .sum();
            if self.inverted {
                dy -= sub_h - bar_h;
            }
            let x0 = popup.rect.x0 + dx;
            let y0 = popup.rect.y0 + dy;
            popup = Popup {
                menu: item,
                rect: Rect::new(x0, y0, x0 + sub_w, y0 + sub_h),
                opens_right,
            };
            chain.push(popup);
        }
        chain
    }

    /// Popup item under `pos` as `(menu, index)`, deepest popup first.
    pub(crate) fn item_at(&self, pos: Point) -> Option<(NodeId, usize)> {
        let chain = self.popups();
        let popup = chain.iter().rev().find(|p| p.rect.contains(pos))?;
        let items = self.menus.children_of(popup.menu);
        let mut bottom = popup.rect.y0;
        for (index, &id) in items.iter().enumerate() {
            bottom += self.item_height(id);
            if pos.y < bottom {
                return Some((popup.menu, index));
            }
        }
        items.len().checked_sub(1).map(|last| (popup.menu, last))
    }
}
