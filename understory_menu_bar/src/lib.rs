// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu_bar --heading-base-level=0

//! Understory Menu Bar: a horizontal bar of drop-down menus with nested submenus.
//!
//! [`MenuBar`] addresses menus and items by label path, `["File", "Recent", "a.txt"]`, where
//! the first label names a menu on the bar. Items with items of their own open a submenu
//! when highlighted. An item labeled [`SEPARATOR`] draws a line and can never be activated.
//!
//! Open popups are drawn and routed through the container overlay, so they sit above every
//! other widget and see pointer input first. At most one menu is open in a bar, and at most
//! one item is highlighted per popup. Popups flip to the other side of their parent when
//! they would leave the window, and open upwards when
//! [`MenuBar::set_inverted_menu_direction`] is set.
//!
//! Activating a leaf item, or releasing on a menu that has no items, reports the path
//! through [`MenuBar::on_menu_item_click`] and closes the menu.
//!
//! ## Example
//!
//! ```rust
//! use understory_menu_bar::MenuBar;
//! use understory_widget::Theme;
//!
//! let mut bar = MenuBar::new(&Theme::default());
//! bar.add_menu("File");
//! bar.add_menu_item(&["File", "Open"], false);
//! bar.add_menu_item(&["File", "-"], false);
//! bar.add_menu_item(&["File", "Recent", "a.txt"], true);
//! assert!(!bar.add_menu_item(&["View", "Zoom"], false));
//!
//! let file = &bar.menus()[0];
//! assert_eq!(file.items.len(), 3);
//! assert_eq!(file.items[2].items[0].text, "a.txt");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod input;
mod layout;
mod menu_bar;
mod persist;

pub use menu_bar::{Menu, MenuBar, SEPARATOR};
