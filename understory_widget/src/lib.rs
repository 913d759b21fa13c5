// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widget --heading-base-level=0

//! Understory Widget: the retained-mode widget core.
//!
//! Widgets are plain structs that implement a handful of small capability traits:
//!
//! - [`Drawable`] projects state into [`Renderer`] draw calls.
//! - [`HitTestable`] reports the local extent.
//! - [`FocusReceiver`] and [`KeyHandler`] take keyboard focus and input.
//! - [`OverlayHost`] owns a transient popup that sees pointer input first.
//!
//! [`Widget`] ties them together for storage in a [`Container`], which owns boxed widgets,
//! translates pointer coordinates into each child's local space, tracks hover, press and focus,
//! and consults its [`OverlayRouter`] before the widgets themselves. Containers are widgets,
//! so they nest; a nested container forwards its child's overlay to its parent.
//!
//! Notifications use typed [`Signal`]s, and style comes from an explicit [`Theme`] handed to
//! each widget constructor.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_widget::{
//!     Container, Drawable, EventCx, HitTestable, InputEvent, MemoryClipboard, MouseButton,
//!     PointerEvent, Renderer, Widget,
//! };
//!
//! struct Counter {
//!     clicks: u32,
//! }
//!
//! impl Drawable for Counter {
//!     fn draw(&self, _: &mut dyn Renderer) {}
//! }
//!
//! impl HitTestable for Counter {
//!     fn size(&self) -> Size {
//!         Size::new(50.0, 20.0)
//!     }
//! }
//!
//! impl Widget for Counter {
//!     fn pointer(&mut self, event: &PointerEvent, _: &mut EventCx<'_>) -> bool {
//!         if let PointerEvent::Pressed { .. } = event {
//!             self.clicks += 1;
//!         }
//!         true
//!     }
//! }
//!
//! let mut root = Container::new(Size::new(200.0, 100.0));
//! let id = root.add(Counter { clicks: 0 }, Point::new(10.0, 10.0));
//! let mut clipboard = MemoryClipboard::new();
//! let mut cx = EventCx::new(&mut clipboard, Size::new(200.0, 100.0));
//! let press = PointerEvent::Pressed { pos: Point::new(20.0, 15.0), button: MouseButton::Left };
//! root.handle_event(&InputEvent::Pointer(press), &mut cx);
//! assert_eq!(root.get::<Counter>(id).unwrap().clicks, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clipboard;
mod container;
mod event;
mod overlay;
mod render;
mod signal;
mod theme;
mod widget;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use container::Container;
pub use event::{InputEvent, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use overlay::{OverlayHost, OverlayRoute, OverlayRouter};
pub use render::{DrawCommand, RecordingRenderer, Renderer, TextureId};
pub use signal::{ConnectionId, Signal};
pub use theme::{Color, Colors, Theme};
pub use widget::{
    Drawable, EventCx, FocusReceiver, HitTestable, KeyHandler, OverlayRequest, Requests, Widget,
    WidgetId,
};
