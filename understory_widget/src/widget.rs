// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by concrete widgets, and the per-dispatch context.

use core::any::Any;
use core::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::clipboard::Clipboard;
use crate::event::{KeyEvent, PointerEvent};
use crate::overlay::OverlayHost;
use crate::render::Renderer;

/// Identifier of a child within a [`Container`](crate::Container).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) u64);

impl WidgetId {
    /// Raw value, unique within the owning container.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Something that projects its state into draw calls.
pub trait Drawable {
    /// Draw in local coordinates; the caller has pushed the widget's origin.
    fn draw(&self, renderer: &mut dyn Renderer);
}

/// Something with a local extent that can be hit-tested.
pub trait HitTestable {
    /// Local size. The widget occupies `(0, 0)..size`.
    fn size(&self) -> Size;

    /// Returns `true` if the local point `pos` is on the widget.
    fn hit_test(&self, pos: Point) -> bool {
        self.size().to_rect().contains(pos)
    }
}

/// Something that can hold keyboard focus.
pub trait FocusReceiver {
    /// Gain or lose focus.
    fn set_focused(&mut self, focused: bool, cx: &mut EventCx<'_>);
    /// Current focus state.
    fn is_focused(&self) -> bool;
    /// Whether Tab navigation may land here.
    fn accepts_tab_focus(&self) -> bool {
        true
    }
}

/// Something that consumes key presses and text input while focused.
pub trait KeyHandler {
    /// Handle a key press. Returns `true` if consumed.
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut EventCx<'_>) -> bool;
    /// Handle an entered character. Returns `true` if consumed.
    fn text_entered(&mut self, ch: char, cx: &mut EventCx<'_>) -> bool;
}

/// A widget: drawable, hit-testable, and addressable through [`Any`].
///
/// Optional capabilities are exposed through the `as_*` accessors, so a container can hold
/// heterogeneous widgets as `Box<dyn Widget>` and still find out which of them take focus,
/// keys, or overlays.
pub trait Widget: Drawable + HitTestable + Any {
    /// Handle a pointer event in local coordinates. Returns `true` if consumed.
    ///
    /// A wheel event that returns `false` bubbles to the parent.
    fn pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> bool;

    /// The pointer left the widget.
    fn pointer_left(&mut self, cx: &mut EventCx<'_>) {
        let _ = cx;
    }

    /// A button pressed on this widget was released, wherever the pointer is now.
    fn button_no_longer_down(&mut self, cx: &mut EventCx<'_>) {
        let _ = cx;
    }

    /// Advance timers by `elapsed`. Returns `true` if a redraw is needed.
    fn update(&mut self, elapsed: Duration) -> bool {
        let _ = elapsed;
        false
    }

    /// Focus capability.
    fn as_focus_receiver(&mut self) -> Option<&mut dyn FocusReceiver> {
        None
    }

    /// Keyboard capability.
    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        None
    }

    /// Overlay capability.
    fn as_overlay_host(&mut self) -> Option<&mut dyn OverlayHost> {
        None
    }

    /// Overlay capability, shared.
    fn as_overlay_host_ref(&self) -> Option<&dyn OverlayHost> {
        None
    }
}

/// Overlay change asked for by a widget during dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayRequest {
    /// Route pointer input to the requesting widget's overlay first.
    Open,
    /// Stop routing to the requesting widget's overlay.
    Close,
}

/// Requests gathered while one widget handled an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Requests {
    /// The widget changed visually.
    pub redraw: bool,
    /// Overlay change, last request wins.
    pub overlay: Option<OverlayRequest>,
}

/// Context passed down with every event.
pub struct EventCx<'a> {
    clipboard: &'a mut dyn Clipboard,
    viewport: Size,
    origin: Point,
    requests: Requests,
}

impl core::fmt::Debug for EventCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventCx")
            .field("viewport", &self.viewport)
            .field("origin", &self.origin)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl<'a> EventCx<'a> {
    /// Root context for a window of size `viewport`.
    pub fn new(clipboard: &'a mut dyn Clipboard, viewport: Size) -> Self {
        Self {
            clipboard,
            viewport,
            origin: Point::ZERO,
            requests: Requests::default(),
        }
    }

    /// Context for a child placed at `offset` inside the current receiver.
    pub fn for_child(&mut self, offset: Vec2) -> EventCx<'_> {
        EventCx {
            clipboard: &mut *self.clipboard,
            viewport: self.viewport,
            origin: self.origin + offset,
            requests: Requests::default(),
        }
    }

    /// Clipboard collaborator.
    pub fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut *self.clipboard
    }

    /// Size of the root window.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Position of the receiver's local origin in window coordinates.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Ask for a redraw.
    pub fn request_redraw(&mut self) {
        self.requests.redraw = true;
    }

    /// Route pointer input to the receiver's overlay first.
    pub fn open_overlay(&mut self) {
        self.requests.overlay = Some(OverlayRequest::Open);
    }

    /// Stop routing pointer input to the receiver's overlay.
    pub fn close_overlay(&mut self) {
        self.requests.overlay = Some(OverlayRequest::Close);
    }

    /// Requests made so far.
    #[must_use]
    pub const fn requests(&self) -> Requests {
        self.requests
    }

    /// Take and reset the requests.
    pub fn take_requests(&mut self) -> Requests {
        core::mem::take(&mut self.requests)
    }
}
