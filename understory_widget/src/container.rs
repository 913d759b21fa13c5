// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owning widget list with coordinate translation, focus, and overlay routing.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::{Point, Size};

use crate::event::{InputEvent, Key, KeyEvent, PointerEvent};
use crate::overlay::{OverlayHost, OverlayRoute, OverlayRouter};
use crate::render::Renderer;
use crate::widget::{
    Drawable, EventCx, FocusReceiver, HitTestable, KeyHandler, OverlayRequest, Requests, Widget,
    WidgetId,
};

struct Child {
    id: WidgetId,
    name: Option<String>,
    origin: Point,
    visible: bool,
    widget: Box<dyn Widget>,
}

/// Container of heterogeneous widgets.
///
/// Children are hit-tested topmost first, that is in reverse insertion order. Pointer input
/// goes to the active overlay first, then to the child that holds the pressed button, then to
/// the child under the pointer. Keys and text go to the focused child.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_widget::{Container, EventCx, InputEvent, MemoryClipboard, MouseButton, PointerEvent};
///
/// let window = Size::new(400.0, 300.0);
/// let mut root = Container::new(window);
/// let mut clipboard = MemoryClipboard::new();
/// let mut cx = EventCx::new(&mut clipboard, window);
/// let press = PointerEvent::Pressed { pos: Point::new(10.0, 10.0), button: MouseButton::Left };
/// assert!(!root.handle_event(&InputEvent::Pointer(press), &mut cx), "no child to receive it");
/// ```
pub struct Container {
    size: Size,
    children: Vec<Child>,
    names: HashMap<String, WidgetId>,
    next_id: u64,
    focused: Option<WidgetId>,
    hovered: Option<WidgetId>,
    pressed: Option<WidgetId>,
    overlay: OverlayRouter,
}

impl core::fmt::Debug for Container {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Container")
            .field("size", &self.size)
            .field("children", &self.children.len())
            .field("focused", &self.focused)
            .field("hovered", &self.hovered)
            .field("overlay", &self.overlay.active())
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Empty container of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            children: Vec::new(),
            names: HashMap::new(),
            next_id: 1,
            focused: None,
            hovered: None,
            pressed: None,
            overlay: OverlayRouter::new(),
        }
    }

    /// Resize the container.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Add a widget at `origin`, on top of the existing children.
    pub fn add(&mut self, widget: impl Widget, origin: Point) -> WidgetId {
        self.push(Box::new(widget), origin, None)
    }

    /// Add a widget under a unique name. Returns `None` if the name is taken.
    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        widget: impl Widget,
        origin: Point,
    ) -> Option<WidgetId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return None;
        }
        Some(self.push(Box::new(widget), origin, Some(name)))
    }

    fn push(&mut self, widget: Box<dyn Widget>, origin: Point, name: Option<String>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        if let Some(name) = &name {
            self.names.insert(name.clone(), id);
        }
        self.children.push(Child {
            id,
            name,
            origin,
            visible: true,
            widget,
        });
        id
    }

    /// Remove a child, releasing focus, hover, press, and overlay references to it.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.index_of(id)?;
        let child = self.children.remove(index);
        if let Some(name) = &child.name {
            self.names.remove(name);
        }
        for slot in [&mut self.focused, &mut self.hovered, &mut self.pressed] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        self.overlay.clear_if(id);
        Some(child.widget)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Typed access to a child.
    #[must_use]
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        let widget: &dyn Widget = &*self.child(id)?.widget;
        let any: &dyn Any = widget;
        any.downcast_ref::<W>()
    }

    /// Typed mutable access to a child.
    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        let index = self.index_of(id)?;
        let widget: &mut dyn Widget = &mut *self.children[index].widget;
        let any: &mut dyn Any = widget;
        any.downcast_mut::<W>()
    }

    /// Run `f` on a typed child with a context positioned at the child, then apply the
    /// overlay and redraw requests it made.
    ///
    /// Returns `None` if `id` is unknown or the child is not a `W`.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: WidgetId,
        cx: &mut EventCx<'_>,
        f: impl FnOnce(&mut W, &mut EventCx<'_>) -> R,
    ) -> Option<R> {
        self.with_child(id, cx, |w, cx| {
            let any: &mut dyn Any = w;
            any.downcast_mut::<W>().map(|w| f(w, cx))
        })
        .flatten()
    }

    /// Id of the child registered under `name`.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<WidgetId> {
        self.names.get(name).copied()
    }

    /// Typed access to a named child.
    #[must_use]
    pub fn get_by_name<W: Widget>(&self, name: &str) -> Option<&W> {
        self.get(self.id_of(name)?)
    }

    /// Move a child.
    pub fn set_origin(&mut self, id: WidgetId, origin: Point) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.children[index].origin = origin;
        true
    }

    /// Origin of a child.
    #[must_use]
    pub fn origin_of(&self, id: WidgetId) -> Option<Point> {
        self.child(id).map(|c| c.origin)
    }

    /// Show or hide a child. Hidden children are neither drawn nor hit-tested.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.children[index].visible = visible;
        true
    }

    /// Topmost visible child under the local point `pos`.
    #[must_use]
    pub fn widget_at(&self, pos: Point) -> Option<WidgetId> {
        self.children
            .iter()
            .rev()
            .find(|c| c.visible && c.widget.hit_test(pos - c.origin.to_vec2()))
            .map(|c| c.id)
    }

    /// Focused child.
    #[must_use]
    pub const fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Child that owns the active overlay.
    #[must_use]
    pub const fn overlay_owner(&self) -> Option<WidgetId> {
        self.overlay.active()
    }

    /// Move focus to `id`, or clear it with `None`.
    ///
    /// Returns `false` if `id` cannot take focus.
    pub fn focus(&mut self, id: Option<WidgetId>, cx: &mut EventCx<'_>) -> bool {
        if let Some(target) = id {
            let Some(index) = self.index_of(target) else {
                return false;
            };
            if self.children[index].widget.as_focus_receiver().is_none() {
                return false;
            }
        }
        if self.focused == id {
            return true;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(from = ?self.focused.map(WidgetId::get), to = ?id.map(WidgetId::get), "focus change");
        if let Some(prev) = self.focused.take() {
            self.with_child(prev, cx, |w, cx| {
                if let Some(f) = w.as_focus_receiver() {
                    f.set_focused(false, cx);
                }
            });
        }
        if let Some(next) = id {
            self.focused = Some(next);
            self.with_child(next, cx, |w, cx| {
                if let Some(f) = w.as_focus_receiver() {
                    f.set_focused(true, cx);
                }
            });
        }
        true
    }

    /// Move focus to the next (or, with `backward`, previous) child that accepts Tab focus.
    pub fn focus_next(&mut self, backward: bool, cx: &mut EventCx<'_>) -> bool {
        let n = self.children.len();
        if n == 0 {
            return false;
        }
        let start = self
            .focused
            .and_then(|id| self.index_of(id))
            .unwrap_or(if backward { 0 } else { n - 1 });
        for step in 1..=n {
            let i = if backward {
                (start + n - step) % n
            } else {
                (start + step) % n
            };
            let child = &mut self.children[i];
            let accepts = child.visible
                && child
                    .widget
                    .as_focus_receiver()
                    .is_some_and(|f| f.accepts_tab_focus());
            if accepts {
                let id = child.id;
                return self.focus(Some(id), cx);
            }
        }
        false
    }

    /// Route an event into the tree. Returns `true` if something consumed it.
    pub fn handle_event(&mut self, event: &InputEvent, cx: &mut EventCx<'_>) -> bool {
        match event {
            InputEvent::Pointer(ev) => {
                if self.overlay_pointer_inner(ev, cx) == OverlayRoute::Consumed {
                    if matches!(ev, PointerEvent::Released { .. }) {
                        self.release_pressed(cx);
                    }
                    return true;
                }
                self.dispatch_pointer(ev, cx)
            }
            InputEvent::Key(ev) => {
                if ev.key == Key::Escape && self.close_active_overlay(cx) {
                    return true;
                }
                if self.key_inner(ev, cx) {
                    return true;
                }
                if ev.key == Key::Tab {
                    return self.focus_next(ev.modifiers.shift(), cx);
                }
                false
            }
            InputEvent::Text(ch) => self.text_inner(*ch, cx),
        }
    }

    /// Advance every child's timers. Returns `true` if any needs a redraw.
    pub fn update_all(&mut self, elapsed: Duration) -> bool {
        let mut redraw = false;
        for child in &mut self.children {
            redraw |= child.widget.update(elapsed);
        }
        redraw
    }

    /// Draw the children, then the active overlay above them.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.draw_children(renderer);
        self.draw_overlay_inner(renderer);
    }

    fn draw_children(&self, renderer: &mut dyn Renderer) {
        for child in self.children.iter().filter(|c| c.visible) {
            renderer.push_offset(child.origin.to_vec2());
            child.widget.draw(renderer);
            renderer.pop_offset();
        }
    }

    fn draw_overlay_inner(&self, renderer: &mut dyn Renderer) {
        let Some(child) = self.overlay.active().and_then(|id| self.child(id)) else {
            return;
        };
        if let Some(host) = child.widget.as_overlay_host_ref() {
            renderer.push_offset(child.origin.to_vec2());
            host.draw_overlay(renderer);
            renderer.pop_offset();
        }
    }

    /// Forcibly dismiss the active overlay. Returns `true` if there was one.
    pub fn close_active_overlay(&mut self, cx: &mut EventCx<'_>) -> bool {
        let Some(owner) = self.overlay.clear() else {
            return false;
        };
        self.with_child(owner, cx, |w, cx| {
            if let Some(host) = w.as_overlay_host() {
                host.overlay_closed(cx);
            }
        });
        cx.close_overlay();
        true
    }

    fn overlay_pointer_inner(&mut self, ev: &PointerEvent, cx: &mut EventCx<'_>) -> OverlayRoute {
        let Some(owner) = self.overlay.active() else {
            return OverlayRoute::PassThrough;
        };
        let local = self.to_child(owner, ev);
        let route = self
            .with_child(owner, cx, |w, cx| {
                w.as_overlay_host()
                    .map(|host| host.overlay_pointer(&local, cx))
            })
            .flatten()
            .unwrap_or(OverlayRoute::PassThrough);
        #[cfg(feature = "tracing")]
        tracing::trace!(owner = owner.get(), ?route, "overlay routing");
        route
    }

    fn dispatch_pointer(&mut self, ev: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        let pos = ev.pos();
        match *ev {
            PointerEvent::Pressed { .. } => {
                let target = self.widget_at(pos);
                self.update_hover(target, cx);
                self.pressed = target;
                let focusable = match target {
                    Some(id) if self.is_focusable(id) => Some(id),
                    _ => None,
                };
                self.focus(focusable, cx);
                target.is_some_and(|id| self.deliver(id, ev, cx))
            }
            PointerEvent::Released { .. } => {
                let target = self.widget_at(pos);
                let handled = target.is_some_and(|id| self.deliver(id, ev, cx));
                self.release_pressed(cx);
                handled
            }
            PointerEvent::Moved { .. } => {
                let target = self.widget_at(pos);
                self.update_hover(target, cx);
                match self.pressed.or(target) {
                    Some(id) => self.deliver(id, ev, cx),
                    None => false,
                }
            }
            PointerEvent::Wheel { .. } => {
                let target = self.widget_at(pos);
                target.is_some_and(|id| self.deliver(id, ev, cx))
            }
        }
    }

    fn release_pressed(&mut self, cx: &mut EventCx<'_>) {
        if let Some(pressed) = self.pressed.take() {
            self.with_child(pressed, cx, |w, cx| w.button_no_longer_down(cx));
        }
    }

    fn update_hover(&mut self, target: Option<WidgetId>, cx: &mut EventCx<'_>) {
        if self.hovered == target {
            return;
        }
        if let Some(prev) = self.hovered {
            self.with_child(prev, cx, |w, cx| w.pointer_left(cx));
        }
        self.hovered = target;
    }

    fn deliver(&mut self, id: WidgetId, ev: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        let local = self.to_child(id, ev);
        self.with_child(id, cx, |w, cx| w.pointer(&local, cx))
            .unwrap_or(false)
    }

    fn to_child(&self, id: WidgetId, ev: &PointerEvent) -> PointerEvent {
        let origin = self.child(id).map_or(Point::ZERO, |c| c.origin);
        ev.translated(Point::ZERO - origin)
    }

    fn is_focusable(&mut self, id: WidgetId) -> bool {
        self.index_of(id)
            .is_some_and(|i| self.children[i].widget.as_focus_receiver().is_some())
    }

    fn key_inner(&mut self, ev: &KeyEvent, cx: &mut EventCx<'_>) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        self.with_child(id, cx, |w, cx| {
            w.as_key_handler().is_some_and(|k| k.key_pressed(ev, cx))
        })
        .unwrap_or(false)
    }

    fn text_inner(&mut self, ch: char, cx: &mut EventCx<'_>) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        self.with_child(id, cx, |w, cx| {
            w.as_key_handler().is_some_and(|k| k.text_entered(ch, cx))
        })
        .unwrap_or(false)
    }

    // Run `f` on a child with a context whose origin is the child's window position, then
    // apply the overlay and redraw requests it made.
    fn with_child<R>(
        &mut self,
        id: WidgetId,
        cx: &mut EventCx<'_>,
        f: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> R,
    ) -> Option<R> {
        let index = self.index_of(id)?;
        let child = &mut self.children[index];
        let mut child_cx = cx.for_child(child.origin.to_vec2());
        let result = f(child.widget.as_mut(), &mut child_cx);
        let requests = child_cx.take_requests();
        self.apply_requests(id, requests, cx);
        Some(result)
    }

    fn apply_requests(&mut self, id: WidgetId, requests: Requests, cx: &mut EventCx<'_>) {
        if requests.redraw {
            cx.request_redraw();
        }
        match requests.overlay {
            Some(OverlayRequest::Open) => {
                if let Some(prev) = self.overlay.activate(id) {
                    self.with_child(prev, cx, |w, cx| {
                        if let Some(host) = w.as_overlay_host() {
                            host.overlay_closed(cx);
                        }
                    });
                }
                cx.open_overlay();
            }
            Some(OverlayRequest::Close) => {
                if self.overlay.clear_if(id) {
                    cx.close_overlay();
                }
            }
            None => {}
        }
    }

    fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    fn child(&self, id: WidgetId) -> Option<&Child> {
        self.children.iter().find(|c| c.id == id)
    }
}

impl Drawable for Container {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.draw_children(renderer);
    }
}

impl HitTestable for Container {
    fn size(&self) -> Size {
        self.size
    }
}

impl Widget for Container {
    fn pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        self.dispatch_pointer(event, cx)
    }

    fn pointer_left(&mut self, cx: &mut EventCx<'_>) {
        self.update_hover(None, cx);
    }

    fn button_no_longer_down(&mut self, cx: &mut EventCx<'_>) {
        self.release_pressed(cx);
    }

    fn update(&mut self, elapsed: Duration) -> bool {
        self.update_all(elapsed)
    }

    fn as_focus_receiver(&mut self) -> Option<&mut dyn FocusReceiver> {
        Some(self)
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }

    fn as_overlay_host(&mut self) -> Option<&mut dyn OverlayHost> {
        Some(self)
    }

    fn as_overlay_host_ref(&self) -> Option<&dyn OverlayHost> {
        Some(self)
    }
}

impl FocusReceiver for Container {
    fn set_focused(&mut self, focused: bool, cx: &mut EventCx<'_>) {
        if !focused {
            self.focus(None, cx);
        }
    }

    fn is_focused(&self) -> bool {
        self.focused.is_some()
    }

    fn accepts_tab_focus(&self) -> bool {
        false
    }
}

impl KeyHandler for Container {
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut EventCx<'_>) -> bool {
        self.key_inner(event, cx)
    }

    fn text_entered(&mut self, ch: char, cx: &mut EventCx<'_>) -> bool {
        self.text_inner(ch, cx)
    }
}

// A nested container re-exports its child's overlay so the root router sees it.
impl OverlayHost for Container {
    fn overlay_pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> OverlayRoute {
        self.overlay_pointer_inner(event, cx)
    }

    fn draw_overlay(&self, renderer: &mut dyn Renderer) {
        self.draw_overlay_inner(renderer);
    }

    fn overlay_closed(&mut self, cx: &mut EventCx<'_>) {
        if let Some(owner) = self.overlay.clear() {
            self.with_child(owner, cx, |w, cx| {
                if let Some(host) = w.as_overlay_host() {
                    host.overlay_closed(cx);
                }
            });
        }
    }
}
