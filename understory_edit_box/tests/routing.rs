// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit boxes driven through a container, with time advanced by the host.

use core::time::Duration;

use kurbo::{Point, Size};
use understory_edit_box::EditBox;
use understory_widget::{
    Container, EventCx, InputEvent, Key, KeyEvent, MemoryClipboard, MouseButton, PointerEvent,
    Theme, WidgetId,
};

struct Window {
    root: Container,
    clipboard: MemoryClipboard,
    field: WidgetId,
    other: WidgetId,
}

impl Window {
    fn new() -> Self {
        let theme = Theme::default();
        let mut root = Container::new(Size::new(400.0, 100.0));
        let mut field = EditBox::new(&theme);
        field.set_text("hello");
        let field = root.add(field, Point::new(10.0, 10.0));
        let other = root.add(EditBox::new(&theme), Point::new(10.0, 50.0));
        Self {
            root,
            clipboard: MemoryClipboard::new(),
            field,
            other,
        }
    }

    fn send(&mut self, event: InputEvent) -> bool {
        let mut cx = EventCx::new(&mut self.clipboard, Size::new(400.0, 100.0));
        self.root.handle_event(&event, &mut cx)
    }

    fn click(&mut self, x: f64, y: f64) {
        let pos = Point::new(x, y);
        let button = MouseButton::Left;
        self.send(InputEvent::Pointer(PointerEvent::Pressed { pos, button }));
        self.send(InputEvent::Pointer(PointerEvent::Released { pos, button }));
    }

    fn field(&self) -> &EditBox {
        self.root.get::<EditBox>(self.field).unwrap()
    }
}

#[test]
fn double_click_within_window_selects_everything() {
    let mut w = Window::new();
    w.click(27.0, 20.0);
    assert_eq!(w.field().caret_position(), 2);
    w.root.update_all(Duration::from_millis(300));
    w.click(27.0, 20.0);
    assert_eq!(w.field().selected_text(), "hello");
}

#[test]
fn double_click_after_window_only_places_caret() {
    let mut w = Window::new();
    w.click(27.0, 20.0);
    w.root.update_all(Duration::from_millis(600));
    w.click(27.0, 20.0);
    assert_eq!(w.field().selected_text(), "");
    assert_eq!(w.field().caret_position(), 2);
}

#[test]
fn tab_moves_focus_and_unfocus_collapses_selection() {
    let mut w = Window::new();
    w.click(27.0, 20.0);
    assert_eq!(w.root.focused(), Some(w.field));
    w.send(InputEvent::Key(KeyEvent::with_modifiers(
        Key::Char('a'),
        understory_widget::Modifiers::CONTROL,
    )));
    assert_eq!(w.field().selected_text(), "hello");

    assert!(w.send(InputEvent::Key(KeyEvent::new(Key::Tab))));
    assert_eq!(w.root.focused(), Some(w.other));
    assert_eq!(w.field().selected_text(), "");
    assert_eq!(w.field().caret_position(), 5);

    w.send(InputEvent::Text('x'));
    assert_eq!(w.root.get::<EditBox>(w.other).unwrap().text(), "x");
    assert_eq!(w.field().text(), "hello");
}
