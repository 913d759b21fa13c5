// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, keyboard, focus, timing, and drawing for [`EditBox`].

use core::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_text::text_width;
use understory_widget::{
    Drawable, EventCx, FocusReceiver, HitTestable, Key, KeyEvent, KeyHandler, MouseButton,
    PointerEvent, Renderer, Widget,
};

use crate::edit_box::EditBox;

impl EditBox {
    fn left_pressed(&mut self, pos: Point) {
        self.mouse_down = true;
        let x = pos.x - self.theme.padding;
        let offset = self.text_offset();
        let len = self.model.len();
        let mut caret = self.index_at(pos.x);
        if x < offset && caret > 0 {
            caret -= 1;
        } else if x > self.visible_width() - offset && caret < len {
            caret += 1;
        }

        if self.double_click.is_armed_with(&caret)
            && !self.model.has_selection()
            && caret == self.model.caret()
        {
            self.double_click.cancel();
            self.model.select_all();
        } else {
            self.model.set_caret(caret);
            self.double_click.arm(caret);
        }
        self.update_selection();
        self.blink.reset();
    }

    fn pointer_moved(&mut self, pos: Point) -> bool {
        self.double_click.cancel();
        self.hovered = true;
        if !self.mouse_down {
            return false;
        }
        let before = self.model.caret();
        if !self.is_text_width_limited() {
            let padding = self.theme.padding;
            let offset = self.text_offset();
            let step = f64::from((self.text_size() / 10).max(1));
            if pos.x < padding + offset {
                self.crop.scroll_by(-step, self.content_width());
            } else if pos.x > padding + self.visible_width() - offset
                && self.full_text_width() > self.visible_width()
            {
                self.crop.scroll_by(step, self.content_width());
            }
        }
        let target = self.index_at(pos.x);
        self.model.move_caret(target, true);
        if self.model.caret() != before {
            self.update_selection();
        }
        true
    }

    fn move_caret_to(&mut self, pos: usize, extend: bool) {
        self.model.move_caret(pos, extend);
        self.update_selection();
    }

    fn arrow_left(&mut self, extend: bool) {
        let pos = if self.model.has_selection() && !extend {
            self.model.selection_range().start
        } else {
            self.model.caret().saturating_sub(1)
        };
        self.move_caret_to(pos, extend);
    }

    fn arrow_right(&mut self, extend: bool) {
        let pos = if self.model.has_selection() && !extend {
            self.model.selection_range().end
        } else {
            self.model.caret() + 1
        };
        self.move_caret_to(pos, extend);
    }

    fn submit(&mut self) {
        let text = self.text();
        self.on_return_key_press.emit(&text);
        self.on_return_or_unfocus.emit(&text);
    }
}

impl Drawable for EditBox {
    fn draw(&self, renderer: &mut dyn Renderer) {
        let colors = &self.theme.colors;
        let style = self.style();
        let padding = self.theme.padding;
        let inner = Rect::new(
            padding,
            padding,
            self.size.width - padding,
            self.size.height - padding,
        );
        renderer.fill_rect(self.size.to_rect(), colors.background);

        let mut suffix_space = 0.0;
        if !self.suffix.is_empty() {
            let suffix: Vec<char> = self.suffix.chars().collect();
            let width = text_width(&*self.theme.metrics, &suffix, style);
            let offset = self.text_offset();
            renderer.push_clip(inner);
            renderer.draw_text(
                Point::new(inner.x1 - offset - width, self.text_y()),
                &self.suffix,
                style,
                colors.text,
            );
            renderer.pop_clip();
            suffix_space = width + offset;
        }

        renderer.push_clip(Rect::new(inner.x0, inner.y0, inner.x1 - suffix_space, inner.y1));
        if self.model.is_empty() {
            if !self.default_text.is_empty() {
                let origin = Point::new(self.text_x(), self.text_y());
                renderer.draw_text(origin, &self.default_text, style, colors.default_text);
            }
        } else {
            let runs = self.text_runs();
            if !runs.before.text.is_empty() {
                renderer.draw_text(runs.before.origin, &runs.before.text, style, colors.text);
            }
            if let Some(background) = runs.selection_background {
                renderer.fill_rect(background, colors.selected_text_background);
                renderer.draw_text(
                    runs.selection.origin,
                    &runs.selection.text,
                    style,
                    colors.selected_text,
                );
                if !runs.after.text.is_empty() {
                    renderer.draw_text(runs.after.origin, &runs.after.text, style, colors.text);
                }
            }
        }
        renderer.pop_clip();

        if self.focused && self.blink.is_visible() {
            renderer.fill_rect(self.caret_rect(), colors.caret);
        }
    }
}

impl HitTestable for EditBox {
    fn size(&self) -> Size {
        self.size
    }
}

impl Widget for EditBox {
    fn pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        match *event {
            PointerEvent::Pressed {
                pos,
                button: MouseButton::Left,
            } => {
                self.left_pressed(pos);
                cx.request_redraw();
                true
            }
            PointerEvent::Pressed { .. } | PointerEvent::Released { .. } => true,
            PointerEvent::Moved { pos } => {
                if self.pointer_moved(pos) {
                    cx.request_redraw();
                }
                true
            }
            PointerEvent::Wheel { .. } => false,
        }
    }

    fn pointer_left(&mut self, _: &mut EventCx<'_>) {
        self.hovered = false;
    }

    fn button_no_longer_down(&mut self, _: &mut EventCx<'_>) {
        self.mouse_down = false;
    }

    fn update(&mut self, elapsed: Duration) -> bool {
        self.double_click.advance(elapsed);
        self.focused && self.blink.advance(elapsed)
    }

    fn as_focus_receiver(&mut self) -> Option<&mut dyn FocusReceiver> {
        Some(self)
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }
}

impl FocusReceiver for EditBox {
    fn set_focused(&mut self, focused: bool, cx: &mut EventCx<'_>) {
        if focused {
            self.blink.reset();
        } else {
            if self.model.has_selection() {
                self.model.set_caret(self.model.sel_end());
                self.update_selection();
            }
            if self.focused {
                let text = self.text();
                self.on_return_or_unfocus.emit(&text);
            }
        }
        self.focused = focused;
        cx.request_redraw();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl KeyHandler for EditBox {
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut EventCx<'_>) -> bool {
        let extend = event.modifiers.shift();
        let word = event.modifiers.command();
        let handled = match event.key {
            Key::Enter => {
                self.submit();
                true
            }
            Key::Backspace => {
                self.backspace();
                true
            }
            Key::Delete => {
                self.delete();
                true
            }
            _ if event.is_shortcut('c') => {
                self.copy(cx.clipboard());
                true
            }
            _ if event.is_shortcut('x') => {
                self.cut(cx.clipboard());
                true
            }
            _ if event.is_shortcut('v') => {
                self.paste(cx.clipboard());
                true
            }
            _ if event.is_shortcut('a') => {
                self.model.select_all();
                self.update_selection();
                true
            }
            Key::Left if word => {
                self.model.move_word_start(extend);
                self.update_selection();
                true
            }
            Key::Right if word => {
                self.model.move_word_end(extend);
                self.update_selection();
                true
            }
            Key::Left => {
                self.arrow_left(extend);
                true
            }
            Key::Right => {
                self.arrow_right(extend);
                true
            }
            Key::Home | Key::Up | Key::PageUp => {
                self.move_caret_to(0, extend);
                true
            }
            Key::End | Key::Down | Key::PageDown => {
                self.move_caret_to(self.model.len(), extend);
                true
            }
            _ => false,
        };
        if handled {
            self.blink.reset();
            cx.request_redraw();
        }
        handled
    }

    fn text_entered(&mut self, ch: char, cx: &mut EventCx<'_>) -> bool {
        if self.insert_char(ch) {
            cx.request_redraw();
        }
        !self.read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use understory_widget::{
        Clipboard, Container, DrawCommand, InputEvent, MemoryClipboard, Modifiers,
        RecordingRenderer, Theme,
    };

    fn press(x: f64) -> PointerEvent {
        PointerEvent::Pressed {
            pos: Point::new(x, 10.0),
            button: MouseButton::Left,
        }
    }

    fn release(x: f64) -> PointerEvent {
        PointerEvent::Released {
            pos: Point::new(x, 10.0),
            button: MouseButton::Left,
        }
    }

    fn key(k: Key) -> KeyEvent {
        KeyEvent::new(k)
    }

    fn ctrl(k: Key) -> KeyEvent {
        KeyEvent::with_modifiers(k, Modifiers::CONTROL)
    }

    fn shift(k: Key) -> KeyEvent {
        KeyEvent::with_modifiers(k, Modifiers::SHIFT)
    }

    struct Harness {
        clipboard: MemoryClipboard,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                clipboard: MemoryClipboard::new(),
            }
        }

        fn pointer(&mut self, eb: &mut EditBox, ev: PointerEvent) {
            let mut cx = EventCx::new(&mut self.clipboard, Size::new(800.0, 600.0));
            eb.pointer(&ev, &mut cx);
            if matches!(ev, PointerEvent::Released { .. }) {
                eb.button_no_longer_down(&mut cx);
            }
        }

        fn key(&mut self, eb: &mut EditBox, ev: KeyEvent) -> bool {
            let mut cx = EventCx::new(&mut self.clipboard, Size::new(800.0, 600.0));
            eb.key_pressed(&ev, &mut cx)
        }

        fn focus(&mut self, eb: &mut EditBox, focused: bool) {
            let mut cx = EventCx::new(&mut self.clipboard, Size::new(800.0, 600.0));
            eb.set_focused(focused, &mut cx);
        }
    }

    fn edit_box(text: &str) -> EditBox {
        let mut eb = EditBox::new(&Theme::default());
        eb.set_text(text);
        eb
    }

    // Monospace metrics at size 13: 6.5 px glyphs, 2 px padding, 1.625 px text offset.
    // Local x = 17 lands between "he" and "llo".
    const BETWEEN_2_AND_3: f64 = 17.0;

    #[test]
    fn double_click_inside_window_selects_all() {
        let mut h = Harness::new();
        let mut eb = edit_box("hello");
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        h.pointer(&mut eb, release(BETWEEN_2_AND_3));
        assert_eq!(eb.caret_position(), 2);
        eb.update(Duration::from_millis(200));
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        assert_eq!(eb.selected_text(), "hello");
    }

    #[test]
    fn slow_second_click_only_moves_caret() {
        let mut h = Harness::new();
        let mut eb = edit_box("hello");
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        h.pointer(&mut eb, release(BETWEEN_2_AND_3));
        eb.update(Duration::from_millis(600));
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        assert!(!eb.selection().has_selection());
        assert_eq!(eb.caret_position(), 2);
    }

    #[test]
    fn moving_between_clicks_cancels_double_click() {
        let mut h = Harness::new();
        let mut eb = edit_box("hello");
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        h.pointer(&mut eb, release(BETWEEN_2_AND_3));
        h.pointer(
            &mut eb,
            PointerEvent::Moved {
                pos: Point::new(BETWEEN_2_AND_3, 11.0),
            },
        );
        h.pointer(&mut eb, press(BETWEEN_2_AND_3));
        assert!(!eb.selection().has_selection());
    }

    #[test]
    fn drag_selects_and_scrolls_past_right_edge() {
        let mut h = Harness::new();
        let mut eb = edit_box(&"m".repeat(40));
        eb.set_caret_position(0);
        h.pointer(&mut eb, press(50.0));
        assert_eq!(eb.caret_position(), 7);
        h.pointer(
            &mut eb,
            PointerEvent::Moved {
                pos: Point::new(170.0, 10.0),
            },
        );
        assert!(eb.crop_offset() > 0.0);
        assert_eq!(eb.selection().selection_range(), 7..26);
        h.pointer(&mut eb, release(170.0));
        h.pointer(
            &mut eb,
            PointerEvent::Moved {
                pos: Point::new(10.0, 10.0),
            },
        );
        assert_eq!(eb.selection().selection_range(), 7..26, "released, no drag");
    }

    #[test]
    fn arrows_collapse_selection_before_moving() {
        let mut h = Harness::new();
        let mut eb = edit_box("abcdef");
        eb.select_text(2, Some(2));
        h.key(&mut eb, key(Key::Left));
        assert_eq!(eb.caret_position(), 2);
        assert!(!eb.selection().has_selection());
        eb.select_text(2, Some(2));
        h.key(&mut eb, key(Key::Right));
        assert_eq!(eb.caret_position(), 4);
        h.key(&mut eb, key(Key::Right));
        assert_eq!(eb.caret_position(), 5);
        h.key(&mut eb, shift(Key::Home));
        assert_eq!(eb.selected_text(), "abcde");
        h.key(&mut eb, key(Key::End));
        assert_eq!(eb.caret_position(), 6);
        assert!(!eb.selection().has_selection());
    }

    #[test]
    fn ctrl_arrows_move_by_word() {
        let mut h = Harness::new();
        let mut eb = edit_box("foo bar baz");
        assert_eq!(eb.caret_position(), 11);
        h.key(&mut eb, ctrl(Key::Left));
        assert_eq!(eb.caret_position(), 8);
        h.key(&mut eb, ctrl(Key::Left));
        assert_eq!(eb.caret_position(), 4);
        h.key(&mut eb, ctrl(Key::Right));
        assert_eq!(eb.caret_position(), 7);
    }

    #[test]
    fn clipboard_shortcuts() {
        let mut h = Harness::new();
        let mut eb = edit_box("copy me");
        h.key(&mut eb, ctrl(Key::Char('a')));
        h.key(&mut eb, ctrl(Key::Char('x')));
        assert_eq!(eb.text(), "");
        assert_eq!(h.clipboard.get_text(), "copy me");
        h.key(&mut eb, ctrl(Key::Char('v')));
        h.key(&mut eb, ctrl(Key::Char('v')));
        assert_eq!(eb.text(), "copy mecopy me");

        let system = |ch| KeyEvent::with_modifiers(Key::Char(ch), Modifiers::SYSTEM);
        eb.set_text("mac");
        h.clipboard.set_text("");
        h.key(&mut eb, system('a'));
        h.key(&mut eb, system('c'));
        assert_eq!(h.clipboard.get_text(), "mac");
        assert_eq!(eb.text(), "mac");
    }

    #[test]
    fn enter_and_unfocus_notify() {
        let mut h = Harness::new();
        let mut eb = edit_box("x");
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = log.clone();
        eb.on_return_key_press().connect(move |t| a.borrow_mut().push(format!("return {t}")));
        let b = log.clone();
        eb.on_return_or_unfocus().connect(move |t| b.borrow_mut().push(format!("either {t}")));

        h.focus(&mut eb, true);
        assert!(h.key(&mut eb, key(Key::Enter)));
        eb.select_text(0, None);
        h.focus(&mut eb, false);
        assert!(!eb.selection().has_selection(), "unfocus collapses the selection");
        assert_eq!(eb.text(), "x", "but does not delete it");
        assert_eq!(*log.borrow(), ["return x", "either x", "either x"]);
    }

    #[test]
    fn caret_blinks_only_while_focused() {
        let mut h = Harness::new();
        let mut eb = edit_box("x");
        assert!(!eb.update(Duration::from_millis(600)));
        h.focus(&mut eb, true);
        assert!(eb.update(Duration::from_millis(500)));
        let mut r = RecordingRenderer::new();
        eb.draw(&mut r);
        let caret = eb.caret_rect();
        assert!(
            !r.commands().iter().any(|c| matches!(c, DrawCommand::FillRect { rect, .. } if *rect == caret)),
            "caret hidden after one blink"
        );
        h.key(&mut eb, key(Key::Home));
        r.clear();
        eb.draw(&mut r);
        let caret = eb.caret_rect();
        assert!(
            r.commands().iter().any(|c| matches!(c, DrawCommand::FillRect { rect, .. } if *rect == caret)),
            "key press shows the caret again"
        );
    }

    #[test]
    fn draw_emits_runs_and_placeholder() {
        let mut eb = edit_box("");
        eb.set_default_text("Search");
        let mut r = RecordingRenderer::new();
        eb.draw(&mut r);
        assert_eq!(r.texts().collect::<Vec<_>>(), ["Search"]);

        eb.set_text("abcd");
        eb.select_text(1, Some(2));
        r.clear();
        eb.draw(&mut r);
        assert_eq!(r.texts().collect::<Vec<_>>(), ["a", "bc", "d"]);
    }

    #[test]
    fn container_routes_text_to_focused_box() {
        let theme = Theme::default();
        let mut root = Container::new(Size::new(400.0, 100.0));
        let id = root.add(EditBox::new(&theme), Point::new(10.0, 10.0));
        let mut clip = MemoryClipboard::new();
        let mut cx = EventCx::new(&mut clip, Size::new(400.0, 100.0));
        let click = PointerEvent::Pressed {
            pos: Point::new(20.0, 20.0),
            button: MouseButton::Left,
        };
        root.handle_event(&InputEvent::Pointer(click), &mut cx);
        for ch in "hi".chars() {
            root.handle_event(&InputEvent::Text(ch), &mut cx);
        }
        assert_eq!(root.get::<EditBox>(id).unwrap().text(), "hi");
    }
}
