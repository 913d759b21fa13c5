// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, keyboard, timing, and drawing for [`TreeView`].

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size, Vec2};
use understory_event_state::tolerance::WheelOutcome;
use understory_widget::{
    Drawable, EventCx, FocusReceiver, HitTestable, Key, KeyEvent, KeyHandler, Modifiers,
    MouseButton, PointerEvent, Renderer, Widget,
};

use crate::tree_view::TreeView;

impl TreeView {
    fn left_pressed(&mut self, pos: Point) -> bool {
        if self.vertical.is_shown() && self.vertical_track().contains(pos) {
            let track = self.vertical_track();
            return self.vertical.press(track, pos);
        }
        if self.horizontal.is_shown() && self.horizontal_track().contains(pos) {
            let track = self.horizontal_track();
            return self.horizontal.press(track, pos);
        }
        self.mouse_down = true;
        let before = self.selected;
        self.select_index(self.row_at(pos));
        before != self.selected
    }

    fn left_released(&mut self, pos: Point) -> bool {
        self.vertical.release();
        self.horizontal.release();
        if !core::mem::take(&mut self.mouse_down) {
            return false;
        }
        let Some(index) = self.row_at(pos).filter(|&i| Some(i) == self.selected_index()) else {
            self.double_click.cancel();
            return false;
        };

        if self.icon_rect(index).is_some_and(|r| r.contains(pos)) && self.toggle(index) {
            self.double_click.cancel();
            return true;
        }

        if self.double_click.is_armed_with(&index) {
            self.double_click.cancel();
            if self.node_at(index).is_some_and(|id| self.items.is_leaf(id)) {
                let path = self.path_at(index);
                self.on_double_click.emit(&path);
                false
            } else {
                self.toggle(index)
            }
        } else {
            self.double_click.arm(index);
            false
        }
    }

    fn right_pressed(&mut self, pos: Point) -> bool {
        let Some(index) = self.row_at(pos) else {
            return false;
        };
        self.select_index(Some(index));
        let path = self.path_at(index);
        self.on_right_click.emit(&path);
        true
    }

    fn pointer_moved(&mut self, pos: Point) -> bool {
        self.double_click.cancel();
        if self.vertical.is_dragging() {
            let track = self.vertical_track();
            return self.vertical.drag_to(track, pos);
        }
        if self.horizontal.is_dragging() {
            let track = self.horizontal_track();
            return self.horizontal.drag_to(track, pos);
        }
        self.update_hover(pos)
    }

    fn update_hover(&mut self, pos: Point) -> bool {
        let hovered = self.row_at(pos);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    // `None` when the wheel event should bubble.
    fn wheel(&mut self, pos: Point, delta: f64, modifiers: Modifiers) -> Option<bool> {
        let horizontal = self.horizontal.is_shown()
            && (!self.vertical.is_shown()
                || modifiers.shift()
                || self.horizontal_track().contains(pos));
        let moved = if horizontal {
            self.horizontal.wheel(delta)
        } else if self.vertical.is_shown() {
            self.vertical.wheel(delta)
        } else {
            return None;
        };
        match self.tolerance.on_wheel(moved) {
            WheelOutcome::Consumed => {
                if moved {
                    self.update_hover(pos);
                }
                Some(moved)
            }
            WheelOutcome::Bubble => None,
        }
    }

    fn key_left(&mut self, index: usize) {
        let Some(id) = self.node_at(index) else {
            return;
        };
        if !self.items.is_leaf(id) && self.items.is_expanded(id) {
            self.toggle(index);
            return;
        }
        let target = self
            .items
            .parent_of(id)
            .or_else(|| self.items.prev_sibling(id));
        if let Some(target) = target
            && let Some(row) = self.items.visible_index_of(target)
        {
            self.select_and_reveal(row);
        }
    }

    fn key_right(&mut self, index: usize) {
        let Some(id) = self.node_at(index) else {
            return;
        };
        if !self.items.is_leaf(id) && !self.items.is_expanded(id) {
            self.toggle(index);
        } else if index + 1 < self.rows.len() {
            self.select_and_reveal(index + 1);
        }
    }

    fn draw_branch_icon(&self, renderer: &mut dyn Renderer, index: usize, rect: Rect) {
        let h = self.theme.item_height;
        let line = (h / 10.0).round().max(1.0);
        let selected = self.selected_index() == Some(index);
        let color = if selected {
            self.theme.colors.selected_text
        } else {
            self.theme.colors.text
        };
        let cy = rect.y0 + ((rect.height() - line) / 2.0).floor();
        renderer.fill_rect(Rect::new(rect.x0, cy, rect.x1, cy + line), color);
        let collapsed = self.node_at(index).is_some_and(|id| !self.items.is_expanded(id));
        if collapsed {
            let cx = rect.x0 + ((rect.width() - line) / 2.0).floor();
            renderer.fill_rect(Rect::new(cx, rect.y0, cx + line, rect.y1), color);
        }
    }
}

impl Drawable for TreeView {
    fn draw(&self, renderer: &mut dyn Renderer) {
        let colors = &self.theme.colors;
        renderer.fill_rect(self.size.to_rect(), colors.background);

        let area = self.item_area();
        let h = self.theme.item_height;
        let icon = self.icon_size();
        let style = self.style();
        let line_height = self.theme.metrics.line_height(style);
        let scroll = f64::from(self.vertical.value());

        renderer.push_clip(area);
        renderer.push_offset(Vec2::new(
            area.x0 - f64::from(self.horizontal.value()),
            area.y0 - scroll,
        ));
        let row_width = self.max_right.max(area.width() + f64::from(self.horizontal.value()));
        let nodes = self.items.visible_nodes();
        for index in self.rows.visible_range(scroll, area.height()) {
            let Some(&id) = nodes.get(index) else {
                continue;
            };
            let top = self.rows.row_top(index, 0.0);
            let row = Rect::new(0.0, top, row_width, top + h);
            let selected = self.selected_index() == Some(index);
            if selected {
                renderer.fill_rect(row, colors.selected_background);
            } else if self.hovered == Some(index) {
                renderer.fill_rect(row, colors.background_hover);
            }

            let depth = self.items.depth(id).unwrap_or(0);
            if !self.items.is_leaf(id) {
                let x = self.icon_x(depth);
                let y = top + (h - icon) / 2.0;
                self.draw_branch_icon(renderer, index, Rect::new(x, y, x + icon, y + icon));
            }
            let color = if selected {
                colors.selected_text
            } else {
                colors.text
            };
            renderer.draw_text(
                Point::new(self.text_x(depth), top + (h - line_height) / 2.0),
                self.items.label(id).unwrap_or_default(),
                style,
                color,
            );
        }
        renderer.pop_offset();
        renderer.pop_clip();

        for (bar, track) in [
            (&self.vertical, self.vertical_track()),
            (&self.horizontal, self.horizontal_track()),
        ] {
            if bar.is_shown() {
                renderer.fill_rect(track, colors.scrollbar_track);
                renderer.fill_rect(bar.thumb_rect(track), colors.scrollbar_thumb);
            }
        }
    }
}

impl HitTestable for TreeView {
    fn size(&self) -> Size {
        self.size
    }
}

impl Widget for TreeView {
    fn pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        let redraw = match *event {
            PointerEvent::Pressed {
                pos,
                button: MouseButton::Left,
            } => self.left_pressed(pos),
            PointerEvent::Pressed {
                pos,
                button: MouseButton::Right,
            } => self.right_pressed(pos),
            PointerEvent::Released {
                pos,
                button: MouseButton::Left,
            } => self.left_released(pos),
            PointerEvent::Pressed { .. } | PointerEvent::Released { .. } => false,
            PointerEvent::Moved { pos } => self.pointer_moved(pos),
            PointerEvent::Wheel {
                pos,
                delta,
                modifiers,
            } => match self.wheel(pos, delta, modifiers) {
                Some(moved) => moved,
                None => return false,
            },
        };
        if redraw {
            cx.request_redraw();
        }
        true
    }

    fn pointer_left(&mut self, cx: &mut EventCx<'_>) {
        self.double_click.cancel();
        if self.hovered.take().is_some() {
            cx.request_redraw();
        }
    }

    fn button_no_longer_down(&mut self, _: &mut EventCx<'_>) {
        self.mouse_down = false;
        self.vertical.release();
        self.horizontal.release();
    }

    fn update(&mut self, elapsed: Duration) -> bool {
        self.double_click.advance(elapsed);
        self.tolerance.advance(elapsed);
        false
    }

    fn as_focus_receiver(&mut self) -> Option<&mut dyn FocusReceiver> {
        Some(self)
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }
}

impl FocusReceiver for TreeView {
    fn set_focused(&mut self, focused: bool, _: &mut EventCx<'_>) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl KeyHandler for TreeView {
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut EventCx<'_>) -> bool {
        if !matches!(event.key, Key::Up | Key::Down | Key::Left | Key::Right) {
            return false;
        }
        let Some(index) = self.selected_index() else {
            return true;
        };
        match event.key {
            Key::Up if index > 0 => self.select_and_reveal(index - 1),
            Key::Down if index + 1 < self.rows.len() => self.select_and_reveal(index + 1),
            Key::Left => self.key_left(index),
            Key::Right => self.key_right(index),
            _ => {}
        }
        cx.request_redraw();
        true
    }

    fn text_entered(&mut self, _: char, _: &mut EventCx<'_>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use understory_widget::{MemoryClipboard, RecordingRenderer, Theme};

    type Log = Rc<RefCell<Vec<(&'static str, Vec<String>)>>>;

    struct Harness {
        clipboard: MemoryClipboard,
        log: Log,
    }

    impl Harness {
        fn new(tree: &mut TreeView) -> Self {
            let log: Log = Rc::default();
            for (name, signal) in [
                ("select", &mut tree.on_item_select),
                ("double", &mut tree.on_double_click),
                ("expand", &mut tree.on_expand),
                ("collapse", &mut tree.on_collapse),
                ("right", &mut tree.on_right_click),
            ] {
                let sink = log.clone();
                signal.connect(move |p| sink.borrow_mut().push((name, p.clone())));
            }
            Self {
                clipboard: MemoryClipboard::new(),
                log,
            }
        }

        fn send(&mut self, tree: &mut TreeView, ev: PointerEvent) -> bool {
            let mut cx = EventCx::new(&mut self.clipboard, Size::new(800.0, 600.0));
            tree.pointer(&ev, &mut cx)
        }

        fn click(&mut self, tree: &mut TreeView, x: f64, y: f64) {
            let pos = Point::new(x, y);
            let button = MouseButton::Left;
            self.send(tree, PointerEvent::Pressed { pos, button });
            self.send(tree, PointerEvent::Released { pos, button });
        }

        fn key(&mut self, tree: &mut TreeView, key: Key) -> bool {
            let mut cx = EventCx::new(&mut self.clipboard, Size::new(800.0, 600.0));
            tree.key_pressed(&KeyEvent::new(key), &mut cx)
        }

        fn take(&self) -> Vec<(&'static str, Vec<String>)> {
            core::mem::take(&mut *self.log.borrow_mut())
        }
    }

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    // Rows are 20 px tall below 2 px of padding; labels start right of x = 20.
    fn row_y(index: usize) -> f64 {
        let index = u32::try_from(index).unwrap_or(0);
        12.0 + 20.0 * f64::from(index)
    }

    fn tree() -> TreeView {
        let mut tree = TreeView::new(&Theme::default());
        tree.add_item(&["A", "A1"], true);
        tree.add_item(&["B"], true);
        tree
    }

    #[test]
    fn click_selects_and_double_click_toggles_branch() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        h.click(&mut tree, 60.0, row_y(0));
        assert_eq!(h.take(), [("select", path(&["A"]))]);

        h.click(&mut tree, 60.0, row_y(0));
        assert_eq!(h.take(), [("collapse", path(&["A"]))]);
        assert_eq!(tree.visible_paths(), [path(&["A"]), path(&["B"])]);

        h.click(&mut tree, 60.0, row_y(1));
        h.click(&mut tree, 60.0, row_y(1));
        assert_eq!(
            h.take(),
            [("select", path(&["B"])), ("double", path(&["B"]))]
        );
    }

    #[test]
    fn slow_or_moved_second_click_is_not_a_double_click() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        h.click(&mut tree, 60.0, row_y(2));
        tree.update(Duration::from_millis(600));
        h.click(&mut tree, 60.0, row_y(2));
        h.click(&mut tree, 60.0, row_y(2));
        h.send(
            &mut tree,
            PointerEvent::Moved {
                pos: Point::new(61.0, row_y(2)),
            },
        );
        h.click(&mut tree, 61.0, row_y(2));
        assert_eq!(
            h.take(),
            [("select", path(&["B"])), ("double", path(&["B"]))],
            "only the pair inside the window and without movement counts"
        );
    }

    #[test]
    fn single_click_on_icon_toggles() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        let icon = tree.icon_rect(0).unwrap();
        h.click(&mut tree, icon.center().x, icon.center().y);
        assert_eq!(
            h.take(),
            [("select", path(&["A"])), ("collapse", path(&["A"]))]
        );
        h.click(&mut tree, icon.center().x, icon.center().y);
        assert_eq!(h.take(), [("expand", path(&["A"]))]);
    }

    #[test]
    fn click_below_rows_deselects() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        h.click(&mut tree, 60.0, row_y(1));
        h.click(&mut tree, 60.0, row_y(5));
        assert_eq!(
            h.take(),
            [("select", path(&["A", "A1"])), ("select", Vec::new())]
        );
        assert!(tree.selected_item().is_empty());
    }

    #[test]
    fn right_click_selects_and_reports() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        let pos = Point::new(60.0, row_y(2));
        h.send(
            &mut tree,
            PointerEvent::Pressed {
                pos,
                button: MouseButton::Right,
            },
        );
        assert_eq!(
            h.take(),
            [("select", path(&["B"])), ("right", path(&["B"]))]
        );
    }

    #[test]
    fn arrow_keys_walk_and_fold() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        assert!(h.key(&mut tree, Key::Down), "arrows are consumed without a selection");
        tree.select_item(&["A", "A1"]);
        h.take();

        h.key(&mut tree, Key::Left);
        assert_eq!(tree.selected_item(), ["A"]);
        h.key(&mut tree, Key::Left);
        h.key(&mut tree, Key::Right);
        h.key(&mut tree, Key::Right);
        assert_eq!(tree.selected_item(), ["A", "A1"]);
        h.key(&mut tree, Key::Down);
        assert_eq!(tree.selected_item(), ["B"]);
        h.key(&mut tree, Key::Left);
        assert_eq!(tree.selected_item(), ["A"], "root without children goes to previous root");
        assert_eq!(
            h.take(),
            [
                ("select", path(&["A"])),
                ("collapse", path(&["A"])),
                ("expand", path(&["A"])),
                ("select", path(&["A", "A1"])),
                ("select", path(&["B"])),
                ("select", path(&["A"])),
            ]
        );
        assert!(!h.key(&mut tree, Key::Enter));
    }

    #[test]
    fn keyboard_selection_scrolls_into_view() {
        let mut tree = TreeView::new(&Theme::default());
        tree.set_size(Size::new(200.0, 64.0));
        for i in 0..6 {
            tree.add_item(&[alloc::format!("row {i}")], false);
        }
        let mut h = Harness::new(&mut tree);
        tree.select_item(&["row 0"]);
        for _ in 0..4 {
            h.key(&mut tree, Key::Down);
        }
        assert_eq!(tree.selected_index(), Some(4));
        assert_eq!(tree.vertical_scrollbar_value(), 40);
        h.key(&mut tree, Key::Up);
        h.key(&mut tree, Key::Up);
        h.key(&mut tree, Key::Up);
        assert_eq!(tree.vertical_scrollbar_value(), 20);
    }

    #[test]
    fn stuck_wheel_bubbles_after_tolerance() {
        let mut tree = TreeView::new(&Theme::default());
        tree.set_size(Size::new(200.0, 64.0));
        for i in 0..6 {
            tree.add_item(&[alloc::format!("row {i}")], false);
        }
        let mut h = Harness::new(&mut tree);
        let wheel = |delta| PointerEvent::Wheel {
            pos: Point::new(50.0, 30.0),
            delta,
            modifiers: Modifiers::empty(),
        };
        assert!(!h.send(&mut tree, wheel(1.0)), "never scrolled, at the top");
        assert!(h.send(&mut tree, wheel(-1.0)));
        assert_eq!(tree.vertical_scrollbar_value(), 20);
        assert!(h.send(&mut tree, wheel(-5.0)));
        assert!(h.send(&mut tree, wheel(-1.0)), "stuck but within tolerance");
        tree.update(Duration::from_millis(1000));
        assert!(!h.send(&mut tree, wheel(-1.0)));
    }

    #[test]
    fn scrollbar_track_press_pages() {
        let mut tree = TreeView::new(&Theme::default());
        tree.set_size(Size::new(200.0, 64.0));
        for i in 0..6 {
            tree.add_item(&[alloc::format!("row {i}")], false);
        }
        let mut h = Harness::new(&mut tree);
        h.click(&mut tree, 192.0, 60.0);
        assert_eq!(tree.vertical_scrollbar_value(), 60);
        assert!(h.take().is_empty(), "track presses do not select");
    }

    #[test]
    fn draws_visible_labels_with_icons_for_branches() {
        let mut tree = tree();
        tree.select_item(&["B"]);
        let mut r = RecordingRenderer::new();
        tree.draw(&mut r);
        let texts: Vec<&str> = r.texts().collect();
        assert_eq!(texts, ["A", "A1", "B"]);

        let theme = Theme::default();
        let icon = tree.icon_rect(0).unwrap();
        let bars = r
            .commands()
            .iter()
            .filter(|c| {
                matches!(c, understory_widget::DrawCommand::FillRect { rect, color }
                    if *color == theme.colors.text && icon.contains(rect.origin()))
            })
            .count();
        assert_eq!(bars, 1, "expanded branch draws only the minus bar");
    }

    #[test]
    fn hover_tracks_pointer_and_clears_on_leave() {
        let mut tree = tree();
        let mut h = Harness::new(&mut tree);
        h.send(
            &mut tree,
            PointerEvent::Moved {
                pos: Point::new(60.0, row_y(1)),
            },
        );
        assert_eq!(tree.hovered_index(), Some(1));
        let mut cx = EventCx::new(&mut h.clipboard, Size::new(800.0, 600.0));
        tree.pointer_left(&mut cx);
        assert_eq!(tree.hovered_index(), None);
    }
}
