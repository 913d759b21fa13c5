// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer handling and drawing for [`MenuBar`].

use kurbo::{Point, Rect, Size};
use understory_hierarchy::NodeId;
use understory_widget::{
    Color, Drawable, EventCx, HitTestable, MouseButton, OverlayHost, OverlayRoute, PointerEvent,
    Renderer, Widget,
};

use crate::menu_bar::MenuBar;

impl MenuBar {
    fn bar_pressed(&mut self, pos: Point, cx: &mut EventCx<'_>) {
        self.mouse_down = true;
        let Some((index, id)) = self.bar_menu_at(pos.x) else {
            return;
        };
        if self.open == Some(id) {
            self.close_menu(cx);
        } else if self.is_enabled(id) && !self.menus.is_leaf(id) {
            self.open_menu(index, cx);
        }
    }

    fn bar_released(&mut self, pos: Point, cx: &mut EventCx<'_>) {
        if !core::mem::take(&mut self.mouse_down) {
            return;
        }
        let Some((_, id)) = self.bar_menu_at(pos.x) else {
            return;
        };
        if self.menus.is_leaf(id) && self.is_enabled(id) {
            self.activate(id, cx);
        }
    }

    fn bar_moved(&mut self, pos: Point, cx: &mut EventCx<'_>) {
        let Some(open) = self.open else {
            return;
        };
        match self.bar_menu_at(pos.x) {
            Some((_, id)) if id == open => {
                if self.close_chain(open) {
                    cx.request_redraw();
                }
            }
            Some((index, id)) => {
                if self.is_enabled(id) && !self.menus.is_leaf(id) {
                    self.open_menu(index, cx);
                } else {
                    self.close_menu(cx);
                }
            }
            None => {
                if self.deselect_bottom_item() {
                    cx.request_redraw();
                }
            }
        }
    }

    // Highlight the hovered item; a highlighted submenu item opens its popup.
    fn popup_moved(&mut self, (menu, index): (NodeId, usize), cx: &mut EventCx<'_>) {
        let Some(&item) = self.menus.children_of(menu).get(index) else {
            return;
        };
        let selected = self.menus.data(menu).and_then(|e| e.selected);
        let changed = if selected == Some(index) {
            self.close_chain(item)
        } else {
            self.close_chain(menu);
            if self.is_enabled(item)
                && !self.is_separator(item)
                && let Some(entry) = self.menus.data_mut(menu)
            {
                entry.selected = Some(index);
            }
            true
        };
        if changed {
            cx.request_redraw();
        }
    }

    fn popup_released(&mut self, (menu, index): (NodeId, usize), cx: &mut EventCx<'_>) {
        let Some(&item) = self.menus.children_of(menu).get(index) else {
            return;
        };
        if self.is_enabled(item) && !self.is_separator(item) && self.menus.is_leaf(item) {
            self.activate(item, cx);
        }
    }

    fn activate(&mut self, id: NodeId, cx: &mut EventCx<'_>) {
        let path = self.menus.path_of(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(?path, "menu item activated");
        self.on_menu_item_click.emit(&path);
        self.close_menu(cx);
    }

    fn text_color(&self, id: NodeId, highlighted: bool) -> Color {
        let colors = &self.theme.colors;
        if !self.is_enabled(id) {
            colors.text_disabled
        } else if highlighted {
            colors.selected_text
        } else {
            colors.text
        }
    }

    fn draw_label(
        &self,
        renderer: &mut dyn Renderer,
        id: NodeId,
        x: f64,
        (top, height): (f64, f64),
        color: Color,
    ) {
        let style = self.style();
        let line_height = self.theme.metrics.line_height(style);
        let origin = Point::new(x, top + (height - line_height) / 2.0);
        renderer.draw_text(origin, self.menus.label(id).unwrap_or_default(), style, color);
    }
}

impl Drawable for MenuBar {
    fn draw(&self, renderer: &mut dyn Renderer) {
        let colors = &self.theme.colors;
        let height = self.bar_height();
        renderer.fill_rect(self.size().to_rect(), colors.background);
        let mut x = 0.0;
        for &id in self.menus.roots() {
            let width = self.bar_menu_width(id);
            let open = self.open == Some(id);
            if open {
                renderer.fill_rect(
                    Rect::new(x, 0.0, x + width, height),
                    colors.selected_background,
                );
            }
            let color = self.text_color(id, open);
            self.draw_label(renderer, id, x + self.theme.distance_to_side, (0.0, height), color);
            x += width;
        }
    }
}

impl HitTestable for MenuBar {
    fn size(&self) -> Size {
        Size::new(self.size.width.max(self.menus_width()), self.size.height)
    }
}

impl Widget for MenuBar {
    fn pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> bool {
        self.remember(cx);
        match *event {
            PointerEvent::Pressed {
                pos,
                button: MouseButton::Left,
            } => self.bar_pressed(pos, cx),
            PointerEvent::Released {
                pos,
                button: MouseButton::Left,
            } => self.bar_released(pos, cx),
            PointerEvent::Moved { pos } => self.bar_moved(pos, cx),
            _ => return false,
        }
        true
    }

    fn button_no_longer_down(&mut self, _cx: &mut EventCx<'_>) {
        self.mouse_down = false;
    }

    fn as_overlay_host(&mut self) -> Option<&mut dyn OverlayHost> {
        Some(self)
    }

    fn as_overlay_host_ref(&self) -> Option<&dyn OverlayHost> {
        Some(self)
    }
}

impl OverlayHost for MenuBar {
    fn overlay_pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> OverlayRoute {
        self.remember(cx);
        if self.open.is_none() {
            // Closed by a structural change since the last event.
            cx.close_overlay();
            return OverlayRoute::PassThrough;
        }
        let pos = event.pos();
        let hit = self.item_at(pos);
        match *event {
            PointerEvent::Moved { .. } => {
                if let Some(hit) = hit {
                    self.on_popup = true;
                    self.popup_moved(hit, cx);
                    return OverlayRoute::Consumed;
                }
                if core::mem::take(&mut self.on_popup) && self.deselect_bottom_item() {
                    cx.request_redraw();
                }
                if self.on_bar(pos) {
                    self.bar_moved(pos, cx);
                    return OverlayRoute::Consumed;
                }
                OverlayRoute::PassThrough
            }
            PointerEvent::Pressed { button, .. } => {
                if hit.is_some() {
                    return OverlayRoute::Consumed;
                }
                if self.on_bar(pos) {
                    if button == MouseButton::Left {
                        self.bar_pressed(pos, cx);
                    }
                    return OverlayRoute::Consumed;
                }
                self.close_menu(cx);
                OverlayRoute::PassThrough
            }
            PointerEvent::Released { button, .. } => {
                if let Some(hit) = hit {
                    if button == MouseButton::Left {
                        self.popup_released(hit, cx);
                    }
                    return OverlayRoute::Consumed;
                }
                if self.on_bar(pos) {
                    if button == MouseButton::Left {
                        self.bar_released(pos, cx);
                    }
                    return OverlayRoute::Consumed;
                }
                OverlayRoute::PassThrough
            }
            PointerEvent::Wheel { .. } => {
                if hit.is_some() {
                    OverlayRoute::Consumed
                } else {
                    OverlayRoute::PassThrough
                }
            }
        }
    }

    fn draw_overlay(&self, renderer: &mut dyn Renderer) {
        let colors = &self.theme.colors;
        let dts = self.theme.distance_to_side;
        let arrow_h = self.bar_height() / 2.0;
        let arrow_w = arrow_h / 2.0;
        for popup in self.popups() {
            let rect = popup.rect;
            renderer.fill_rect(rect, colors.background);
            let selected = self.menus.data(popup.menu).and_then(|e| e.selected);
            let mut top = rect.y0;
            for (index, &id) in self.menus.children_of(popup.menu).iter().enumerate() {
                let height = self.item_height(id);
                if self.is_separator(id) {
                    let y = top + self.theme.separator_vertical_padding;
                    renderer.fill_rect(
                        Rect::new(
                            rect.x0 + dts,
                            y,
                            rect.x1 - dts,
                            y + self.theme.separator_thickness,
                        ),
                        colors.separator,
                    );
                    top += height;
                    continue;
                }
                let highlighted = selected == Some(index);
                if highlighted {
                    renderer.fill_rect(
                        Rect::new(rect.x0, top, rect.x1, top + height),
                        colors.selected_background,
                    );
                }
                let color = self.text_color(id, highlighted);
                self.draw_label(renderer, id, rect.x0 + dts, (top, height), color);
                if !self.menus.is_leaf(id) {
                    let x = rect.x1 - dts - arrow_w;
                    let y = top + (height - arrow_h) / 2.0;
                    renderer.draw_triangle(
                        [
                            Point::new(x, y),
                            Point::new(x + arrow_w, y + arrow_h / 2.0),
                            Point::new(x, y + arrow_h),
                        ],
                        color,
                    );
                }
                top += height;
            }
        }
    }

    fn overlay_closed(&mut self, cx: &mut EventCx<'_>) {
        if self.close_state() {
            cx.request_redraw();
        }
    }
}
