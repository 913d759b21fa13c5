// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-call interface to the rendering backend.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use understory_text::TextStyle;

use crate::theme::Color;

/// Handle to a texture owned by the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Backend draw calls. Coordinates are relative to the innermost pushed offset.
pub trait Renderer {
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle, color: Color);
    /// Stretch a texture over `rect`.
    fn draw_sprite(&mut self, rect: Rect, texture: TextureId);
    /// Fill a triangle.
    fn draw_triangle(&mut self, points: [Point; 3], color: Color);
    /// Restrict drawing to `rect` until the matching [`Renderer::pop_clip`].
    fn push_clip(&mut self, rect: Rect);
    /// Undo the last [`Renderer::push_clip`].
    fn pop_clip(&mut self);
    /// Translate subsequent draw calls by `offset`.
    fn push_offset(&mut self, offset: Vec2);
    /// Undo the last [`Renderer::push_offset`].
    fn pop_offset(&mut self);
}

/// A draw call recorded by [`RecordingRenderer`], in absolute coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Renderer::fill_rect`].
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill colour.
        color: Color,
    },
    /// [`Renderer::draw_text`].
    Text {
        /// Top-left corner.
        origin: Point,
        /// Text drawn.
        text: String,
        /// Style.
        style: TextStyle,
        /// Colour.
        color: Color,
    },
    /// [`Renderer::draw_sprite`].
    Sprite {
        /// Target rectangle.
        rect: Rect,
        /// Texture.
        texture: TextureId,
    },
    /// [`Renderer::draw_triangle`].
    Triangle {
        /// Corners.
        points: [Point; 3],
        /// Fill colour.
        color: Color,
    },
    /// [`Renderer::push_clip`].
    PushClip(Rect),
    /// [`Renderer::pop_clip`].
    PopClip,
}

/// Renderer that records every call, resolving offsets to absolute coordinates.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    offsets: Vec<Vec2>,
}

impl RecordingRenderer {
    /// Empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Forget recorded commands. Pushed offsets are kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn offset(&self) -> Vec2 {
        self.offsets.last().copied().unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect + self.offset();
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle, color: Color) {
        let origin = origin + self.offset();
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.into(),
            style,
            color,
        });
    }

    fn draw_sprite(&mut self, rect: Rect, texture: TextureId) {
        let rect = rect + self.offset();
        self.commands.push(DrawCommand::Sprite { rect, texture });
    }

    fn draw_triangle(&mut self, points: [Point; 3], color: Color) {
        let off = self.offset();
        let points = points.map(|p| p + off);
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn push_clip(&mut self, rect: Rect) {
        let rect = rect + self.offset();
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_offset(&mut self, offset: Vec2) {
        let total = self.offset() + offset;
        self.offsets.push(total);
    }

    fn pop_offset(&mut self) {
        self.offsets.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_and_unwind() {
        let mut r = RecordingRenderer::new();
        r.push_offset(Vec2::new(10.0, 0.0));
        r.push_offset(Vec2::new(0.0, 5.0));
        r.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        r.pop_offset();
        r.draw_text(Point::ZERO, "hi", TextStyle::regular(13), Color::BLACK);
        r.pop_offset();
        r.push_clip(Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(
            r.commands()[0],
            DrawCommand::FillRect {
                rect: Rect::new(10.0, 5.0, 11.0, 6.0),
                color: Color::BLACK
            }
        );
        let DrawCommand::Text { origin, .. } = &r.commands()[1] else {
            panic!("expected text");
        };
        assert_eq!(*origin, Point::new(10.0, 0.0));
        assert_eq!(r.commands()[2], DrawCommand::PushClip(Rect::new(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(r.texts().collect::<Vec<_>>(), ["hi"]);
    }
}
