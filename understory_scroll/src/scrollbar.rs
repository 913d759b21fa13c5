// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer scrollbar model.

use kurbo::{Point, Rect};

/// Scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Thumb moves along y.
    Vertical,
    /// Thumb moves along x.
    Horizontal,
}

/// Scrollbar state: a `value` within `0..=maximum - viewport_size`.
///
/// `maximum` is the content extent and `viewport_size` the visible extent, both in pixels.
/// Geometry methods take the scrollbar's track rectangle in the owner's coordinate space.
///
/// ```rust
/// use understory_scroll::{Orientation, Scrollbar};
///
/// let mut bar = Scrollbar::new(Orientation::Vertical);
/// bar.set_maximum(100);
/// bar.set_viewport_size(40);
/// bar.set_scroll_amount(10);
///
/// assert!(bar.wheel(-2.0));
/// assert_eq!(bar.value(), 20);
/// assert!(bar.wheel(5.0));
/// assert_eq!(bar.value(), 0, "floored at zero");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scrollbar {
    orientation: Orientation,
    maximum: u32,
    value: u32,
    viewport_size: u32,
    scroll_amount: u32,
    auto_hide: bool,
    // Offset of the grab point from the thumb start while dragging.
    drag: Option<f64>,
}

impl Scrollbar {
    /// Create a scrollbar with `maximum = 10`, `viewport_size = 1`, and auto-hide enabled.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            maximum: 10,
            value: 0,
            viewport_size: 1,
            scroll_amount: 1,
            auto_hide: true,
            drag: None,
        }
    }

    /// Axis of the scrollbar.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Content extent.
    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Visible extent.
    #[must_use]
    pub const fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    /// Pixels moved per wheel notch.
    #[must_use]
    pub const fn scroll_amount(&self) -> u32 {
        self.scroll_amount
    }

    /// Whether the scrollbar hides itself when everything fits.
    #[must_use]
    pub const fn auto_hide(&self) -> bool {
        self.auto_hide
    }

    /// Largest value the scrollbar can take.
    #[must_use]
    pub const fn max_value(&self) -> u32 {
        self.maximum.saturating_sub(self.viewport_size)
    }

    /// Set the content extent. Zero is stored as one. The value is re-clamped.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum.max(1);
        self.set_value(self.value);
    }

    /// Set the value, clamped to [`Scrollbar::max_value`]. Returns `true` if it changed.
    pub fn set_value(&mut self, value: u32) -> bool {
        let value = value.min(self.max_value());
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Set the visible extent. The value is re-clamped.
    pub fn set_viewport_size(&mut self, viewport_size: u32) {
        self.viewport_size = viewport_size;
        self.set_value(self.value);
    }

    /// Set the wheel step. Zero is stored as one.
    pub fn set_scroll_amount(&mut self, amount: u32) {
        self.scroll_amount = amount.max(1);
    }

    /// Enable or disable auto-hide.
    pub fn set_auto_hide(&mut self, auto_hide: bool) {
        self.auto_hide = auto_hide;
    }

    /// `false` when auto-hide is enabled and the content fits the viewport.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        !(self.auto_hide && self.maximum <= self.viewport_size)
    }

    /// Apply a wheel delta. Positive deltas scroll towards zero.
    ///
    /// Returns `true` if the value changed.
    pub fn wheel(&mut self, delta: f64) -> bool {
        let step = delta * f64::from(self.scroll_amount);
        let target = f64::from(self.value) - step;
        self.set_value(to_u32(target))
    }

    /// Thumb rectangle inside `track`.
    #[must_use]
    pub fn thumb_rect(&self, track: Rect) -> Rect {
        let (_, thumb_len, thumb_start) = self.thumb_span(track);
        match self.orientation {
            Orientation::Vertical => Rect::new(
                track.x0,
                track.y0 + thumb_start,
                track.x1,
                track.y0 + thumb_start + thumb_len,
            ),
            Orientation::Horizontal => Rect::new(
                track.x0 + thumb_start,
                track.y0,
                track.x0 + thumb_start + thumb_len,
                track.y1,
            ),
        }
    }

    /// Handle a press inside `track`.
    ///
    /// A press on the thumb starts a drag. A press elsewhere on the track jumps one page
    /// towards the pointer. Returns `true` if the value changed.
    pub fn press(&mut self, track: Rect, pos: Point) -> bool {
        if !track.contains(pos) {
            return false;
        }
        let thumb = self.thumb_rect(track);
        let along = self.along(pos) - self.along(Point::new(track.x0, track.y0));
        let thumb_start = self.along(Point::new(thumb.x0, thumb.y0))
            - self.along(Point::new(track.x0, track.y0));
        let thumb_len = match self.orientation {
            Orientation::Vertical => thumb.height(),
            Orientation::Horizontal => thumb.width(),
        };
        if along >= thumb_start && along < thumb_start + thumb_len {
            self.drag = Some(along - thumb_start);
            return false;
        }
        if along < thumb_start {
            self.set_value(self.value.saturating_sub(self.viewport_size))
        } else {
            self.set_value(self.value.saturating_add(self.viewport_size))
        }
    }

    /// Continue a drag started by [`Scrollbar::press`]. Returns `true` if the value changed.
    pub fn drag_to(&mut self, track: Rect, pos: Point) -> bool {
        let Some(grab) = self.drag else {
            return false;
        };
        let (len, thumb_len, _) = self.thumb_span(track);
        let free = len - thumb_len;
        if free <= 0.0 {
            return false;
        }
        let along = self.along(pos) - self.along(Point::new(track.x0, track.y0)) - grab;
        let ratio = (along / free).clamp(0.0, 1.0);
        self.set_value(to_u32(ratio * f64::from(self.max_value())))
    }

    /// End a drag.
    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Whether the thumb is being dragged.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // (track length, thumb length, thumb start) along the axis.
    fn thumb_span(&self, track: Rect) -> (f64, f64, f64) {
        let len = match self.orientation {
            Orientation::Vertical => track.height(),
            Orientation::Horizontal => track.width(),
        };
        if self.maximum <= self.viewport_size {
            return (len, len, 0.0);
        }
        let thumb_len =
            (len * f64::from(self.viewport_size) / f64::from(self.maximum)).clamp(0.0, len);
        let max_value = f64::from(self.max_value());
        let start = if max_value > 0.0 {
            (len - thumb_len) * f64::from(self.value) / max_value
        } else {
            0.0
        };
        (len, thumb_len, start)
    }

    fn along(&self, p: Point) -> f64 {
        match self.orientation {
            Orientation::Vertical => p.y,
            Orientation::Horizontal => p.x,
        }
    }
}

// Round to nearest and saturate at the u32 range.
fn to_u32(v: f64) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Range checked above; adding 0.5 rounds to nearest."
        )]
        let r = (v + 0.5) as u32;
        r
    }
}
