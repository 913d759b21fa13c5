// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional crop window.

/// How content wider than the viewport is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Move the crop offset to keep the area of interest visible.
    #[default]
    Scroll,
    /// Never scroll. The owner must keep content within the viewport.
    LimitToViewport,
}

/// A crop offset mapping content coordinates onto a viewport of fixed extent.
///
/// Coordinates are logical pixels. The window knows nothing about text; callers pass
/// the pixel position of whatever must stay visible (usually the caret).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWindow {
    offset: f64,
    viewport: f64,
    policy: OverflowPolicy,
}

impl CropWindow {
    /// Create a scrolling window of the given viewport extent.
    #[must_use]
    pub fn new(viewport: f64) -> Self {
        Self {
            offset: 0.0,
            viewport: viewport.max(0.0),
            policy: OverflowPolicy::Scroll,
        }
    }

    /// Current crop offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Viewport extent.
    #[must_use]
    pub const fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Active overflow policy.
    #[must_use]
    pub const fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Change the viewport extent. Call [`CropWindow::clamp_to_content`] afterwards.
    pub fn set_viewport(&mut self, viewport: f64) {
        self.viewport = viewport.max(0.0);
    }

    /// Switch policy. Switching to [`OverflowPolicy::LimitToViewport`] resets the offset.
    pub fn set_policy(&mut self, policy: OverflowPolicy) {
        self.policy = policy;
        if policy == OverflowPolicy::LimitToViewport {
            self.offset = 0.0;
        }
    }

    /// Largest offset that does not expose space past the end of `content`.
    #[must_use]
    pub fn max_offset(&self, content: f64) -> f64 {
        (content - self.viewport).max(0.0)
    }

    /// Returns `true` if `content` fits without scrolling.
    #[must_use]
    pub fn fits(&self, content: f64) -> bool {
        content <= self.viewport
    }

    /// Scroll the minimum amount so that `pos` lies inside `[offset, offset + viewport]`.
    ///
    /// Returns `true` if the offset changed.
    pub fn ensure_visible(&mut self, pos: f64) -> bool {
        if self.policy == OverflowPolicy::LimitToViewport {
            return false;
        }
        let before = self.offset;
        if pos < self.offset {
            self.offset = pos.max(0.0);
        } else if pos > self.offset + self.viewport {
            self.offset = pos - self.viewport;
        }
        self.offset != before
    }

    /// Reduce the offset so the viewport never shows space past the end of `content`.
    pub fn clamp_to_content(&mut self, content: f64) {
        if self.policy == OverflowPolicy::LimitToViewport {
            self.offset = 0.0;
            return;
        }
        self.offset = self.offset.clamp(0.0, self.max_offset(content));
    }

    /// Move the offset by `delta`, clamped to the content. Used for drag auto-scroll.
    ///
    /// Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: f64, content: f64) -> bool {
        if self.policy == OverflowPolicy::LimitToViewport {
            return false;
        }
        let before = self.offset;
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset(content));
        self.offset != before
    }

    /// Set the offset directly, clamped to the content.
    pub fn set_offset(&mut self, offset: f64, content: f64) {
        if self.policy == OverflowPolicy::Scroll {
            self.offset = offset.clamp(0.0, self.max_offset(content));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_visible_scrolls_minimally_in_both_directions() {
        let mut crop = CropWindow::new(100.0);
        assert!(!crop.ensure_visible(80.0), "already visible");
        assert!(crop.ensure_visible(130.0));
        assert_eq!(crop.offset(), 30.0);
        assert!(crop.ensure_visible(10.0));
        assert_eq!(crop.offset(), 10.0);
    }

    #[test]
    fn clamp_removes_trailing_space() {
        let mut crop = CropWindow::new(100.0);
        crop.ensure_visible(300.0);
        assert_eq!(crop.offset(), 200.0);
        crop.clamp_to_content(250.0);
        assert_eq!(crop.offset(), 150.0);
        crop.clamp_to_content(40.0);
        assert_eq!(crop.offset(), 0.0, "short content shows from the start");
    }

    #[test]
    fn limit_policy_pins_offset_at_zero() {
        let mut crop = CropWindow::new(100.0);
        crop.ensure_visible(300.0);
        crop.set_policy(OverflowPolicy::LimitToViewport);
        assert_eq!(crop.offset(), 0.0);
        assert!(!crop.ensure_visible(500.0));
        assert!(!crop.scroll_by(20.0, 1000.0));
        assert_eq!(crop.offset(), 0.0);
        assert!(crop.fits(100.0));
        assert!(!crop.fits(100.5));
    }

    #[test]
    fn scroll_by_is_clamped() {
        let mut crop = CropWindow::new(50.0);
        assert!(crop.scroll_by(30.0, 60.0));
        assert_eq!(crop.offset(), 10.0, "max offset is content - viewport");
        assert!(crop.scroll_by(-100.0, 60.0));
        assert_eq!(crop.offset(), 0.0);
        assert!(!crop.scroll_by(-1.0, 60.0));
    }
}
