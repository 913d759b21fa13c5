// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret blink timer.

use core::time::Duration;

/// Default blink interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Toggles caret visibility every `interval`.
///
/// ```
/// use core::time::Duration;
/// use understory_event_state::blink::CaretBlink;
///
/// let mut blink = CaretBlink::new();
/// assert!(blink.is_visible());
/// assert!(blink.advance(Duration::from_millis(500)));
/// assert!(!blink.is_visible());
///
/// // Typing or clicking shows the caret again.
/// blink.reset();
/// assert!(blink.is_visible());
/// ```
#[derive(Clone, Debug)]
pub struct CaretBlink {
    elapsed: Duration,
    visible: bool,
    /// Time between two visibility toggles.
    pub interval: Duration,
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }
}

impl CaretBlink {
    /// Create a visible caret with the default interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visible caret with a custom interval.
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            visible: true,
            interval,
        }
    }

    /// Whether the caret is currently drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the caret and restart the interval.
    pub fn reset(&mut self) {
        self.visible = true;
        self.elapsed = Duration::ZERO;
    }

    /// Hide the caret and restart the interval.
    pub fn hide(&mut self) {
        self.visible = false;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the timer. Returns `true` when visibility toggled.
    ///
    /// At most one toggle happens per call; the remainder of a long frame is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed >= self.interval {
            self.visible = !self.visible;
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_once_per_interval() {
        let mut blink = CaretBlink::with_interval(Duration::from_millis(100));
        assert!(!blink.advance(Duration::from_millis(60)));
        assert!(blink.advance(Duration::from_millis(40)), "reaches the interval");
        assert!(!blink.is_visible());
        assert!(blink.advance(Duration::from_millis(250)), "one toggle per call");
        assert!(blink.is_visible());
    }

    #[test]
    fn reset_restarts_visible() {
        let mut blink = CaretBlink::new();
        blink.advance(DEFAULT_INTERVAL);
        assert!(!blink.is_visible());
        blink.advance(Duration::from_millis(300));
        blink.reset();
        assert!(blink.is_visible());
        assert!(
            !blink.advance(Duration::from_millis(300)),
            "interval restarted by reset"
        );
    }

    #[test]
    fn hide_clears_visibility() {
        let mut blink = CaretBlink::new();
        blink.hide();
        assert!(!blink.is_visible());
    }
}
