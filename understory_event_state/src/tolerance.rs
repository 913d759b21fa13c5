// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel bubbling for nested scrollable widgets.
//!
//! When a scrollable widget sits inside another scrollable container, a wheel event that
//! hits the inner widget at the end of its range would normally be swallowed. The tolerance
//! lets the event bubble to the container once the inner widget has not scrolled for longer
//! than a threshold, so a user who keeps scrolling past an end eventually scrolls the outer
//! container, but a fling that just reached the end does not.
//!
//! ```
//! use core::time::Duration;
//! use understory_event_state::tolerance::{EdgeScrollTolerance, WheelOutcome};
//!
//! let mut tol = EdgeScrollTolerance::new();
//! assert_eq!(tol.on_wheel(true), WheelOutcome::Consumed);
//!
//! // Stuck at the end right after a successful scroll: keep the event.
//! assert_eq!(tol.on_wheel(false), WheelOutcome::Consumed);
//!
//! // After the threshold elapses the event bubbles.
//! tol.advance(Duration::from_millis(1100));
//! assert_eq!(tol.on_wheel(false), WheelOutcome::Bubble);
//! ```

use core::time::Duration;

/// Default grace period.
pub const DEFAULT_THRESHOLD: Duration = Duration::from_secs(1);

/// What the widget should do with a wheel event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WheelOutcome {
    /// The widget handles the event.
    Consumed,
    /// Forward the event to the enclosing container.
    Bubble,
}

/// Tracks time since the last wheel event that moved the widget.
#[derive(Clone, Debug)]
pub struct EdgeScrollTolerance {
    // `None` until the first successful scroll.
    since_scroll: Option<Duration>,
    /// How long a widget must stay unscrolled before stuck wheel events bubble.
    pub threshold: Duration,
}

impl Default for EdgeScrollTolerance {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl EdgeScrollTolerance {
    /// Create a tolerance with the default one second threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tolerance with a custom threshold. A zero threshold bubbles immediately.
    #[must_use]
    pub const fn with_threshold(threshold: Duration) -> Self {
        Self {
            since_scroll: None,
            threshold,
        }
    }

    /// Advance the clock.
    pub fn advance(&mut self, elapsed: Duration) {
        if let Some(t) = self.since_scroll.as_mut() {
            *t = t.saturating_add(elapsed);
        }
    }

    /// Classify a wheel event given whether it moved the widget.
    pub fn on_wheel(&mut self, moved: bool) -> WheelOutcome {
        if moved {
            self.since_scroll = Some(Duration::ZERO);
            return WheelOutcome::Consumed;
        }
        match self.since_scroll {
            Some(t) if t < self.threshold => WheelOutcome::Consumed,
            _ => WheelOutcome::Bubble,
        }
    }

    /// Forget the last successful scroll.
    pub fn reset(&mut self) {
        self.since_scroll = None;
    }
}
