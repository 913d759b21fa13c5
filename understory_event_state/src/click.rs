// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-click recognition keyed by a widget-defined value.
//!
//! A first click arms the state with a key, for example the caret index an edit box resolved
//! the click to, or the row index of a tree view. A second click with an equal key while the
//! state is still armed is reported as [`ClickKind::Double`] and disarms the state.
//!
//! The armed state is cancelled by:
//! - any pointer movement ([`DoubleClickState::cancel`]),
//! - the window elapsing ([`DoubleClickState::advance`]),
//! - a click with a different key, which re-arms with the new key instead.
//!
//! ```
//! use core::time::Duration;
//! use understory_event_state::click::{ClickKind, DoubleClickState};
//!
//! let mut state = DoubleClickState::with_window(Duration::from_millis(500));
//! assert_eq!(state.on_click(7_u32), ClickKind::Single);
//!
//! // Too slow: the window expires before the second click.
//! assert!(state.advance(Duration::from_millis(600)));
//! assert_eq!(state.on_click(7), ClickKind::Single);
//! ```

use core::time::Duration;

/// Default double-click window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Classification of a click by [`DoubleClickState::on_click`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickKind {
    /// First click, or a click that did not complete a double click.
    Single,
    /// Second click on the same key inside the window.
    Double,
}

/// Double-click state machine for a single widget.
#[derive(Clone, Debug)]
pub struct DoubleClickState<K> {
    armed: Option<K>,
    elapsed: Duration,
    /// Maximum time between two clicks of a double click.
    pub window: Duration,
}

impl<K> Default for DoubleClickState<K> {
    fn default() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }
}

impl<K> DoubleClickState<K> {
    /// Create a disarmed state with the default 500 ms window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disarmed state with a custom window.
    #[must_use]
    pub const fn with_window(window: Duration) -> Self {
        Self {
            armed: None,
            elapsed: Duration::ZERO,
            window,
        }
    }

    /// Arm with `key`, restarting the window.
    pub fn arm(&mut self, key: K) {
        self.armed = Some(key);
        self.elapsed = Duration::ZERO;
    }

    /// Disarm. Returns `true` if the state was armed.
    pub fn cancel(&mut self) -> bool {
        self.elapsed = Duration::ZERO;
        self.armed.take().is_some()
    }

    /// Returns `true` while a first click is waiting for its partner.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The key the state is armed with, if any.
    #[must_use]
    pub const fn armed_key(&self) -> Option<&K> {
        self.armed.as_ref()
    }

    /// Advance the window by `elapsed`.
    ///
    /// Returns `true` if this call expired an armed state.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.armed.is_none() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed >= self.window {
            self.cancel();
            return true;
        }
        false
    }
}

impl<K: PartialEq> DoubleClickState<K> {
    /// Returns `true` if armed with a key equal to `key`.
    #[must_use]
    pub fn is_armed_with(&self, key: &K) -> bool {
        self.armed.as_ref() == Some(key)
    }

    /// Register a click on `key`.
    ///
    /// Completes a double click when armed with an equal key, otherwise arms with `key`.
    pub fn on_click(&mut self, key: K) -> ClickKind {
        if self.is_armed_with(&key) {
            self.cancel();
            ClickKind::Double
        } else {
            self.arm(key);
            ClickKind::Single
        }
    }
}
