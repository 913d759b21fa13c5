// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed publish/subscribe channels.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Handle returned by [`Signal::connect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// A notification channel carrying values of type `T`.
///
/// Each widget exposes one `Signal` per notification kind, so subscribers are checked at
/// compile time.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_widget::Signal;
///
/// let mut changed: Signal<String> = Signal::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let id = changed.connect(move |text| sink.borrow_mut().push(text.clone()));
///
/// changed.emit(&"abc".to_string());
/// assert!(changed.disconnect(id));
/// changed.emit(&"ignored".to_string());
/// assert_eq!(*seen.borrow(), ["abc"]);
/// ```
pub struct Signal<T> {
    slots: Vec<(ConnectionId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> core::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Signal<T> {
    /// Create a signal without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler`. Handlers run in connection order.
    pub fn connect(&mut self, handler: impl FnMut(&T) + 'static) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(handler)));
        id
    }

    /// Unsubscribe. Returns `false` if `id` was not connected.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != id);
        self.slots.len() != before
    }

    /// Remove every subscriber.
    pub fn disconnect_all(&mut self) {
        self.slots.clear();
    }

    /// Number of subscribers.
    #[must_use]
    pub fn connections(&self) -> usize {
        self.slots.len()
    }

    /// Call every subscriber with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.slots {
            handler(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn handlers_run_in_order_until_disconnected() {
        let mut signal: Signal<u32> = Signal::new();
        let total = Rc::new(Cell::new(0));
        let a = total.clone();
        let first = signal.connect(move |v| a.set(a.get() * 10 + v));
        let b = total.clone();
        signal.connect(move |v| b.set(b.get() * 10 + v + 1));
        signal.emit(&1);
        assert_eq!(total.get(), 12);
        assert!(signal.disconnect(first));
        assert!(!signal.disconnect(first), "already gone");
        assert_eq!(signal.connections(), 1);
        signal.disconnect_all();
        signal.emit(&5);
        assert_eq!(total.get(), 12);
    }
}
