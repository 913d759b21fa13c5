// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered to widgets.

use kurbo::{Point, Vec2};

/// Mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Command / Windows / Super.
        const SYSTEM  = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if the platform shortcut modifier (Control or System) is held.
    #[must_use]
    pub const fn command(self) -> bool {
        self.intersects(Self::CONTROL.union(Self::SYSTEM))
    }

    /// Returns `true` if Shift is held.
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// Logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A character key, lowercase. Used for shortcuts such as Ctrl+C; text input arrives
    /// separately as [`InputEvent::Text`].
    Char(char),
}

/// A key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Key press with modifiers.
    #[must_use]
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Returns `true` for the shortcut `command + ch`.
    #[must_use]
    pub fn is_shortcut(&self, ch: char) -> bool {
        self.modifiers.command() && self.key == Key::Char(ch)
    }
}

/// Pointer event. Positions are in the receiver's local coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Pressed {
        /// Pointer position.
        pos: Point,
        /// Button.
        button: MouseButton,
    },
    /// Button released.
    Released {
        /// Pointer position.
        pos: Point,
        /// Button.
        button: MouseButton,
    },
    /// Pointer moved.
    Moved {
        /// Pointer position.
        pos: Point,
    },
    /// Wheel turned. Positive deltas scroll towards the start.
    Wheel {
        /// Pointer position.
        pos: Point,
        /// Notches scrolled.
        delta: f64,
        /// Modifiers held; Shift requests horizontal scrolling.
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    /// Pointer position.
    #[must_use]
    pub const fn pos(&self) -> Point {
        match *self {
            Self::Pressed { pos, .. }
            | Self::Released { pos, .. }
            | Self::Moved { pos }
            | Self::Wheel { pos, .. } => pos,
        }
    }

    /// The same event with its position shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        let mut ev = *self;
        match &mut ev {
            Self::Pressed { pos, .. }
            | Self::Released { pos, .. }
            | Self::Moved { pos }
            | Self::Wheel { pos, .. } => *pos += offset,
        }
        ev
    }
}

/// Any event a container can route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer input, hit-tested against widgets.
    Pointer(PointerEvent),
    /// Key press, delivered to the focused widget.
    Key(KeyEvent),
    /// Text input, delivered to the focused widget.
    Text(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_moves_every_variant() {
        let off = Vec2::new(-10.0, -5.0);
        let ev = PointerEvent::Wheel {
            pos: Point::new(12.0, 7.0),
            delta: 1.0,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(ev.translated(off).pos(), Point::new(2.0, 2.0));
        let ev = PointerEvent::Moved {
            pos: Point::new(0.0, 0.0),
        };
        assert_eq!(ev.translated(off).pos(), Point::new(-10.0, -5.0));
    }

    #[test]
    fn shortcut_accepts_control_or_system() {
        let ctrl_c = KeyEvent::with_modifiers(Key::Char('c'), Modifiers::CONTROL);
        let cmd_c = KeyEvent::with_modifiers(Key::Char('c'), Modifiers::SYSTEM);
        assert!(ctrl_c.is_shortcut('c'));
        assert!(cmd_c.is_shortcut('c'));
        assert!(!KeyEvent::new(Key::Char('c')).is_shortcut('c'));
        assert!(!ctrl_c.is_shortcut('v'));
    }
}
