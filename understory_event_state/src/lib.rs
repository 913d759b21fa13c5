// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: tiny, time-driven state machines for interactive widgets.
//!
//! Widgets in a retained-mode toolkit keep a handful of timers that are advanced once per
//! frame by an explicit `update(elapsed)` call. This crate packages those timers as plain
//! values so each widget owns its own copy and nothing is shared between instances.
//!
//! - [`click::DoubleClickState`]: arms on a click, recognizes a second click on the same key
//!   inside a time window, and is cancelled by pointer movement.
//! - [`blink::CaretBlink`]: toggles caret visibility at a fixed interval and restarts visible
//!   on activity.
//! - [`tolerance::EdgeScrollTolerance`]: decides when a wheel event that could not scroll a
//!   widget should bubble to an enclosing scrollable container.
//!
//! No clock is read here. Time only moves when the caller passes a [`core::time::Duration`]
//! to `advance`.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use understory_event_state::click::{ClickKind, DoubleClickState};
//!
//! let mut clicks: DoubleClickState<usize> = DoubleClickState::new();
//! assert_eq!(clicks.on_click(3), ClickKind::Single);
//! clicks.advance(Duration::from_millis(120));
//! assert_eq!(clicks.on_click(3), ClickKind::Double);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod blink;
pub mod click;
pub mod tolerance;
