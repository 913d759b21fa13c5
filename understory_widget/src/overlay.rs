// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient overlays that see pointer input before the widget tree.

use crate::event::PointerEvent;
use crate::render::Renderer;
use crate::widget::{EventCx, WidgetId};

/// What an overlay did with a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayRoute {
    /// The overlay handled the event.
    Consumed,
    /// The event continues to the widget tree.
    PassThrough,
}

/// A widget that can own the active overlay, such as an open menu popup.
pub trait OverlayHost {
    /// Handle a pointer event in the host's local coordinates while its overlay is active.
    ///
    /// The host may call [`EventCx::close_overlay`] to dismiss itself.
    fn overlay_pointer(&mut self, event: &PointerEvent, cx: &mut EventCx<'_>) -> OverlayRoute;

    /// Draw the overlay in the host's local coordinates, above every widget.
    fn draw_overlay(&self, renderer: &mut dyn Renderer);

    /// The overlay was dismissed from outside, for example by Escape or by another overlay
    /// opening.
    fn overlay_closed(&mut self, cx: &mut EventCx<'_>);
}

/// Non-owning record of the single active overlay in a container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayRouter {
    active: Option<WidgetId>,
}

impl OverlayRouter {
    /// Router with no active overlay.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Make `id` the active owner.
    ///
    /// Returns the previous owner when it differs from `id`; the caller must close it.
    pub fn activate(&mut self, id: WidgetId) -> Option<WidgetId> {
        let prev = self.active.replace(id).filter(|prev| *prev != id);
        #[cfg(feature = "tracing")]
        tracing::debug!(owner = id.get(), replaced = ?prev.map(WidgetId::get), "overlay activated");
        prev
    }

    /// Current owner.
    #[must_use]
    pub const fn active(&self) -> Option<WidgetId> {
        self.active
    }

    /// Returns `true` if `id` owns the overlay.
    #[must_use]
    pub fn is_active(&self, id: WidgetId) -> bool {
        self.active == Some(id)
    }

    /// Drop the owner, returning it.
    pub fn clear(&mut self) -> Option<WidgetId> {
        let prev = self.active.take();
        #[cfg(feature = "tracing")]
        if let Some(prev) = prev {
            tracing::debug!(owner = prev.get(), "overlay deactivated");
        }
        prev
    }

    /// Drop the owner if it is `id`. Returns `true` if it was.
    pub fn clear_if(&mut self, id: WidgetId) -> bool {
        if self.is_active(id) {
            self.clear();
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
    fn activation_replaces_and_reports_previous() {
        let mut router = OverlayRouter::new();
        assert_eq!(router.activate(WidgetId(1)), None);
        assert_eq!(router.activate(WidgetId(1)), None, "re-activating is not a replacement");
        assert_eq!(router.activate(WidgetId(2)), Some(WidgetId(1)));
        assert!(router.is_active(WidgetId(2)));
        assert!(!router.clear_if(WidgetId(1)));
        assert!(router.clear_if(WidgetId(2)));
        assert_eq!(router.active(), None);
        assert_eq!(router.clear(), None);
    }
}
