// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host interface: everything the controller needs from its embedder.

use kurbo::{Affine, Insets, Size};

/// The viewport the content is displayed in, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Outer size of the hosting surface.
    pub size: Size,
    /// Padding reserved by the host on each side. Fitting and bounds
    /// correction operate on the inset-reduced region.
    pub insets: Insets,
}

impl Viewport {
    /// Creates a viewport with no insets.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            insets: Insets::ZERO,
        }
    }

    /// Size available to the content after insets, clamped at zero.
    #[must_use]
    pub fn effective_size(&self) -> Size {
        Size::new(
            (self.size.width - self.insets.x_value()).max(0.0),
            (self.size.height - self.insets.y_value()).max(0.0),
        )
    }
}

/// Services a [`ZoomView`](crate::ZoomView) requires from its embedder.
///
/// The controller never talks to a windowing system or a clock directly;
/// every environment interaction goes through this trait, which keeps the
/// whole engine headless and testable.
pub trait ViewHost {
    /// Current viewport geometry.
    fn viewport(&self) -> Viewport;

    /// Intrinsic size of the displayed content, or `None` before content is
    /// set. With no content the controller ignores all input.
    fn content_size(&self) -> Option<Size>;

    /// The draw transform changed; the host should repaint with it.
    fn request_redraw(&mut self, transform: Affine);

    /// The controller has time-driven work pending (an animation or a tap
    /// deadline); the host should call
    /// [`ZoomView::on_frame`](crate::ZoomView::on_frame) on its next frame.
    fn schedule_frame(&mut self);

    /// Tells an ancestor scroll container whether it may steal the current
    /// touch stream. `false` while a gesture the controller owns is in
    /// progress; `true` when a drag runs off a content edge and the parent
    /// should take over. Hosts without such an ancestor can ignore this.
    fn set_parent_gesture_passthrough(&mut self, allowed: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_size_subtracts_insets() {
        let viewport = Viewport {
            size: Size::new(1000.0, 500.0),
            insets: Insets::uniform(10.0),
        };
        assert_eq!(viewport.effective_size(), Size::new(980.0, 480.0));
    }

    #[test]
    fn effective_size_never_goes_negative() {
        let viewport = Viewport {
            size: Size::new(10.0, 10.0),
            insets: Insets::uniform(20.0),
        };
        assert_eq!(viewport.effective_size(), Size::ZERO);
    }
}
