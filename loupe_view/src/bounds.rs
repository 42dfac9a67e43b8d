// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds correction: keep the displayed content anchored to the viewport.

use kurbo::{Rect, Size, Vec2};

bitflags::bitflags! {
    /// Which content edges the view is currently resting against.
    ///
    /// Per axis: both flags set means the content fits and is centered, one
    /// flag means the view is pinned to that edge, neither means the view is
    /// somewhere in the scrollable interior. Hosts use this to decide when a
    /// drag should be handed to an ancestor scroll container.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScrollEdges: u8 {
        /// Resting against the left content edge.
        const LEFT = 1 << 0;
        /// Resting against the right content edge.
        const RIGHT = 1 << 1;
        /// Resting against the top content edge.
        const TOP = 1 << 2;
        /// Resting against the bottom content edge.
        const BOTTOM = 1 << 3;
    }
}

impl Default for ScrollEdges {
    /// All edges: the state of freshly fitted (fully visible) content.
    fn default() -> Self {
        Self::all()
    }
}

impl ScrollEdges {
    /// `true` when the content fits horizontally.
    #[must_use]
    pub fn x_fits(self) -> bool {
        self.contains(Self::LEFT | Self::RIGHT)
    }

    /// `true` when the content fits vertically.
    #[must_use]
    pub fn y_fits(self) -> bool {
        self.contains(Self::TOP | Self::BOTTOM)
    }
}

/// Computes the translation that snaps a display rect back into its legal
/// position, plus the edges the corrected rect rests against.
///
/// Per axis, smaller-than-viewport content is centered, and larger content
/// is clamped so no gap opens between a content edge and the matching
/// viewport edge. The returned correction is `Vec2::ZERO` whenever the rect
/// is already legal, which is what makes applying it after every transform
/// mutation idempotent.
#[must_use]
pub fn correct_bounds(rect: Rect, viewport: Size) -> (Vec2, ScrollEdges) {
    let mut correction = Vec2::ZERO;
    let mut edges = ScrollEdges::empty();

    let width = rect.width();
    if width <= viewport.width {
        correction.x = (viewport.width - width) / 2.0 - rect.x0;
        edges |= ScrollEdges::LEFT | ScrollEdges::RIGHT;
    } else if rect.x0 > 0.0 {
        correction.x = -rect.x0;
        edges |= ScrollEdges::LEFT;
    } else if rect.x1 < viewport.width {
        correction.x = viewport.width - rect.x1;
        edges |= ScrollEdges::RIGHT;
    }

    let height = rect.height();
    if height <= viewport.height {
        correction.y = (viewport.height - height) / 2.0 - rect.y0;
        edges |= ScrollEdges::TOP | ScrollEdges::BOTTOM;
    } else if rect.y0 > 0.0 {
        correction.y = -rect.y0;
        edges |= ScrollEdges::TOP;
    } else if rect.y1 < viewport.height {
        correction.y = viewport.height - rect.y1;
        edges |= ScrollEdges::BOTTOM;
    }

    (correction, edges)
}
