// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch event model: one event describes one pointer.
//!
//! Hosts translate their platform's pointer delivery into this shape. Each
//! contact is identified by a [`PointerId`] that is stable from its down
//! event to its up/cancel event; the recognizer owns all multi-touch
//! bookkeeping on top of that.

use kurbo::Point;

/// Identity of one touch contact, stable for the down → up/cancel lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Lifecycle phase of a touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// A new contact touched the surface.
    Down,
    /// An existing contact moved.
    Move,
    /// A contact lifted normally.
    Up,
    /// The touch stream was aborted by the platform (for example, an
    /// ancestor took over the gesture). Cancels the whole session.
    Cancel,
}

/// One per-pointer touch event in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// Which contact this event describes.
    pub pointer: PointerId,
    /// Lifecycle phase.
    pub phase: TouchPhase,
    /// Position in viewport coordinates (logical pixels).
    pub position: Point,
    /// Event timestamp in milliseconds. Any monotonic origin works as long
    /// as the host is consistent across events and frame callbacks.
    pub time: u64,
}

impl TouchEvent {
    /// Creates a [`TouchPhase::Down`] event.
    #[must_use]
    pub fn down(pointer: u64, position: Point, time: u64) -> Self {
        Self {
            pointer: PointerId(pointer),
            phase: TouchPhase::Down,
            position,
            time,
        }
    }

    /// Creates a [`TouchPhase::Move`] event.
    #[must_use]
    pub fn moved(pointer: u64, position: Point, time: u64) -> Self {
        Self {
            pointer: PointerId(pointer),
            phase: TouchPhase::Move,
            position,
            time,
        }
    }

    /// Creates a [`TouchPhase::Up`] event.
    #[must_use]
    pub fn up(pointer: u64, position: Point, time: u64) -> Self {
        Self {
            pointer: PointerId(pointer),
            phase: TouchPhase::Up,
            position,
            time,
        }
    }

    /// Creates a [`TouchPhase::Cancel`] event.
    #[must_use]
    pub fn cancel(pointer: u64, position: Point, time: u64) -> Self {
        Self {
            pointer: PointerId(pointer),
            phase: TouchPhase::Cancel,
            position,
            time,
        }
    }
}
