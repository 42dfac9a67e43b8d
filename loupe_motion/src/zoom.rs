// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased scale interpolation about a fixed focal point.

use kurbo::Point;

use crate::easing::ease_in_out;

/// Default duration of a zoom animation, in milliseconds.
pub const DEFAULT_ZOOM_DURATION_MS: u64 = 200;

/// One sampled frame of a [`ZoomAnimation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFrame {
    /// Absolute target scale for this frame.
    pub scale: f64,
    /// Point to scale about, in viewport coordinates.
    pub focal: Point,
    /// `true` once the animation has reached its end value.
    pub finished: bool,
}

/// An eased interpolation from one scale to another about a focal point.
///
/// The model is immutable; [`Self::sample`] is a pure function of the frame
/// timestamp. Timestamps before the start clamp to the start value and
/// timestamps past the end clamp to the end value, so late or early frames
/// are harmless.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnimation {
    start_time: u64,
    duration: u64,
    from: f64,
    to: f64,
    focal: Point,
}

impl ZoomAnimation {
    /// Creates an animation from `from` to `to` starting at `start_time`.
    ///
    /// A zero `duration` completes on its first sample.
    #[must_use]
    pub fn new(start_time: u64, duration: u64, from: f64, to: f64, focal: Point) -> Self {
        Self {
            start_time,
            duration,
            from,
            to,
            focal,
        }
    }

    /// The scale this animation ends at.
    #[must_use]
    pub fn target_scale(&self) -> f64 {
        self.to
    }

    /// The focal point the scale is applied about.
    #[must_use]
    pub fn focal(&self) -> Point {
        self.focal
    }

    /// Samples the animation at `now` (milliseconds).
    #[must_use]
    pub fn sample(&self, now: u64) -> ZoomFrame {
        let elapsed = now.saturating_sub(self.start_time);
        let t = if self.duration == 0 {
            1.0
        } else {
            (elapsed as f64 / self.duration as f64).clamp(0.0, 1.0)
        };
        let eased = ease_in_out(t);
        ZoomFrame {
            scale: self.from + (self.to - self.from) * eased,
            focal: self.focal,
            finished: elapsed >= self.duration,
        }
    }
}
