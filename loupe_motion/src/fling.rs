// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Friction decay of a scroll offset.

use kurbo::Vec2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `exp` and `abs`

/// Friction coefficient in 1/s. Larger values stop the coast sooner.
const FRICTION: f64 = 4.5;

/// Residual speed (px/s) below which a fling counts as finished.
const STOP_SPEED: f64 = 15.0;

/// Positions within this distance (px) of the rest position count as arrived.
const STOP_DISTANCE: f64 = 0.5;

/// Exponential friction decay of a 2-D scroll offset, clamped per axis.
///
/// The offset follows `x(t) = x0 + v0 · (1 − e^(−λt)) / λ` with velocity
/// `v(t) = v0 · e^(−λt)`, then clamps each axis to `[min, max]`. Like
/// [`ZoomAnimation`](crate::ZoomAnimation), the model is immutable and
/// sampled with the host clock; cancelling a fling is simply dropping it,
/// which freezes the offset at its last applied value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingModel {
    start_time: u64,
    start: Vec2,
    velocity: Vec2,
    min: Vec2,
    max: Vec2,
}

impl FlingModel {
    /// Creates a fling starting at offset `start` with velocity `velocity`
    /// (px/s), clamped per axis to `[min, max]`.
    ///
    /// On an axis where `min > max` (content smaller than the viewport, so
    /// no scrolling range exists) the offset is pinned to `start`.
    #[must_use]
    pub fn new(start_time: u64, start: Vec2, velocity: Vec2, min: Vec2, max: Vec2) -> Self {
        let (min_x, max_x) = if min.x <= max.x { (min.x, max.x) } else { (start.x, start.x) };
        let (min_y, max_y) = if min.y <= max.y { (min.y, max.y) } else { (start.y, start.y) };
        Self {
            start_time,
            start,
            velocity,
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Offset at time `now` (milliseconds), clamped per axis.
    #[must_use]
    pub fn position(&self, now: u64) -> Vec2 {
        let t = self.elapsed_s(now);
        let progress = (1.0 - (-FRICTION * t).exp()) / FRICTION;
        let raw = self.start + self.velocity * progress;
        Vec2::new(
            raw.x.clamp(self.min.x, self.max.x),
            raw.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Offset the fling converges to: the friction limit, clamped.
    #[must_use]
    pub fn rest_position(&self) -> Vec2 {
        let raw = self.start + self.velocity / FRICTION;
        Vec2::new(
            raw.x.clamp(self.min.x, self.max.x),
            raw.y.clamp(self.min.y, self.max.y),
        )
    }

    /// `true` once residual speed has decayed below the stop threshold or
    /// the offset has effectively arrived at its rest position.
    #[must_use]
    pub fn finished(&self, now: u64) -> bool {
        let speed = (self.velocity * (-FRICTION * self.elapsed_s(now)).exp()).hypot();
        if speed < STOP_SPEED {
            return true;
        }
        let delta = self.position(now) - self.rest_position();
        delta.x.abs() < STOP_DISTANCE && delta.y.abs() < STOP_DISTANCE
    }

    fn elapsed_s(&self, now: u64) -> f64 {
        now.saturating_sub(self.start_time) as f64 / 1000.0
    }
}
