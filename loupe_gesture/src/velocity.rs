// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation over a short trailing window.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Samples older than this (relative to the newest sample) are discarded.
const SAMPLE_HORIZON_MS: u64 = 100;

/// Upper bound on retained samples; oldest samples are dropped first.
const MAX_SAMPLES: usize = 16;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time: u64,
    position: Point,
}

/// Estimates pointer velocity from recent movement samples.
///
/// Velocity is reported in pixels per second, computed as a secant over the
/// retained window. A single sample (or a zero-duration window) reports zero
/// velocity. The short horizon means the estimate reflects the speed at
/// release rather than the whole drag, matching the numeric contract of
/// platform velocity trackers.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Records a movement sample.
    ///
    /// Samples are expected in non-decreasing time order; samples that have
    /// aged out of the window are pruned here.
    pub fn add_movement(&mut self, time: u64, position: Point) {
        while let Some(first) = self.samples.first() {
            let stale = time.saturating_sub(first.time) > SAMPLE_HORIZON_MS;
            if stale || self.samples.len() >= MAX_SAMPLES {
                self.samples.remove(0);
            } else {
                break;
            }
        }
        self.samples.push(Sample { time, position });
    }

    /// Current velocity estimate in pixels per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Vec2::ZERO;
        };
        let dt = last.time.saturating_sub(first.time);
        if dt == 0 {
            return Vec2::ZERO;
        }
        (last.position - first.position) * (1000.0 / dt as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn single_sample_reports_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(10, Point::new(5.0, 5.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn constant_motion_is_estimated_exactly() {
        let mut tracker = VelocityTracker::new();
        // 1 px/ms rightward, i.e. 1000 px/s.
        for i in 0..6_u64 {
            tracker.add_movement(i * 10, Point::new((i * 10) as f64, 0.0));
        }
        let v = tracker.velocity();
        assert!((v.x - 1000.0).abs() < 1e-9, "vx was {}", v.x);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn stale_samples_are_pruned() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, Point::new(0.0, 0.0));
        // Far outside the horizon; only the recent pair should count.
        tracker.add_movement(1000, Point::new(0.0, 0.0));
        tracker.add_movement(1050, Point::new(100.0, 0.0));
        let v = tracker.velocity();
        assert!((v.x - 2000.0).abs() < 1e-9, "vx was {}", v.x);
    }

    #[test]
    fn clear_resets_the_estimate() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, Point::new(0.0, 0.0));
        tracker.add_movement(50, Point::new(100.0, 0.0));
        tracker.clear();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn sample_count_is_bounded() {
        let mut tracker = VelocityTracker::new();
        for i in 0..100_u64 {
            tracker.add_movement(i, Point::new(i as f64, 0.0));
        }
        assert!(tracker.samples.len() <= MAX_SAMPLES, "tracker must not grow unbounded");
    }
}
