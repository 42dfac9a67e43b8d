// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation slots: at most one zoom and one fling in flight.

use kurbo::Vec2;
use loupe_motion::{FlingModel, ZoomAnimation, ZoomFrame};

#[derive(Clone, Copy, Debug)]
struct FlingSlot {
    model: FlingModel,
    /// Offset produced by the previous tick; the next tick emits the
    /// difference so cancellation freezes the view wherever it is.
    last: Vec2,
}

/// What one animation tick asks the view to do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatorFrame {
    /// Absolute scale (and focal point) to step toward, if a zoom runs.
    pub zoom: Option<ZoomFrame>,
    /// Pan delta to apply, if a fling runs.
    pub fling_delta: Option<Vec2>,
    /// `true` while any animation remains in flight after this tick.
    pub active: bool,
}

/// Owns the in-flight animations of one view.
///
/// Starting an animation replaces any previous one in the same slot, and
/// cancelling one simply drops the slot: a cancelled fling never emits
/// another delta, so the content freezes at its current position rather
/// than snapping to the fling's end point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Animator {
    zoom: Option<ZoomAnimation>,
    fling: Option<FlingSlot>,
}

impl Animator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while any animation is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.zoom.is_some() || self.fling.is_some()
    }

    /// Target scale of the running zoom, if any.
    #[must_use]
    pub fn zoom_target(&self) -> Option<f64> {
        self.zoom.map(|z| z.target_scale())
    }

    /// Starts (or replaces) the zoom animation.
    pub fn start_zoom(&mut self, animation: ZoomAnimation) {
        self.zoom = Some(animation);
    }

    /// Starts (or replaces) the fling.
    ///
    /// Returns `false` without installing anything when the model is already
    /// finished at `now` (too slow, or no scroll range).
    pub fn start_fling(&mut self, model: FlingModel, now: u64) -> bool {
        if model.finished(now) {
            return false;
        }
        self.fling = Some(FlingSlot {
            model,
            last: model.position(now),
        });
        true
    }

    /// Stops the zoom animation, leaving the scale wherever it is.
    pub fn cancel_zoom(&mut self) {
        self.zoom = None;
    }

    /// Stops the fling, leaving the offset wherever it is.
    pub fn cancel_fling(&mut self) {
        self.fling = None;
    }

    /// Stops everything.
    pub fn cancel_all(&mut self) {
        self.zoom = None;
        self.fling = None;
    }

    /// Advances all animations to `now`, releasing finished slots.
    pub fn tick(&mut self, now: u64) -> AnimatorFrame {
        let mut frame = AnimatorFrame::default();

        if let Some(zoom) = self.zoom {
            let sample = zoom.sample(now);
            if sample.finished {
                self.zoom = None;
            }
            frame.zoom = Some(sample);
        }

        if let Some(slot) = &mut self.fling {
            let position = slot.model.position(now);
            // The scroll offset grew by (position - last); the content
            // moves the opposite way.
            frame.fling_delta = Some(slot.last - position);
            slot.last = position;
            if slot.model.finished(now) {
                self.fling = None;
            }
        }

        frame.active = self.is_active();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn fling(velocity: Vec2) -> FlingModel {
        FlingModel::new(0, Vec2::ZERO, velocity, Vec2::new(-1e6, -1e6), Vec2::new(1e6, 1e6))
    }

    #[test]
    fn idle_animator_ticks_to_nothing() {
        let mut animator = Animator::new();
        let frame = animator.tick(100);
        assert_eq!(frame, AnimatorFrame::default());
        assert!(!animator.is_active());
    }

    #[test]
    fn zoom_runs_to_completion_and_releases_its_slot() {
        let mut animator = Animator::new();
        animator.start_zoom(ZoomAnimation::new(0, 200, 1.0, 3.0, Point::ZERO));
        let mid = animator.tick(100);
        assert!(mid.active);
        let scale = mid.zoom.unwrap().scale;
        assert!(scale > 1.0 && scale < 3.0);
        let end = animator.tick(200);
        assert_eq!(end.zoom.unwrap().scale, 3.0);
        assert!(!end.active);
        assert!(animator.tick(250).zoom.is_none());
    }

    #[test]
    fn starting_a_zoom_replaces_the_previous_one() {
        let mut animator = Animator::new();
        animator.start_zoom(ZoomAnimation::new(0, 200, 1.0, 3.0, Point::ZERO));
        animator.start_zoom(ZoomAnimation::new(100, 200, 2.0, 1.0, Point::ZERO));
        assert_eq!(animator.zoom_target(), Some(1.0));
    }

    #[test]
    fn fling_deltas_accumulate_to_the_travel_distance() {
        let mut animator = Animator::new();
        assert!(animator.start_fling(fling(Vec2::new(1000.0, 0.0)), 0));
        let mut total = Vec2::ZERO;
        let mut now = 0;
        while animator.is_active() {
            now += 16;
            if let Some(delta) = animator.tick(now).fling_delta {
                total += delta;
            }
            assert!(now < 10_000, "fling must terminate");
        }
        // Total travel approaches -v0/lambda = -222.2 on x.
        assert!(total.x < -200.0 && total.x > -223.0, "total was {total:?}");
        assert_eq!(total.y, 0.0);
    }

    #[test]
    fn too_slow_a_fling_is_rejected() {
        let mut animator = Animator::new();
        assert!(!animator.start_fling(fling(Vec2::new(5.0, 0.0)), 0));
        assert!(!animator.is_active());
    }

    #[test]
    fn cancelling_a_fling_emits_no_further_deltas() {
        let mut animator = Animator::new();
        animator.start_fling(fling(Vec2::new(1000.0, 0.0)), 0);
        animator.tick(50);
        animator.cancel_fling();
        let frame = animator.tick(100);
        assert_eq!(frame.fling_delta, None);
        assert!(!frame.active);
    }
}
