// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer pinch detection.
//!
//! The detector tracks every active contact and, once two or more are down,
//! reports a scale factor (current span over previous span) and a focal
//! point (the contact centroid) for each movement. Degenerate geometry —
//! coincident contacts producing a NaN or infinite ratio — is dropped
//! silently; that is an expected transient condition, not an error.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `hypot`

use crate::event::PointerId;

/// One pinch movement: an incremental scale factor about a focal point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleUpdate {
    /// Ratio of the current pointer span to the previous span. Finite and
    /// non-negative; a value of `1.0` means no change.
    pub factor: f64,
    /// Centroid of the active contacts, in viewport coordinates.
    pub focal: Point,
}

/// Tracks active contacts and detects pinch-scale movements.
#[derive(Clone, Debug, Default)]
pub struct PinchDetector {
    pointers: SmallVec<[(PointerId, Point); 4]>,
    prev_span: f64,
    in_progress: bool,
}

impl PinchDetector {
    /// Creates an idle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new contact.
    pub fn on_down(&mut self, pointer: PointerId, position: Point) {
        self.upsert(pointer, position);
    }

    /// Updates a contact position, returning a scale update once at least
    /// two contacts are active and the geometry is non-degenerate.
    ///
    /// A move for a contact the detector has never seen (for example, a
    /// dropped down event) registers it instead of failing.
    pub fn on_move(&mut self, pointer: PointerId, position: Point) -> Option<ScaleUpdate> {
        self.upsert(pointer, position);
        if !self.in_progress || self.pointers.len() < 2 {
            return None;
        }
        let span = self.span();
        let factor = span / self.prev_span;
        self.prev_span = span;
        let focal = self.centroid();
        (factor.is_finite() && factor >= 0.0).then_some(ScaleUpdate { factor, focal })
    }

    /// Removes a contact; the pinch ends when fewer than two remain.
    pub fn on_up(&mut self, pointer: PointerId) {
        self.pointers.retain(|(id, _)| *id != pointer);
        if self.pointers.len() < 2 {
            self.in_progress = false;
        } else {
            // Span changed discontinuously; rebaseline to avoid a jump.
            self.prev_span = self.span();
        }
    }

    /// Drops all contacts and ends any pinch.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.in_progress = false;
        self.prev_span = 0.0;
    }

    /// `true` while two or more contacts are active.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Number of currently active contacts.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Last known position of a contact, if active.
    #[must_use]
    pub fn position_of(&self, pointer: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|(id, _)| *id == pointer)
            .map(|(_, p)| *p)
    }

    /// An arbitrary active contact other than `pointer`, if any.
    ///
    /// Used to hand the primary role to a surviving contact when the
    /// current primary lifts mid-gesture.
    #[must_use]
    pub fn other_pointer(&self, pointer: PointerId) -> Option<(PointerId, Point)> {
        self.pointers.iter().copied().find(|(id, _)| *id != pointer)
    }

    fn upsert(&mut self, pointer: PointerId, position: Point) {
        if let Some(entry) = self.pointers.iter_mut().find(|(id, _)| *id == pointer) {
            entry.1 = position;
        } else {
            self.pointers.push((pointer, position));
        }
        if self.pointers.len() >= 2 && !self.in_progress {
            self.in_progress = true;
            self.prev_span = self.span();
        }
    }

    fn centroid(&self) -> Point {
        let mut sum = Vec2::ZERO;
        for (_, p) in &self.pointers {
            sum += p.to_vec2();
        }
        (sum / self.pointers.len() as f64).to_point()
    }

    /// Mean distance of the contacts from their centroid.
    ///
    /// Only span *ratios* are ever consumed, so any measure proportional to
    /// the contact spread works here.
    fn span(&self) -> f64 {
        let centroid = self.centroid();
        let mut total = 0.0;
        for (_, p) in &self.pointers {
            total += (*p - centroid).hypot();
        }
        total / self.pointers.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> PointerId {
        PointerId(n)
    }

    #[test]
    fn single_pointer_never_scales() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(10.0, 10.0));
        assert!(pinch.on_move(id(0), Point::new(50.0, 50.0)).is_none());
        assert!(!pinch.is_in_progress());
    }

    #[test]
    fn spreading_two_pointers_doubles_the_span() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(100.0, 100.0));
        pinch.on_down(id(1), Point::new(200.0, 100.0));
        assert!(pinch.is_in_progress());

        // Spread symmetrically from 100px apart to 200px apart.
        pinch.on_move(id(0), Point::new(50.0, 100.0));
        let update = pinch.on_move(id(1), Point::new(250.0, 100.0)).unwrap();
        assert!((update.factor - 2.0).abs() < 1e-9, "factor was {}", update.factor);
        assert_eq!(update.focal, Point::new(150.0, 100.0));
    }

    #[test]
    fn coincident_pointers_drop_the_update() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(100.0, 100.0));
        pinch.on_down(id(1), Point::new(100.0, 100.0));
        // Span is zero both before and after; 0/0 is NaN and must be dropped.
        assert!(pinch.on_move(id(1), Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn pinch_ends_when_a_pointer_lifts() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(0.0, 0.0));
        pinch.on_down(id(1), Point::new(100.0, 0.0));
        pinch.on_up(id(1));
        assert!(!pinch.is_in_progress());
        assert_eq!(pinch.pointer_count(), 1);
    }

    #[test]
    fn lifting_one_of_three_rebaselines_the_span() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(0.0, 0.0));
        pinch.on_down(id(1), Point::new(100.0, 0.0));
        pinch.on_down(id(2), Point::new(50.0, 300.0));
        pinch.on_up(id(2));
        assert!(pinch.is_in_progress());
        // The next stationary move must not report a spurious factor.
        let update = pinch.on_move(id(0), Point::new(0.0, 0.0)).unwrap();
        assert!((update.factor - 1.0).abs() < 1e-9, "factor was {}", update.factor);
    }

    #[test]
    fn unknown_pointer_is_registered_on_move() {
        let mut pinch = PinchDetector::new();
        pinch.on_down(id(0), Point::new(0.0, 0.0));
        // Down for pointer 1 was lost; the move registers it.
        assert!(pinch.on_move(id(1), Point::new(100.0, 0.0)).is_none());
        assert_eq!(pinch.pointer_count(), 2);
        assert!(pinch.is_in_progress());
    }
}
