// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture recognizer: raw touch events in, semantic gestures out.
//!
//! One recognizer tracks one multi-touch session (first down → last
//! up/cancel). Within a session it runs three cooperating detectors:
//!
//! - a drag session around a *primary* pointer, gated by a touch-slop
//!   threshold and feeding a [`VelocityTracker`] for fling detection;
//! - a [`PinchDetector`] over all contacts, which takes priority over drag
//!   while it is in progress;
//! - a tap tracker that distinguishes single taps (confirmed via a
//!   deadline) from double taps, including the optional "quick scale"
//!   double-tap-and-drag zoom.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `hypot` and `abs`

use crate::event::{PointerId, TouchEvent, TouchPhase};
use crate::pinch::PinchDetector;
use crate::velocity::VelocityTracker;

/// Vertical drag distance that maps to one whole step of quick-scale zoom.
const QUICK_SCALE_DISTANCE: f64 = 300.0;

/// Tuning thresholds for gesture classification.
///
/// The defaults mirror common platform view configurations; hosts with
/// access to device-derived values should override them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Minimum pointer displacement (px) before a movement becomes a drag.
    pub touch_slop: f64,
    /// Minimum release velocity (px/s, per dominant axis) to start a fling.
    pub min_fling_velocity: f64,
    /// Maximum gap (ms) between a tap's release and the next press for the
    /// pair to count as a double tap.
    pub double_tap_timeout: u64,
    /// Maximum distance (px) between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// When `true`, holding the second tap of a double tap and dragging
    /// vertically scales about the tap point instead of firing a double tap.
    pub quick_scale_enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            double_tap_timeout: 300,
            double_tap_slop: 100.0,
            quick_scale_enabled: false,
        }
    }
}

/// A semantic gesture produced by the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// The primary pointer dragged by `delta` since the previous event.
    Drag {
        /// Movement since the last drag (or since slop was crossed).
        delta: Vec2,
    },
    /// A pinch (or quick-scale) movement.
    Scale {
        /// Incremental scale factor; finite and non-negative.
        factor: f64,
        /// Point to scale about, in viewport coordinates.
        focal: Point,
    },
    /// A drag released fast enough to coast.
    Fling {
        /// Release position of the pointer.
        position: Point,
        /// Initial velocity of the scroll *offset* in px/s — the negated
        /// pointer velocity, so content continues in the swipe direction.
        velocity: Vec2,
    },
    /// A confirmed single tap (no drag, no second tap within the window).
    Tap {
        /// Position of the tap.
        position: Point,
    },
    /// Two taps within the double-tap window and slop distance.
    DoubleTap {
        /// Position of the second press.
        position: Point,
    },
}

/// Batch of gestures produced by one input event, in emission order.
pub type GestureEvents = SmallVec<[GestureEvent; 2]>;

#[derive(Clone, Copy, Debug)]
struct QuickScale {
    anchor: Point,
    last_y: f64,
    engaged: bool,
}

/// Classifies per-pointer touch events into [`GestureEvent`]s.
///
/// See the [crate docs](crate) for the contract; all state is owned and
/// mutated only through `&mut self`, so the host must serialize delivery.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    pinch: PinchDetector,
    velocity: VelocityTracker,
    primary: Option<PointerId>,
    last_primary: Point,
    down_position: Point,
    dragging: bool,
    multi_touch: bool,
    /// Release position and time of a tap awaiting confirmation.
    pending_tap: Option<(Point, u64)>,
    /// Set when a press consumed the pending tap (double tap or quick
    /// scale); its release must not become a new tap candidate.
    tap_consumed: bool,
    quick_scale: Option<QuickScale>,
}

impl GestureRecognizer {
    /// Creates a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Enables or disables quick scale (double-tap-and-drag zoom).
    pub fn set_quick_scale_enabled(&mut self, enabled: bool) {
        self.config.quick_scale_enabled = enabled;
    }

    /// `true` while the primary pointer is in a slop-exceeded drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `true` while a pinch or an engaged quick scale is in progress.
    #[must_use]
    pub fn is_scaling(&self) -> bool {
        self.pinch.is_in_progress() || self.quick_scale.is_some_and(|qs| qs.engaged)
    }

    /// `true` while at least one contact is down.
    #[must_use]
    pub fn is_in_session(&self) -> bool {
        self.primary.is_some()
    }

    /// Number of active contacts.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.pinch.pointer_count()
    }

    /// When a single tap is awaiting confirmation, the time (ms) at which
    /// the host should call [`Self::fire_deadline`].
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending_tap
            .map(|(_, time)| time + self.config.double_tap_timeout)
    }

    /// Confirms a pending single tap whose double-tap window has elapsed.
    pub fn fire_deadline(&mut self, now: u64) -> Option<GestureEvent> {
        let (position, time) = self.pending_tap?;
        if now.saturating_sub(time) >= self.config.double_tap_timeout {
            self.pending_tap = None;
            Some(GestureEvent::Tap { position })
        } else {
            None
        }
    }

    /// Drops all session and tap state, emitting nothing.
    pub fn reset(&mut self) {
        self.pinch.clear();
        self.velocity.clear();
        self.primary = None;
        self.dragging = false;
        self.multi_touch = false;
        self.pending_tap = None;
        self.tap_consumed = false;
        self.quick_scale = None;
    }

    /// Processes one touch event, returning the gestures it produced.
    pub fn handle(&mut self, event: &TouchEvent) -> GestureEvents {
        let mut events = GestureEvents::new();
        match event.phase {
            TouchPhase::Down => self.on_down(event, &mut events),
            TouchPhase::Move => self.on_move(event, &mut events),
            TouchPhase::Up => self.on_up(event, &mut events),
            TouchPhase::Cancel => self.reset(),
        }
        events
    }

    fn on_down(&mut self, event: &TouchEvent, events: &mut GestureEvents) {
        self.pinch.on_down(event.pointer, event.position);
        if self.pinch.pointer_count() >= 2 {
            self.multi_touch = true;
            return;
        }

        self.primary = Some(event.pointer);
        self.last_primary = event.position;
        self.down_position = event.position;
        self.dragging = false;
        self.multi_touch = false;
        self.velocity.clear();
        self.velocity.add_movement(event.time, event.position);

        if let Some((position, time)) = self.pending_tap.take() {
            let within_window =
                event.time.saturating_sub(time) <= self.config.double_tap_timeout;
            let within_slop =
                (event.position - position).hypot() <= self.config.double_tap_slop;
            if within_window && within_slop {
                self.tap_consumed = true;
                if self.config.quick_scale_enabled {
                    self.quick_scale = Some(QuickScale {
                        anchor: event.position,
                        last_y: event.position.y,
                        engaged: false,
                    });
                } else {
                    events.push(GestureEvent::DoubleTap {
                        position: event.position,
                    });
                }
            } else {
                // A press that is not the second half of a double tap
                // confirms the earlier tap.
                events.push(GestureEvent::Tap { position });
            }
        }
    }

    fn on_move(&mut self, event: &TouchEvent, events: &mut GestureEvents) {
        if let Some(update) = self.pinch.on_move(event.pointer, event.position) {
            events.push(GestureEvent::Scale {
                factor: update.factor,
                focal: update.focal,
            });
        }
        if self.pinch.pointer_count() >= 2 {
            self.multi_touch = true;
        }
        if self.primary != Some(event.pointer) {
            return;
        }

        if let Some(mut qs) = self.quick_scale {
            if !qs.engaged && (event.position - qs.anchor).hypot() >= self.config.touch_slop {
                qs.engaged = true;
                qs.last_y = event.position.y;
            }
            if qs.engaged {
                // Dragging down zooms in, up zooms out.
                let factor = 1.0 + (event.position.y - qs.last_y) / QUICK_SCALE_DISTANCE;
                qs.last_y = event.position.y;
                if factor.is_finite() && factor > 0.0 {
                    events.push(GestureEvent::Scale {
                        factor,
                        focal: qs.anchor,
                    });
                }
            }
            self.quick_scale = Some(qs);
            self.last_primary = event.position;
            return;
        }

        if !self.dragging {
            let displacement = (event.position - self.down_position).hypot();
            if displacement >= self.config.touch_slop {
                // Rebaseline at the crossing point so the first emitted
                // delta does not teleport by the slop distance.
                self.dragging = true;
                self.last_primary = event.position;
                self.velocity.add_movement(event.time, event.position);
            }
            return;
        }

        let delta = event.position - self.last_primary;
        self.last_primary = event.position;
        self.velocity.add_movement(event.time, event.position);
        if !self.pinch.is_in_progress() {
            events.push(GestureEvent::Drag { delta });
        }
    }

    fn on_up(&mut self, event: &TouchEvent, events: &mut GestureEvents) {
        self.pinch.on_up(event.pointer);

        if self.primary == Some(event.pointer) && self.pinch.pointer_count() > 0 {
            // The primary lifted mid-gesture; hand the role to a surviving
            // contact and rebaseline so the next move has no delta spike.
            if let Some((id, position)) = self.pinch.other_pointer(event.pointer) {
                self.primary = Some(id);
                self.last_primary = position;
                // Samples from the old finger would fabricate a huge secant
                // velocity across the inter-finger jump.
                self.velocity.clear();
                self.velocity.add_movement(event.time, position);
            }
            return;
        }
        if self.primary != Some(event.pointer) {
            return;
        }

        // Final release of the session.
        let quick_scale = self.quick_scale.take();
        if let Some(qs) = quick_scale {
            if !qs.engaged {
                events.push(GestureEvent::DoubleTap { position: qs.anchor });
            }
        } else if self.dragging {
            self.velocity.add_movement(event.time, event.position);
            let v = self.velocity.velocity();
            if v.x.abs().max(v.y.abs()) >= self.config.min_fling_velocity {
                events.push(GestureEvent::Fling {
                    position: event.position,
                    velocity: -v,
                });
            }
        } else if !self.multi_touch && !self.tap_consumed {
            self.pending_tap = Some((event.position, event.time));
        }

        self.primary = None;
        self.dragging = false;
        self.multi_touch = false;
        self.tap_consumed = false;
        self.velocity.clear();
    }
}
