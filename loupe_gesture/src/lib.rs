// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_gesture --heading-base-level=0

//! Loupe Gesture: touch gesture recognition for pan/zoom surfaces.
//!
//! This crate classifies a stream of per-pointer touch events into semantic
//! gesture events: drag deltas, pinch scale factors with a focal point,
//! fling velocities, and single/double taps. It is the input half of the
//! Loupe interaction engine; the transform half lives in `loupe_view`.
//!
//! The recognizer is a plain state machine:
//!
//! - It does not own a clock. Every [`TouchEvent`] carries a millisecond
//!   timestamp, and tap confirmation is exposed as a deadline the host polls
//!   (see [`GestureRecognizer::deadline`]).
//! - It does not invoke callbacks. [`GestureRecognizer::handle`] returns the
//!   batch of [`GestureEvent`]s produced by one input event, in order.
//! - It assumes serialized, single-threaded event delivery.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use loupe_gesture::{GestureEvent, GestureRecognizer, TouchEvent};
//!
//! let mut recognizer = GestureRecognizer::default();
//!
//! // A short rightward swipe: down, a move past the touch slop, a move
//! // that produces a drag delta, then up.
//! recognizer.handle(&TouchEvent::down(0, Point::new(100.0, 100.0), 0));
//! recognizer.handle(&TouchEvent::moved(0, Point::new(120.0, 100.0), 16));
//! let events = recognizer.handle(&TouchEvent::moved(0, Point::new(130.0, 100.0), 32));
//!
//! assert!(matches!(events.as_slice(), [GestureEvent::Drag { delta }] if delta.x == 10.0));
//! ```
//!
//! ## Design notes
//!
//! - Drag recognition applies a touch-slop threshold and rebaselines at the
//!   crossing point, so the first emitted delta never "teleports" by the
//!   accumulated slop distance.
//! - The pinch detector observes all active pointers independently of the
//!   drag session; while a pinch is in progress, drag deltas are suppressed
//!   so that one touch stream never produces conflicting scale+translate
//!   operations.
//! - Fling velocity is measured over a short trailing sample window in
//!   pixels per second, and the emitted velocity is negated: it is the
//!   initial velocity of the *scroll offset*, so content keeps moving in the
//!   direction of the swipe.
//!
//! This crate is `no_std`.

#![no_std]

mod event;
mod pinch;
mod recognizer;
mod velocity;

pub use event::{PointerId, TouchEvent, TouchPhase};
pub use pinch::{PinchDetector, ScaleUpdate};
pub use recognizer::{GestureConfig, GestureEvent, GestureEvents, GestureRecognizer};
pub use velocity::VelocityTracker;
