// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_view --heading-base-level=0

//! Loupe View: a headless pan/zoom controller for content views.
//!
//! [`ZoomView`] ties the pieces of the Loupe engine together: it feeds touch
//! events from the host into a [`loupe_gesture::GestureRecognizer`], applies
//! the resulting drags, pinches, flings, and taps to a two-layer
//! [`ContentTransform`], clamps the result with [`correct_bounds`], and runs
//! [`loupe_motion`] models for double-tap zoom and fling coasting.
//!
//! The controller is headless: it renders nothing and owns no clock. A host
//! implements [`ViewHost`] to expose its geometry and to receive redraw and
//! frame-scheduling requests, then drives the controller from exactly two
//! entry points:
//!
//! - [`ZoomView::handle_touch`] with each per-pointer touch event, and
//! - [`ZoomView::on_frame`] once per frame while a frame has been requested.
//!
//! All coordinates are viewport-relative logical pixels and all timestamps
//! are milliseconds on any monotonic clock. Everything is single-threaded;
//! see the crate-level docs of [`loupe_gesture`] for the event model.
//!
//! ## Scale
//!
//! Scales are relative to the fitted view: the base layer of the transform
//! scales content uniformly to fit the viewport ("center inside"), and a
//! user scale of `1.0` means exactly that fitted view. The configured
//! [`ScaleLevels`] bound resting scales; pinches may overshoot transiently
//! and are animated back on release.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod animator;
mod bounds;
mod error;
mod host;
mod transform;
mod view;

pub use animator::{Animator, AnimatorFrame};
pub use bounds::{ScrollEdges, correct_bounds};
pub use error::{InvalidScaleLevels, ScaleOutOfRange};
pub use host::{ViewHost, Viewport};
pub use transform::ContentTransform;
pub use view::{ScaleLevels, ZoomView};

pub use loupe_gesture::{PointerId, TouchEvent, TouchPhase};
