// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_motion --heading-base-level=0

//! Loupe Motion: pure time-based motion models.
//!
//! Everything in this crate is a deterministic function of a millisecond
//! timestamp. There are no timers and no callbacks; a host samples a model
//! once per frame with its own clock and applies the result. The same
//! timestamps always produce the same values, which is what makes the
//! animation layer testable without a display.
//!
//! Two models are provided:
//!
//! - [`ZoomAnimation`]: an eased scale interpolation about a fixed focal
//!   point, used for double-tap zoom and programmatic scale changes.
//! - [`FlingModel`]: exponential friction decay of a scroll offset, clamped
//!   to a per-axis range so a fling never coasts past the content edge.
//!
//! ```rust
//! use loupe_motion::ZoomAnimation;
//! use kurbo::Point;
//!
//! let anim = ZoomAnimation::new(1_000, 200, 1.0, 3.0, Point::new(40.0, 40.0));
//! let frame = anim.sample(1_100);
//! assert!(frame.scale > 1.0 && frame.scale < 3.0);
//! assert!(anim.sample(1_200).finished);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod easing;
mod fling;
mod zoom;

pub use easing::ease_in_out;
pub use fling::FlingModel;
pub use zoom::{DEFAULT_ZOOM_DURATION_MS, ZoomAnimation, ZoomFrame};
