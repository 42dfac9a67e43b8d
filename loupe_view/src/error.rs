// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for invalid caller-supplied parameters.
//!
//! Gesture-driven degenerate geometry is never an error; those updates are
//! dropped silently where they arise. Errors here only report programmatic
//! misuse of the API.

use core::fmt;

/// A requested scale falls outside the configured scale levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleOutOfRange {
    /// The scale the caller asked for.
    pub requested: f64,
    /// Smallest allowed scale.
    pub minimum: f64,
    /// Largest allowed scale.
    pub maximum: f64,
}

impl fmt::Display for ScaleOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale {} is outside the allowed range {}..={}",
            self.requested, self.minimum, self.maximum
        )
    }
}

impl core::error::Error for ScaleOutOfRange {}

/// A scale level triple that is not strictly increasing and positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidScaleLevels {
    /// Proposed minimum scale.
    pub minimum: f64,
    /// Proposed medium (double-tap intermediate) scale.
    pub medium: f64,
    /// Proposed maximum scale.
    pub maximum: f64,
}

impl fmt::Display for InvalidScaleLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale levels must be positive and strictly increasing, got {} < {} < {}",
            self.minimum, self.medium, self.maximum
        )
    }
}

impl core::error::Error for InvalidScaleLevels {}
