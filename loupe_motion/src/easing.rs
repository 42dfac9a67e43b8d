// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `cos`

use core::f64::consts::PI;

/// Symmetric accelerate/decelerate easing.
///
/// Maps `t` in `[0, 1]` to `[0, 1]` along a half cosine: slow at both ends,
/// fastest in the middle, with `ease_in_out(0.5) == 0.5`. Inputs outside the
/// unit interval are clamped.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert!(ease_in_out(0.0).abs() < 1e-12);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_is_half() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn curve_is_monotone() {
        let mut prev = ease_in_out(0.0);
        for i in 1..=100 {
            let next = ease_in_out(f64::from(i) / 100.0);
            assert!(next >= prev, "not monotone at step {i}");
            prev = next;
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(ease_in_out(-3.0), ease_in_out(0.0));
        assert_eq!(ease_in_out(7.0), ease_in_out(1.0));
    }
}
