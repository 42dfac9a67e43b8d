// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-layer content transform: a fitted base and a user layer on top.

use kurbo::{Affine, Point, Rect, Size, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`

/// The transform from content coordinates to viewport coordinates.
///
/// The transform is the product of two layers:
///
/// - a *base* layer, recomputed from geometry alone, that scales the content
///   uniformly to fit inside the viewport and centers it ("center inside");
/// - a *user* layer on top, accumulating every gesture and programmatic
///   operation (pan, zoom, rotation).
///
/// The split means a layout or content change only rebuilds the base; it
/// also gives "scale" its user-facing meaning: a [`Self::user_scale`] of
/// `1.0` is exactly the fitted view, regardless of content resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentTransform {
    base: Affine,
    user: Affine,
    viewport: Size,
    content: Option<Size>,
}

impl Default for ContentTransform {
    fn default() -> Self {
        Self {
            base: Affine::IDENTITY,
            user: Affine::IDENTITY,
            viewport: Size::ZERO,
            content: None,
        }
    }
}

impl ContentTransform {
    /// Creates an empty transform with no content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once a non-degenerate content size is known.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content
            .is_some_and(|c| c.width > 0.0 && c.height > 0.0 && self.viewport.area() > 0.0)
    }

    /// Intrinsic content size, if set.
    #[must_use]
    pub fn content_size(&self) -> Option<Size> {
        self.content
    }

    /// Viewport size the base layer was fitted to.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Refits the base layer to new geometry.
    ///
    /// Returns `true` (and resets the user layer) only when the geometry
    /// actually changed; calling this every frame with unchanged sizes is
    /// free and leaves the user's pan/zoom state untouched.
    pub fn update_fit(&mut self, viewport: Size, content: Option<Size>) -> bool {
        if viewport == self.viewport && content == self.content {
            return false;
        }
        self.viewport = viewport;
        self.content = content;
        self.user = Affine::IDENTITY;
        self.base = match content {
            Some(c) if c.width > 0.0 && c.height > 0.0 => {
                let scale = (viewport.width / c.width).min(viewport.height / c.height);
                let offset = Vec2::new(
                    (viewport.width - c.width * scale) / 2.0,
                    (viewport.height - c.height * scale) / 2.0,
                );
                Affine::translate(offset) * Affine::scale(scale)
            }
            _ => Affine::IDENTITY,
        };
        true
    }

    /// Pans the user layer by `delta` viewport pixels.
    pub fn apply_translate(&mut self, delta: Vec2) {
        self.user = Affine::translate(delta) * self.user;
    }

    /// Scales the user layer by `factor` about `focal` (viewport coords).
    ///
    /// Non-finite or non-positive factors are dropped and `false` is
    /// returned; coincident pinch contacts routinely produce them and they
    /// must never poison the matrix.
    pub fn apply_scale(&mut self, factor: f64, focal: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.user = Affine::scale_about(factor, focal) * self.user;
        true
    }

    /// Rotates the user layer by `degrees` clockwise.
    pub fn rotate_by(&mut self, degrees: f64) {
        self.user = Affine::rotate(degrees.to_radians()) * self.user;
    }

    /// Replaces the user layer with a pure rotation, discarding any
    /// accumulated pan and zoom.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.user = Affine::rotate(degrees.to_radians());
    }

    /// Replaces the user layer with a pure scale about `focal`.
    ///
    /// This is the programmatic `set_scale` primitive: any accumulated pan
    /// and rotation are discarded.
    pub fn set_user_scale(&mut self, scale: f64, focal: Point) {
        self.user = Affine::scale_about(scale, focal);
    }

    /// Drops the user layer, returning to the fitted view.
    pub fn reset_user(&mut self) {
        self.user = Affine::IDENTITY;
    }

    /// Scale of the user layer alone: `1.0` means the fitted view.
    ///
    /// Measured as the length of the transformed unit x-vector, so it stays
    /// correct under rotation.
    #[must_use]
    pub fn user_scale(&self) -> f64 {
        let [a, b, ..] = self.user.as_coeffs();
        (a * a + b * b).sqrt()
    }

    /// The full content-to-viewport transform handed to the renderer.
    #[must_use]
    pub fn draw_transform(&self) -> Affine {
        self.user * self.base
    }

    /// Axis-aligned bounding box of the content in viewport coordinates.
    #[must_use]
    pub fn display_rect(&self) -> Option<Rect> {
        let content = self.content.filter(|c| c.width > 0.0 && c.height > 0.0)?;
        Some(
            self.draw_transform()
                .transform_rect_bbox(content.to_rect()),
        )
    }
}
