// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zoomable view controller.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};
use loupe_gesture::{GestureEvent, GestureRecognizer, TouchEvent, TouchPhase};
use loupe_motion::{DEFAULT_ZOOM_DURATION_MS, FlingModel, ZoomAnimation};

use crate::animator::Animator;
use crate::bounds::{ScrollEdges, correct_bounds};
use crate::error::{InvalidScaleLevels, ScaleOutOfRange};
use crate::host::ViewHost;
use crate::transform::ContentTransform;

/// The three scale stops of a view: the fitted minimum, the double-tap
/// intermediate, and the maximum.
///
/// Scales are relative to the fitted view, so `1.0` always means "content
/// fits the viewport".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLevels {
    /// Smallest allowed resting scale.
    pub minimum: f64,
    /// First double-tap target.
    pub medium: f64,
    /// Largest allowed scale.
    pub maximum: f64,
}

impl Default for ScaleLevels {
    fn default() -> Self {
        Self {
            minimum: 1.0,
            medium: 1.75,
            maximum: 3.0,
        }
    }
}

impl ScaleLevels {
    /// Validates that the levels are positive and strictly increasing.
    pub fn validated(self) -> Result<Self, InvalidScaleLevels> {
        let ordered = self.minimum > 0.0 && self.minimum < self.medium && self.medium < self.maximum;
        let finite = self.minimum.is_finite() && self.medium.is_finite() && self.maximum.is_finite();
        if ordered && finite {
            Ok(self)
        } else {
            Err(InvalidScaleLevels {
                minimum: self.minimum,
                medium: self.medium,
                maximum: self.maximum,
            })
        }
    }
}

type TapHandler = Box<dyn FnMut(Point)>;

/// Tolerance when comparing the current scale against a level, so a scale
/// left a few ulps shy of its animation target still counts as reached.
const SCALE_EPSILON: f64 = 1e-9;

/// Controller for one zoomable content view.
///
/// The controller owns the gesture recognizer, the content transform, and
/// the animations, and drives them from two host entry points:
/// [`Self::handle_touch`] for input and [`Self::on_frame`] for time. It
/// holds no clock and no platform handles; everything it needs from the
/// embedder goes through [`ViewHost`].
pub struct ZoomView {
    levels: ScaleLevels,
    zoom_enabled: bool,
    allow_parent_intercept_on_edge: bool,
    zoom_duration: u64,
    transform: ContentTransform,
    recognizer: GestureRecognizer,
    animator: Animator,
    edges: ScrollEdges,
    /// Timestamp of the most recent touch or frame, used as the start time
    /// of animations begun by gestures.
    now: u64,
    on_tap: Option<TapHandler>,
    on_double_tap: Option<TapHandler>,
}

impl Default for ZoomView {
    fn default() -> Self {
        Self {
            levels: ScaleLevels::default(),
            zoom_enabled: true,
            allow_parent_intercept_on_edge: true,
            zoom_duration: DEFAULT_ZOOM_DURATION_MS,
            transform: ContentTransform::new(),
            recognizer: GestureRecognizer::default(),
            animator: Animator::new(),
            edges: ScrollEdges::default(),
            now: 0,
            on_tap: None,
            on_double_tap: None,
        }
    }
}

impl fmt::Debug for ZoomView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomView")
            .field("levels", &self.levels)
            .field("zoom_enabled", &self.zoom_enabled)
            .field("transform", &self.transform)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl ZoomView {
    /// Creates a controller with default scale levels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current user scale; `1.0` is the fitted view.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.user_scale()
    }

    /// Configured scale stops.
    #[must_use]
    pub fn scale_levels(&self) -> ScaleLevels {
        self.levels
    }

    /// The transform to render the content with.
    #[must_use]
    pub fn draw_transform(&self) -> Affine {
        self.transform.draw_transform()
    }

    /// Bounding box of the content in viewport coordinates, if any.
    #[must_use]
    pub fn display_rect(&self) -> Option<Rect> {
        self.transform.display_rect()
    }

    /// Edges the content currently rests against.
    #[must_use]
    pub fn scroll_edges(&self) -> ScrollEdges {
        self.edges
    }

    /// `true` while zoom/pan interaction is enabled.
    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    /// Replaces all three scale stops.
    pub fn set_scale_levels(&mut self, levels: ScaleLevels) -> Result<(), InvalidScaleLevels> {
        self.levels = levels.validated()?;
        Ok(())
    }

    /// Sets the minimum scale stop.
    pub fn set_minimum_scale(&mut self, minimum: f64) -> Result<(), InvalidScaleLevels> {
        self.set_scale_levels(ScaleLevels { minimum, ..self.levels })
    }

    /// Sets the double-tap intermediate scale stop.
    pub fn set_medium_scale(&mut self, medium: f64) -> Result<(), InvalidScaleLevels> {
        self.set_scale_levels(ScaleLevels { medium, ..self.levels })
    }

    /// Sets the maximum scale stop.
    pub fn set_maximum_scale(&mut self, maximum: f64) -> Result<(), InvalidScaleLevels> {
        self.set_scale_levels(ScaleLevels { maximum, ..self.levels })
    }

    /// Duration of animated zooms, in milliseconds. Zero means immediate.
    pub fn set_zoom_duration(&mut self, duration_ms: u64) {
        self.zoom_duration = duration_ms;
    }

    /// Enables or disables double-tap-and-drag zooming.
    pub fn set_quick_scale_enabled(&mut self, enabled: bool) {
        self.recognizer.set_quick_scale_enabled(enabled);
    }

    /// Whether an edge drag may be handed to an ancestor scroll container.
    pub fn set_allow_parent_intercept_on_edge(&mut self, allowed: bool) {
        self.allow_parent_intercept_on_edge = allowed;
    }

    /// Registers the single-tap callback.
    pub fn set_on_tap(&mut self, handler: impl FnMut(Point) + 'static) {
        self.on_tap = Some(Box::new(handler));
    }

    /// Registers the double-tap callback, invoked in addition to the
    /// double-tap zoom.
    pub fn set_on_double_tap(&mut self, handler: impl FnMut(Point) + 'static) {
        self.on_double_tap = Some(Box::new(handler));
    }

    /// Enables or disables all zoom/pan interaction.
    ///
    /// Disabling drops the user layer, returning to the fitted view.
    pub fn set_zoom_enabled(&mut self, host: &mut dyn ViewHost, enabled: bool) {
        self.zoom_enabled = enabled;
        if !enabled {
            self.recognizer.reset();
            self.animator.cancel_all();
            self.transform.reset_user();
            self.check_bounds_and_redraw(host);
        }
    }

    /// Tells the controller that viewport or content geometry may have
    /// changed. Call after layout.
    pub fn on_layout_changed(&mut self, host: &mut dyn ViewHost) {
        if self.refresh_layout(host) {
            self.check_bounds_and_redraw(host);
        }
    }

    /// Forces a refit and repaint, for example after swapping content.
    pub fn update(&mut self, host: &mut dyn ViewHost) {
        self.refresh_layout(host);
        self.check_bounds_and_redraw(host);
    }

    /// Rotates the content by `degrees` clockwise about the viewport origin.
    pub fn rotate_by(&mut self, host: &mut dyn ViewHost, degrees: f64) {
        self.transform.rotate_by(degrees);
        self.check_bounds_and_redraw(host);
    }

    /// Sets the content rotation absolutely, discarding accumulated pan
    /// and zoom.
    pub fn set_rotation(&mut self, host: &mut dyn ViewHost, degrees: f64) {
        self.transform.set_rotation(degrees);
        self.check_bounds_and_redraw(host);
    }

    /// Sets the scale to an absolute level about `focal` (defaulting to the
    /// viewport center), optionally animated.
    ///
    /// Unlike gestures, which may transiently overshoot, programmatic scales
    /// outside the configured levels are rejected.
    pub fn set_scale(
        &mut self,
        host: &mut dyn ViewHost,
        scale: f64,
        focal: Option<Point>,
        animate: bool,
    ) -> Result<(), ScaleOutOfRange> {
        if !scale.is_finite() || scale < self.levels.minimum || scale > self.levels.maximum {
            return Err(ScaleOutOfRange {
                requested: scale,
                minimum: self.levels.minimum,
                maximum: self.levels.maximum,
            });
        }
        let focal = focal.unwrap_or_else(|| {
            let viewport = self.transform.viewport();
            Point::new(viewport.width / 2.0, viewport.height / 2.0)
        });
        if animate {
            self.animate_to_scale(host, scale, focal);
        } else {
            self.animator.cancel_zoom();
            self.transform.set_user_scale(scale, focal);
            self.check_bounds_and_redraw(host);
        }
        Ok(())
    }

    /// Routes one touch event through the recognizer and applies the
    /// resulting gestures.
    ///
    /// Returns `true` when the event was consumed; with no content or with
    /// zoom disabled, events pass through untouched.
    pub fn handle_touch(&mut self, host: &mut dyn ViewHost, event: &TouchEvent) -> bool {
        self.now = event.time;
        self.refresh_layout(host);
        if !self.zoom_enabled || !self.transform.has_content() {
            return false;
        }

        if event.phase == TouchPhase::Down {
            // The user took over; a coasting fling must not fight the drag.
            host.set_parent_gesture_passthrough(false);
            self.animator.cancel_fling();
        }

        let events = self.recognizer.handle(event);
        for gesture in events {
            self.apply_gesture(host, gesture);
        }

        if matches!(event.phase, TouchPhase::Up | TouchPhase::Cancel)
            && !self.recognizer.is_in_session()
        {
            self.snap_back_into_levels(host);
        }

        if self.animator.is_active() || self.recognizer.deadline().is_some() {
            host.schedule_frame();
        }
        true
    }

    /// Advances tap deadlines and animations to `now` (milliseconds).
    ///
    /// Hosts call this once per frame while a frame has been requested via
    /// [`ViewHost::schedule_frame`].
    pub fn on_frame(&mut self, host: &mut dyn ViewHost, now: u64) {
        self.now = now;
        self.refresh_layout(host);

        if let Some(gesture) = self.recognizer.fire_deadline(now) {
            self.apply_gesture(host, gesture);
        }

        let frame = self.animator.tick(now);
        if let Some(zoom) = frame.zoom {
            self.scale_toward(host, zoom.scale, zoom.focal);
        }
        if let Some(delta) = frame.fling_delta {
            self.transform.apply_translate(delta);
            self.check_bounds_and_redraw(host);
        }

        if frame.active || self.recognizer.deadline().is_some() {
            host.schedule_frame();
        }
    }

    fn apply_gesture(&mut self, host: &mut dyn ViewHost, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Drag { delta } => {
                self.transform.apply_translate(delta);
                self.check_bounds_and_redraw(host);
                self.update_parent_passthrough(host, delta);
            }
            GestureEvent::Scale { factor, focal } => {
                // Zooming out is always allowed, even while over the
                // maximum; zooming in stops at the maximum. Undershoot
                // below the minimum is allowed transiently and snapped
                // back on release.
                if factor < 1.0 || self.scale() * factor <= self.levels.maximum {
                    self.transform.apply_scale(factor, focal);
                    self.check_bounds_and_redraw(host);
                }
            }
            GestureEvent::Fling { velocity, .. } => self.start_fling(host, velocity),
            GestureEvent::DoubleTap { position } => {
                self.cycle_scale(host, position);
                if let Some(handler) = &mut self.on_double_tap {
                    handler(position);
                }
            }
            GestureEvent::Tap { position } => {
                if let Some(handler) = &mut self.on_tap {
                    handler(position);
                }
            }
        }
    }

    /// Double-tap stepping: minimum → medium → maximum → minimum.
    fn cycle_scale(&mut self, host: &mut dyn ViewHost, position: Point) {
        let scale = self.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let target = if scale < self.levels.medium - SCALE_EPSILON {
            self.levels.medium
        } else if scale < self.levels.maximum - SCALE_EPSILON {
            self.levels.maximum
        } else {
            self.levels.minimum
        };
        self.animate_to_scale(host, target, position);
    }

    fn start_fling(&mut self, host: &mut dyn ViewHost, velocity: Vec2) {
        let Some(rect) = self.transform.display_rect() else {
            return;
        };
        let viewport = self.transform.viewport();
        // The model runs on the scroll offset (-origin of the display
        // rect), clamped to the range that keeps the viewport covered. An
        // axis where the content fits has no range and stays pinned.
        let start = Vec2::new(-rect.x0, -rect.y0);
        let (min_x, max_x) = if rect.width() > viewport.width {
            (0.0, rect.width() - viewport.width)
        } else {
            (start.x, start.x)
        };
        let (min_y, max_y) = if rect.height() > viewport.height {
            (0.0, rect.height() - viewport.height)
        } else {
            (start.y, start.y)
        };
        let model = FlingModel::new(
            self.now,
            start,
            velocity,
            Vec2::new(min_x, min_y),
            Vec2::new(max_x, max_y),
        );
        if self.animator.start_fling(model, self.now) {
            host.schedule_frame();
        }
    }

    fn animate_to_scale(&mut self, host: &mut dyn ViewHost, target: f64, focal: Point) {
        if self.zoom_duration == 0 {
            self.scale_toward(host, target, focal);
            return;
        }
        self.animator.start_zoom(ZoomAnimation::new(
            self.now,
            self.zoom_duration,
            self.scale(),
            target,
            focal,
        ));
        host.schedule_frame();
    }

    /// Applies the multiplicative step that takes the current scale to
    /// `target` about `focal`, preserving accumulated pan.
    fn scale_toward(&mut self, host: &mut dyn ViewHost, target: f64, focal: Point) {
        let current = self.scale();
        if current > 0.0 && current.is_finite() {
            self.transform.apply_scale(target / current, focal);
            self.check_bounds_and_redraw(host);
        }
    }

    /// Animates an out-of-range resting scale back to the nearest level.
    fn snap_back_into_levels(&mut self, host: &mut dyn ViewHost) {
        let scale = self.scale();
        if !scale.is_finite() {
            return;
        }
        let target = if scale < self.levels.minimum - SCALE_EPSILON {
            self.levels.minimum
        } else if scale > self.levels.maximum + SCALE_EPSILON {
            self.levels.maximum
        } else {
            return;
        };
        let focal = self
            .transform
            .display_rect()
            .map_or(Point::ZERO, |r| r.center());
        self.animate_to_scale(host, target, focal);
    }

    /// A drag is running; decide whether an ancestor may take the stream.
    fn update_parent_passthrough(&mut self, host: &mut dyn ViewHost, delta: Vec2) {
        let allowed = self.allow_parent_intercept_on_edge
            && !self.recognizer.is_scaling()
            && (self.edges.x_fits()
                || (self.edges.contains(ScrollEdges::LEFT) && delta.x >= 1.0)
                || (self.edges.contains(ScrollEdges::RIGHT) && delta.x <= -1.0)
                || (self.edges.contains(ScrollEdges::TOP) && delta.y >= 1.0)
                || (self.edges.contains(ScrollEdges::BOTTOM) && delta.y <= -1.0));
        host.set_parent_gesture_passthrough(allowed);
    }

    fn refresh_layout(&mut self, host: &mut dyn ViewHost) -> bool {
        let viewport = host.viewport().effective_size();
        let changed = self.transform.update_fit(viewport, host.content_size());
        if changed {
            self.animator.cancel_all();
            self.edges = ScrollEdges::default();
        }
        changed
    }

    /// Re-clamps the display rect and repaints. Runs after every transform
    /// mutation so an illegal matrix is never observable from outside.
    fn check_bounds_and_redraw(&mut self, host: &mut dyn ViewHost) {
        if let Some(rect) = self.transform.display_rect() {
            let (correction, edges) = correct_bounds(rect, self.transform.viewport());
            if correction != Vec2::ZERO {
                self.transform.apply_translate(correction);
            }
            self.edges = edges;
        }
        host.request_redraw(self.transform.draw_transform());
    }
}
