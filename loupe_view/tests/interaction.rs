// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for the `loupe_view` controller.
//!
//! These drive a [`ZoomView`] through a recorded [`ViewHost`] the way a real
//! embedder would: touch events in, redraw and frame-scheduling requests
//! out, with `on_frame` pumped manually to run animations to completion.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Size};
use loupe_view::{ScaleLevels, ScrollEdges, TouchEvent, ViewHost, Viewport, ZoomView};

/// A 1000x500 viewport showing 2000x2000 content: fit scale 0.25, fitted
/// display rect (250, 0)..(750, 500).
const VIEWPORT: Size = Size::new(1000.0, 500.0);
const CONTENT: Size = Size::new(2000.0, 2000.0);

#[derive(Debug)]
struct TestHost {
    viewport: Viewport,
    content: Option<Size>,
    redraws: Vec<Affine>,
    frames_requested: usize,
    passthrough: Option<bool>,
}

impl TestHost {
    fn new() -> Self {
        Self {
            viewport: Viewport::new(VIEWPORT),
            content: Some(CONTENT),
            redraws: Vec::new(),
            frames_requested: 0,
            passthrough: None,
        }
    }
}

impl ViewHost for TestHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn content_size(&self) -> Option<Size> {
        self.content
    }

    fn request_redraw(&mut self, transform: Affine) {
        self.redraws.push(transform);
    }

    fn schedule_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn set_parent_gesture_passthrough(&mut self, allowed: bool) {
        self.passthrough = Some(allowed);
    }
}

fn fitted_view(host: &mut TestHost) -> ZoomView {
    let mut view = ZoomView::new();
    view.update(host);
    view
}

/// Runs scheduled frames at 16 ms steps until the view stops asking for
/// more, returning the time of the last frame.
fn pump_frames(view: &mut ZoomView, host: &mut TestHost, mut now: u64) -> u64 {
    let mut budget = host.frames_requested;
    while budget > 0 {
        now += 16;
        let before = host.frames_requested;
        view.on_frame(host, now);
        budget = host.frames_requested - before;
        assert!(now < 60_000, "animation failed to terminate");
    }
    now
}

fn double_tap(view: &mut ZoomView, host: &mut TestHost, at: Point, start: u64) {
    view.handle_touch(host, &TouchEvent::down(0, at, start));
    view.handle_touch(host, &TouchEvent::up(0, at, start + 20));
    view.handle_touch(host, &TouchEvent::down(0, at, start + 100));
    view.handle_touch(host, &TouchEvent::up(0, at, start + 120));
}

#[test]
fn content_is_fitted_and_centered() {
    let mut host = TestHost::new();
    let view = fitted_view(&mut host);
    assert_eq!(view.scale(), 1.0);
    assert_eq!(
        view.display_rect().unwrap(),
        Rect::new(250.0, 0.0, 750.0, 500.0)
    );
    assert_eq!(view.scroll_edges(), ScrollEdges::all());
    assert!(!host.redraws.is_empty());
}

#[test]
fn without_content_touches_pass_through() {
    let mut host = TestHost::new();
    host.content = None;
    let mut view = fitted_view(&mut host);
    assert!(view.display_rect().is_none());
    assert!(!view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(10.0, 10.0), 0)));
}

#[test]
fn set_scale_applies_immediately_when_not_animated() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 2.0, None, false).unwrap();
    assert!((view.scale() - 2.0).abs() < 1e-9);
    // Scaled about the viewport center: 1000x1000, centered in x.
    assert_eq!(
        view.display_rect().unwrap(),
        Rect::new(0.0, -250.0, 1000.0, 750.0)
    );
}

#[test]
fn set_scale_rejects_out_of_range_values() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    let err = view.set_scale(&mut host, 5.0, None, false).unwrap_err();
    assert_eq!(err.requested, 5.0);
    assert_eq!(err.maximum, 3.0);
    assert!(view.set_scale(&mut host, 0.5, None, false).is_err());
    assert_eq!(view.scale(), 1.0, "a rejected scale must not be applied");
}

#[test]
fn invalid_scale_levels_are_rejected() {
    let mut view = ZoomView::new();
    let err = view
        .set_scale_levels(ScaleLevels {
            minimum: 2.0,
            medium: 1.0,
            maximum: 3.0,
        })
        .unwrap_err();
    assert_eq!(err.medium, 1.0);
    assert!(view.set_minimum_scale(-1.0).is_err());
    assert_eq!(view.scale_levels(), ScaleLevels::default());
}

#[test]
fn dragging_zoomed_content_pans_it_within_bounds() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 2.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(500.0, 250.0), 0));
    // Crosses slop; rebaselined, no movement yet.
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(520.0, 250.0), 16));
    assert_eq!(view.display_rect().unwrap().y0, -250.0);
    // A pure vertical drag; x stays centered because it fits.
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(520.0, 200.0), 32));
    let rect = view.display_rect().unwrap();
    assert_eq!(rect.y0, -300.0);
    assert_eq!(rect.x0, 0.0);
}

#[test]
fn dragging_past_an_edge_clamps_and_reports_the_edge() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    // A huge rightward drag: the content pins to its left edge.
    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(500.0, 250.0), 0));
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(520.0, 250.0), 16));
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(2000.0, 250.0), 32));
    let rect = view.display_rect().unwrap();
    assert_eq!(rect.x0, 0.0);
    assert!(view.scroll_edges().contains(ScrollEdges::LEFT));
    // Edge drags may be taken over by an ancestor scroll container.
    assert_eq!(host.passthrough, Some(true));
}

#[test]
fn drag_in_the_interior_keeps_the_gesture() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(500.0, 250.0), 0));
    assert_eq!(host.passthrough, Some(false), "down must claim the stream");
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(520.0, 250.0), 16));
    // Dragging left while pinned to neither horizontal edge.
    view.handle_touch(&mut host, &TouchEvent::moved(0, Point::new(480.0, 250.0), 32));
    assert_eq!(host.passthrough, Some(false));
}

#[test]
fn double_tap_cycles_through_the_scale_levels() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    let at = Point::new(600.0, 300.0);

    double_tap(&mut view, &mut host, at, 0);
    let now = pump_frames(&mut view, &mut host, 120);
    assert!((view.scale() - 1.75).abs() < 1e-9, "scale was {}", view.scale());

    double_tap(&mut view, &mut host, at, now + 1_000);
    let now = pump_frames(&mut view, &mut host, now + 1_120);
    assert!((view.scale() - 3.0).abs() < 1e-9, "scale was {}", view.scale());

    double_tap(&mut view, &mut host, at, now + 1_000);
    pump_frames(&mut view, &mut host, now + 1_120);
    assert!((view.scale() - 1.0).abs() < 1e-9, "scale was {}", view.scale());
}

#[test]
fn single_tap_fires_after_the_double_tap_window() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    let tapped = Rc::new(Cell::new(None));
    let sink = Rc::clone(&tapped);
    view.set_on_tap(move |p| sink.set(Some(p)));

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(400.0, 300.0), 0));
    view.handle_touch(&mut host, &TouchEvent::up(0, Point::new(400.0, 300.0), 20));
    assert_eq!(tapped.get(), None, "tap must wait out the double-tap window");
    assert!(host.frames_requested > 0);

    view.on_frame(&mut host, 100);
    assert_eq!(tapped.get(), None);
    view.on_frame(&mut host, 320);
    assert_eq!(tapped.get(), Some(Point::new(400.0, 300.0)));
}

#[test]
fn fast_swipe_flings_and_stops_inside_bounds() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(600.0, 250.0), 0));
    for i in 1..=5_u64 {
        view.handle_touch(
            &mut host,
            &TouchEvent::moved(0, Point::new(600.0 - (i * 16) as f64, 250.0), i * 16),
        );
    }
    let before = view.display_rect().unwrap().x0;
    view.handle_touch(&mut host, &TouchEvent::up(0, Point::new(520.0, 250.0), 80));
    assert!(host.frames_requested > 0, "a fling must request frames");

    pump_frames(&mut view, &mut host, 80);
    let rect = view.display_rect().unwrap();
    assert!(rect.x0 < before, "content must coast leftward");
    // Never a gap between content and viewport edges.
    assert!(rect.x0 >= -500.0 - 1e-9 && rect.x1 >= VIEWPORT.width - 1e-9);
}

#[test]
fn slow_release_does_not_fling() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(600.0, 250.0), 0));
    for i in 1..=10_u64 {
        view.handle_touch(
            &mut host,
            &TouchEvent::moved(0, Point::new(600.0 - (i * 2) as f64, 250.0), i * 80),
        );
    }
    view.handle_touch(&mut host, &TouchEvent::up(0, Point::new(580.0, 250.0), 800));
    let rect = view.display_rect().unwrap();
    view.on_frame(&mut host, 816);
    assert_eq!(view.display_rect().unwrap(), rect, "no coasting after a slow drag");
}

#[test]
fn touching_down_cancels_a_fling_and_freezes_the_view() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(600.0, 250.0), 0));
    for i in 1..=5_u64 {
        view.handle_touch(
            &mut host,
            &TouchEvent::moved(0, Point::new(600.0 - (i * 16) as f64, 250.0), i * 16),
        );
    }
    view.handle_touch(&mut host, &TouchEvent::up(0, Point::new(520.0, 250.0), 80));
    // Let it coast a little, then put a finger down.
    view.on_frame(&mut host, 96);
    view.on_frame(&mut host, 112);
    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(500.0, 250.0), 120));
    let frozen = view.draw_transform();

    // Time passes; the cancelled fling must not move the content.
    view.on_frame(&mut host, 200);
    view.on_frame(&mut host, 400);
    assert_eq!(view.draw_transform(), frozen);
}

#[test]
fn pinching_below_the_minimum_snaps_back_on_release() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(400.0, 250.0), 0));
    view.handle_touch(&mut host, &TouchEvent::down(1, Point::new(600.0, 250.0), 10));
    // Pinch in hard: well below the fitted scale.
    view.handle_touch(&mut host, &TouchEvent::moved(1, Point::new(450.0, 250.0), 26));
    assert!(view.scale() < 1.0, "pinch must undershoot transiently");
    view.handle_touch(&mut host, &TouchEvent::up(1, Point::new(450.0, 250.0), 40));
    view.handle_touch(&mut host, &TouchEvent::up(0, Point::new(400.0, 250.0), 50));

    pump_frames(&mut view, &mut host, 50);
    assert!((view.scale() - 1.0).abs() < 1e-9, "scale was {}", view.scale());
}

#[test]
fn pinch_cannot_push_past_the_maximum() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 3.0, None, false).unwrap();

    view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(450.0, 250.0), 0));
    view.handle_touch(&mut host, &TouchEvent::down(1, Point::new(550.0, 250.0), 10));
    view.handle_touch(&mut host, &TouchEvent::moved(1, Point::new(950.0, 250.0), 26));
    assert!((view.scale() - 3.0).abs() < 1e-9, "zoom-in past max must be ignored");
    // Zooming back out still works.
    view.handle_touch(&mut host, &TouchEvent::moved(1, Point::new(650.0, 250.0), 42));
    assert!(view.scale() < 3.0);
}

#[test]
fn disabling_zoom_returns_to_the_fitted_view() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 2.0, None, false).unwrap();
    view.set_zoom_enabled(&mut host, false);
    assert_eq!(view.scale(), 1.0);
    assert!(!view.handle_touch(&mut host, &TouchEvent::down(0, Point::new(500.0, 250.0), 0)));
}

#[test]
fn rotation_keeps_the_content_anchored_in_the_viewport() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.rotate_by(&mut host, 90.0);
    // Square content: the bounds check recenters the rotated rect exactly
    // where the fitted one was.
    let rect = view.display_rect().unwrap();
    assert!((rect.x0 - 250.0).abs() < 1e-9 && rect.y0.abs() < 1e-9, "rect was {rect:?}");
    assert!((view.scale() - 1.0).abs() < 1e-9);
}

#[test]
fn layout_change_refits_and_resets_the_user_layer() {
    let mut host = TestHost::new();
    let mut view = fitted_view(&mut host);
    view.set_scale(&mut host, 2.0, None, false).unwrap();

    host.viewport = Viewport::new(Size::new(500.0, 500.0));
    view.on_layout_changed(&mut host);
    assert_eq!(view.scale(), 1.0);
    // min(500/2000, 500/2000) = 0.25: now fills the square viewport.
    assert_eq!(
        view.display_rect().unwrap(),
        Rect::new(0.0, 0.0, 500.0, 500.0)
    );
}
