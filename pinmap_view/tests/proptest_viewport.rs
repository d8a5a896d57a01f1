// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the viewport's centering and clamping guarantees.

use core::time::Duration;

use kurbo::{Point, Rect};
use pinmap_view::{MAX_SCALE, MIN_SCALE, Motion, ViewTransform, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pan_zoom_to_centers_any_in_range_zoom(
        x in -5_000.0f64..5_000.0,
        y in -5_000.0f64..5_000.0,
        zoom in MIN_SCALE..=MAX_SCALE,
        w in 50.0f64..3_000.0,
        h in 50.0f64..3_000.0,
    ) {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, w, h));
        vp.pan_zoom_to(Point::new(x, y), zoom, Duration::ZERO, &mut ());
        let center = vp.content_to_display_point(Point::new(x, y));
        prop_assert!((center.x - w / 2.0).abs() < 1e-6);
        prop_assert!((center.y - h / 2.0).abs() < 1e-6);
        prop_assert!((vp.scale() - zoom).abs() < 1e-12);
    }

    #[test]
    fn committed_scale_is_always_in_range(
        tx in -1_000.0f64..1_000.0,
        ty in -1_000.0f64..1_000.0,
        scale in -10.0f64..50.0,
    ) {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        vp.apply_transform(ViewTransform::new(tx, ty, scale), Motion::Snap, &mut ());
        prop_assert!(vp.scale() >= MIN_SCALE);
        prop_assert!(vp.scale() <= MAX_SCALE);
    }

    #[test]
    fn center_and_reset_always_yields_identity(
        tx in -1_000.0f64..1_000.0,
        ty in -1_000.0f64..1_000.0,
        scale in MIN_SCALE..=MAX_SCALE,
        animate_ms in 0u64..1_000,
    ) {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        vp.apply_transform(ViewTransform::new(tx, ty, scale), Motion::Snap, &mut ());
        vp.center_and_reset(Duration::from_millis(animate_ms), &mut ());
        while vp.is_animating() {
            vp.advance(Duration::from_millis(16), &mut ());
        }
        prop_assert_eq!(vp.transform(), ViewTransform::IDENTITY);
    }
}
