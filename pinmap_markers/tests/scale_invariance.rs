// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker icons keep their declared screen size at every zoom level.

use kurbo::{Point, Rect};
use pinmap_markers::{AssetDescriptor, AssetMetrics, Marker, MarkerId, MarkerLayer};
use pinmap_view::{MAX_SCALE, MIN_SCALE, Motion, ViewTransform, Viewport};
use proptest::prelude::*;

fn layer(w: f64, h: f64, dx: f64, dy: f64) -> MarkerLayer {
    let mut metrics = AssetMetrics::new();
    metrics.insert(
        "pin",
        AssetDescriptor {
            url: "pin.svg".into(),
            width: Some(w),
            height: Some(h),
            offset: Some([dx, dy]),
            tooltip_offset: None,
        },
    );
    MarkerLayer::new(
        vec![Marker::new(MarkerId(1), Point::new(250.0, 175.0), "pin", "p")],
        metrics,
    )
    .expect("unique ids")
}

proptest! {
    #[test]
    fn displayed_size_matches_asset_size(
        k in MIN_SCALE..=MAX_SCALE,
        tx in -500.0..500.0f64,
        ty in -500.0..500.0f64,
        w in 1.0..200.0f64,
        h in 1.0..200.0f64,
        dx in -100.0..100.0f64,
        dy in -100.0..100.0f64,
    ) {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        vp.apply_transform(ViewTransform::new(tx, ty, k), Motion::Snap, &mut ());
        let mut l = layer(w, h, dx, dy);
        l.draw(vp.scale());

        let hit = l.geometry()[0].hit_target();
        let shown = vp.content_to_display_rect(hit);
        prop_assert!((shown.width() - w).abs() < 1e-6);
        prop_assert!((shown.height() - h).abs() < 1e-6);

        // The offset is a fixed screen distance from the marker's anchor.
        let anchor = vp.content_to_display_point(Point::new(250.0, 175.0));
        prop_assert!((shown.x0 - anchor.x - dx).abs() < 1e-6);
        prop_assert!((shown.y0 - anchor.y - dy).abs() < 1e-6);
    }

    #[test]
    fn redraw_depends_only_on_current_scale(k1 in MIN_SCALE..=MAX_SCALE, k2 in MIN_SCALE..=MAX_SCALE) {
        let mut a = layer(60.0, 60.0, -31.0, -55.0);
        let mut b = layer(60.0, 60.0, -31.0, -55.0);
        a.draw(k1);
        a.draw(k2);
        b.draw(k2);
        prop_assert_eq!(a.geometry(), b.geometry());
    }
}
