// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full commit path through `ImageMap`: viewport, marker redraw, tooltip
//! following, and event delivery.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pinmap::{
    AssetSource, FetchError, GestureSource, GestureUpdate, ImageMap, MapConfig, MarkerId,
    ViewTransform,
};
use serde_json::json;

fn map(markers: usize, multi: bool) -> ImageMap {
    let markers_data: Vec<_> = (0..markers)
        .map(|i| {
            json!({
                "x": (i * 37) % 2000,
                "y": (i * 53) % 1500,
                "marker": "base",
                "name": format!("Marker {i}"),
                "id": i,
            })
        })
        .collect();
    let config: MapConfig = serde_json::from_value(json!({
        "containerId": "bench",
        "imageData": { "width": 2000, "height": 1500, "path": "map.png" },
        "markersData": markers_data,
        "assets": {
            "base": { "url": "pin.svg", "width": 60, "height": 60, "offset": [-31, -55] }
        },
        "multiSelectionMode": multi,
    }))
    .expect("valid config");
    let mut map = ImageMap::new(config).expect("valid config");
    map.image_loaded();
    pollster::block_on(map.load_assets(&Empty)).expect("assets load");
    map
}

/// Serves empty icons; the commit path never reads them.
struct Empty;

impl AssetSource for Empty {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(Vec::new())
    }
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_map/gesture");
    for n in [100usize, 1_000] {
        let mut m = map(n, true);
        for i in 0..16 {
            m.show_tooltip(MarkerId(i)).expect("known marker");
        }
        let events = Rc::new(Cell::new(0_u64));
        let seen = Rc::clone(&events);
        m.on_pan_zoom(move |_| seen.set(seen.get() + 1));

        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            let mut step = 0_u32;
            b.iter(|| {
                step = step.wrapping_add(1);
                let k = 1.0 + f64::from(step % 8) * 0.25;
                m.apply_gesture(GestureUpdate {
                    transform: ViewTransform::new(-f64::from(step % 50), 0.0, k),
                    source: GestureSource::PointerMove,
                });
                black_box(m.tooltips().len());
            });
        });
        black_box(events.get());
    }
    group.finish();
}

fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_map/zoom_to_marker");
    let mut m = map(1_000, false);
    group.bench_function("750ms_at_60hz", |b| {
        let mut id = 0_u64;
        b.iter(|| {
            id = (id + 1) % 1_000;
            m.zoom_to_marker(MarkerId(id)).expect("known marker");
            while m.advance(Duration::from_millis(16)) {}
            black_box(m.viewport().transform());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_gesture, bench_transition);
criterion_main!(benches);
