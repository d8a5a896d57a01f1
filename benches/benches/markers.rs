// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker layer redraw, hit testing, and tooltip following.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use pinmap_markers::{AssetDescriptor, AssetMetrics, Marker, MarkerId, MarkerLayer};
use pinmap_tooltip::{TooltipConfig, TooltipController};
use pinmap_view::{Motion, ViewTransform, Viewport};

const IMAGE: Rect = Rect::new(0.0, 0.0, 4096.0, 4096.0);

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_f64(&mut self, upper: f64) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * upper
    }
}

fn metrics() -> AssetMetrics {
    let mut m = AssetMetrics::new();
    m.insert(
        "base",
        AssetDescriptor {
            url: "pin.svg".into(),
            width: Some(60.0),
            height: Some(60.0),
            offset: Some([-31.0, -55.0]),
            tooltip_offset: Some([0.0, 0.0]),
        },
    );
    m.insert(
        "wide",
        AssetDescriptor {
            url: "wide.svg".into(),
            width: Some(200.0),
            height: Some(80.0),
            offset: Some([-100.0, -80.0]),
            tooltip_offset: None,
        },
    );
    m
}

fn layer(n: usize, seed: u64) -> MarkerLayer {
    let mut rng = Lcg::new(seed);
    let markers = (0..n)
        .map(|i| {
            let pos = Point::new(rng.next_f64(IMAGE.width()), rng.next_f64(IMAGE.height()));
            let kind = if i % 5 == 0 { "wide" } else { "base" };
            Marker::new(MarkerId(i as u64), pos, kind, format!("Marker {i}"))
        })
        .collect();
    MarkerLayer::new(markers, metrics()).expect("ids are unique")
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/draw");
    for n in [100usize, 1_000, 10_000] {
        let layer = layer(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &layer, |b, layer| {
            let mut k = 0.5;
            b.iter_batched(
                || layer.clone(),
                |mut layer| {
                    k = if k >= 4.0 { 0.5 } else { k + 0.25 };
                    layer.draw(black_box(k));
                    black_box(layer);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/hit_test");
    for n in [100usize, 1_000, 10_000] {
        let mut layer = layer(n, 0xfeed);
        layer.draw(2.0);
        let mut rng = Lcg::new(7);
        let points: Vec<Point> = (0..256)
            .map(|_| Point::new(rng.next_f64(IMAGE.width()), rng.next_f64(IMAGE.height())))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &layer, |b, layer| {
            b.iter(|| {
                for &pt in &points {
                    black_box(layer.hit_test(black_box(pt)));
                }
            });
        });
    }
    group.finish();
}

fn bench_reposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/reposition_tooltips");
    let layer = layer(1_000, 0xbeef);
    let surface = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    for open in [1usize, 16, 128] {
        let mut viewport = Viewport::new(surface);
        let config = TooltipConfig {
            multi_selection: true,
            ..TooltipConfig::default()
        };
        let mut tooltips = TooltipController::new(config, surface);
        viewport.apply_transform(ViewTransform::new(-200.0, -200.0, 0.5), Motion::Snap, &mut ());
        for i in 0..open {
            layer
                .show_tooltip(MarkerId(i as u64), &viewport, &mut tooltips)
                .expect("known marker");
        }
        tooltips.drain_notices();
        group.throughput(Throughput::Elements(open as u64));
        group.bench_function(BenchmarkId::from_parameter(open), |b| {
            b.iter_batched(
                || tooltips.clone(),
                |mut tooltips| {
                    layer.reposition_tooltips(&viewport, &mut tooltips);
                    black_box(tooltips);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_draw, bench_hit_test, bench_reposition);
criterion_main!(benches);
