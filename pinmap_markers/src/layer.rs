// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use pinmap_tooltip::{ContentHandle, Repositioned, TooltipController};
use pinmap_view::Viewport;
use serde::Serialize;

use crate::{AssetMetrics, Bounce, Marker, MarkerId};

/// Errors reported by [`MarkerLayer`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    /// Two marker records share an id.
    #[error("duplicate marker id {0}")]
    DuplicateId(MarkerId),
    /// No marker has this id.
    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),
}

/// Drawn geometry of one marker, in content coordinates at the drawn scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerGeometry {
    /// Marker id.
    pub id: MarkerId,
    /// Top-left of the icon and hit-target: position plus offset / k.
    pub origin: Point,
    /// Icon width / k, if the asset declares one.
    pub width: Option<f64>,
    /// Icon height / k, if the asset declares one.
    pub height: Option<f64>,
    /// Bounce lift of the icon in content units.
    pub lift: f64,
}

impl MarkerGeometry {
    /// Clickable area. Undeclared dimensions count as zero.
    pub fn hit_target(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)),
        )
    }

    /// Where the icon is drawn, including the bounce lift.
    pub fn icon_origin(&self) -> Point {
        self.origin - Vec2::new(0.0, self.lift)
    }
}

/// Screen-facing data for a single marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerScreenData {
    /// Content x with the asset offset applied.
    pub x: f64,
    /// Content y with the asset offset applied.
    pub y: f64,
    /// Content x plus the tooltip offset, without the asset offset.
    pub tooltip_x: f64,
    /// Content y plus the tooltip offset, without the asset offset.
    pub tooltip_y: f64,
    /// Hit-target in content coordinates.
    #[serde(skip)]
    pub hit_target: Rect,
}

/// Result of clicking a marker's hit-target.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerClicked {
    /// The clicked marker.
    pub marker: Marker,
    /// Content x with the asset offset applied.
    pub x: f64,
    /// Content y with the asset offset applied.
    pub y: f64,
    /// `true` if the click opened the tooltip, `false` if it closed it.
    pub tooltip_opened: bool,
}

/// Markers, their scale-invariant geometry, and click feedback.
///
/// The layer does not own tooltips. It asks a [`TooltipController`] to open,
/// close, or move them, computing anchors from its own geometry.
#[derive(Clone, Debug)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    index: HashMap<MarkerId, usize>,
    metrics: AssetMetrics,
    geometry: Vec<MarkerGeometry>,
    scale: f64,
    drawn: bool,
    bounces: HashMap<MarkerId, Bounce>,
}

impl MarkerLayer {
    /// Builds a layer. Record order is z-order; the last record is topmost.
    pub fn new(markers: Vec<Marker>, metrics: AssetMetrics) -> Result<Self, MarkerError> {
        let mut index = HashMap::with_capacity(markers.len());
        for (i, m) in markers.iter().enumerate() {
            if index.insert(m.id, i).is_some() {
                return Err(MarkerError::DuplicateId(m.id));
            }
            if !metrics.contains(&m.kind) {
                tracing::debug!(id = %m.id, kind = %m.kind, "marker kind has no asset metrics");
            }
        }
        Ok(Self {
            markers,
            index,
            metrics,
            geometry: Vec::new(),
            scale: 1.0,
            drawn: false,
            bounces: HashMap::new(),
        })
    }

    /// Marker records in z-order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Record for `id`.
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.index.get(&id).map(|&i| &self.markers[i])
    }

    /// Asset metrics used for sizing.
    pub fn metrics(&self) -> &AssetMetrics {
        &self.metrics
    }

    /// Scale of the last draw (`1` before the first one).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns `true` once [`Self::draw`] has run.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Recomputes every marker's geometry for scale `k`, in z-order.
    pub fn draw(&mut self, k: f64) {
        self.scale = k;
        self.drawn = true;
        let geometry: Vec<_> = self
            .markers
            .iter()
            .map(|m| {
                let lift = self.bounces.get(&m.id).map_or(0.0, Bounce::lift);
                self.geometry_for(m, k, lift)
            })
            .collect();
        self.geometry = geometry;
    }

    /// Geometry from the last draw, in z-order. Empty before the first draw.
    pub fn geometry(&self) -> &[MarkerGeometry] {
        &self.geometry
    }

    /// Position, tooltip point, and hit-target of `id` at scale `k`.
    ///
    /// The position carries the marker offset / `k`; the tooltip point is the
    /// raw position plus the unscaled tooltip offset.
    pub fn screen_data(&self, id: MarkerId, k: f64) -> Option<MarkerScreenData> {
        let marker = self.get(id)?;
        let g = self.geometry_for(marker, k, 0.0);
        let tip = marker.position() + self.metrics.tooltip_offset(&marker.kind);
        Some(MarkerScreenData {
            x: g.origin.x,
            y: g.origin.y,
            tooltip_x: tip.x,
            tooltip_y: tip.y,
            hit_target: g.hit_target(),
        })
    }

    /// Hit-target of `id` as it would be drawn at scale `1`.
    ///
    /// This is the marker's footprint in content space before any zoom
    /// compensation; fitting it fills the display with the icon's declared size.
    pub fn footprint(&self, id: MarkerId) -> Option<Rect> {
        let marker = self.get(id)?;
        Some(self.geometry_for(marker, 1.0, 0.0).hit_target())
    }

    /// Topmost marker whose hit-target contains `pt` (content coordinates).
    pub fn hit_test(&self, pt: Point) -> Option<MarkerId> {
        self.geometry
            .iter()
            .rev()
            .find(|g| g.hit_target().contains(pt))
            .map(|g| g.id)
    }

    /// Handles a click on `id`'s hit-target.
    ///
    /// Toggles the marker's tooltip (closing it if open, otherwise opening it,
    /// which replaces any other in single-selection mode) and restarts the
    /// bounce either way.
    pub fn on_hit_target_clicked(
        &mut self,
        id: MarkerId,
        viewport: &Viewport,
        tooltips: &mut TooltipController<MarkerId>,
    ) -> Result<MarkerClicked, MarkerError> {
        let marker = self.get(id).ok_or(MarkerError::UnknownMarker(id))?.clone();
        let g = self.geometry_for(&marker, viewport.scale(), 0.0);

        let tooltip_opened = if tooltips.contains(&id) {
            // Open was just checked, so this cannot report NotOpen.
            let _ = tooltips.close(&id);
            false
        } else {
            let anchor = viewport.content_to_absolute_rect(g.hit_target());
            tooltips.open(id, anchor, self.metrics.tooltip_offset(&marker.kind));
            true
        };

        self.bounces.insert(id, Bounce::new());

        Ok(MarkerClicked {
            x: g.origin.x,
            y: g.origin.y,
            marker,
            tooltip_opened,
        })
    }

    /// Opens `id`'s tooltip without a click.
    pub fn show_tooltip(
        &self,
        id: MarkerId,
        viewport: &Viewport,
        tooltips: &mut TooltipController<MarkerId>,
    ) -> Result<ContentHandle, MarkerError> {
        let marker = self.get(id).ok_or(MarkerError::UnknownMarker(id))?;
        let anchor = self.anchor_rect(marker, viewport);
        Ok(tooltips.open(id, anchor, self.metrics.tooltip_offset(&marker.kind)))
    }

    /// Moves every open tooltip to follow its marker under the current
    /// transform, removing those whose marker left the visible surface.
    ///
    /// Overlays whose key matches no marker are closed.
    pub fn reposition_tooltips(
        &self,
        viewport: &Viewport,
        tooltips: &mut TooltipController<MarkerId>,
    ) {
        let surface = viewport.surface();
        for id in tooltips.keys() {
            match self.get(id) {
                Some(marker) => {
                    let anchor = self.anchor_rect(marker, viewport);
                    if tooltips.reposition(&id, anchor, surface) == Repositioned::Removed {
                        tracing::debug!(%id, "tooltip left the surface");
                    }
                }
                None => {
                    let _ = tooltips.close(&id);
                }
            }
        }
    }

    /// Advances bounce animations and refreshes icon lifts.
    ///
    /// Returns `true` while any bounce is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.bounces.is_empty() {
            return false;
        }
        for bounce in self.bounces.values_mut() {
            bounce.tick(dt);
        }
        let k = self.scale;
        for g in &mut self.geometry {
            if let Some(b) = self.bounces.get(&g.id) {
                g.lift = b.lift() / k;
            }
        }
        self.bounces.retain(|_, b| !b.is_complete());
        !self.bounces.is_empty()
    }

    /// Returns `true` while `id` is bouncing.
    pub fn is_bouncing(&self, id: MarkerId) -> bool {
        self.bounces.contains_key(&id)
    }

    fn anchor_rect(&self, marker: &Marker, viewport: &Viewport) -> Rect {
        let g = self.geometry_for(marker, viewport.scale(), 0.0);
        viewport.content_to_absolute_rect(g.hit_target())
    }

    fn geometry_for(&self, marker: &Marker, k: f64, lift: f64) -> MarkerGeometry {
        let (width, height) = self.metrics.marker_size(&marker.kind, k);
        let origin = marker.position() + self.metrics.marker_offset(&marker.kind, k);
        MarkerGeometry {
            id: marker.id,
            origin,
            width,
            height,
            lift: if k > 0.0 { lift / k } else { lift },
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Rect, Vec2};
    use pinmap_tooltip::{TooltipConfig, TooltipController, TooltipNotice};
    use pinmap_view::{MAX_SCALE, Motion, ViewTransform, Viewport};

    use super::{MarkerError, MarkerLayer};
    use crate::{AssetDescriptor, AssetMetrics, BOUNCE_HEIGHT, BOUNCE_RISE, Marker, MarkerId};

    fn metrics() -> AssetMetrics {
        let mut m = AssetMetrics::new();
        m.insert(
            "base",
            AssetDescriptor {
                url: "pin.svg".into(),
                width: Some(60.0),
                height: Some(60.0),
                offset: Some([-31.0, -55.0]),
                tooltip_offset: Some([0.0, 5.0]),
            },
        );
        m
    }

    fn layer() -> MarkerLayer {
        MarkerLayer::new(
            vec![
                Marker::new(MarkerId(0), Point::new(100.0, 100.0), "base", "Marker 1"),
                Marker::new(MarkerId(1), Point::new(110.0, 110.0), "base", "Marker 2"),
                Marker::new(MarkerId(2), Point::new(400.0, 300.0), "base", "Marker 3"),
            ],
            metrics(),
        )
        .expect("unique ids")
    }

    fn viewport() -> Viewport {
        Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    fn single() -> TooltipController<MarkerId> {
        TooltipController::new(TooltipConfig::default(), Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = MarkerLayer::new(
            vec![
                Marker::new(MarkerId(7), Point::ZERO, "base", "a"),
                Marker::new(MarkerId(7), Point::ZERO, "base", "b"),
            ],
            metrics(),
        )
        .unwrap_err();
        assert_eq!(err, MarkerError::DuplicateId(MarkerId(7)));
    }

    #[test]
    fn draw_divides_asset_metrics_by_scale() {
        let mut l = MarkerLayer::new(
            vec![Marker::new(MarkerId(0), Point::ZERO, "base", "m")],
            metrics(),
        )
        .expect("unique ids");

        l.draw(1.0);
        let g = l.geometry()[0];
        assert_eq!(g.origin, Point::new(-31.0, -55.0));
        assert_eq!((g.width, g.height), (Some(60.0), Some(60.0)));

        l.draw(2.0);
        let g = l.geometry()[0];
        assert_eq!(g.origin, Point::new(-15.5, -27.5));
        assert_eq!((g.width, g.height), (Some(30.0), Some(30.0)));
        assert_eq!(g.hit_target(), Rect::new(-15.5, -27.5, 14.5, 2.5));
    }

    #[test]
    fn unknown_kind_still_draws_at_its_position() {
        let mut l = MarkerLayer::new(
            vec![Marker::new(MarkerId(0), Point::new(5.0, 6.0), "ghost", "m")],
            metrics(),
        )
        .expect("unique ids");
        l.draw(3.0);
        let g = l.geometry()[0];
        assert_eq!(g.origin, Point::new(5.0, 6.0));
        assert_eq!((g.width, g.height), (None, None));
        assert_eq!(g.hit_target().area(), 0.0);
    }

    #[test]
    fn screen_data_applies_offsets() {
        let l = layer();
        let d = l.screen_data(MarkerId(0), 2.0).expect("known id");
        assert_eq!((d.x, d.y), (84.5, 72.5));
        // The tooltip point starts from the raw position, not the icon origin.
        assert_eq!((d.tooltip_x, d.tooltip_y), (100.0, 105.0));
        assert_eq!(d.hit_target.size().width, 30.0);
        assert!(l.screen_data(MarkerId(99), 2.0).is_none());
    }

    #[test]
    fn screen_data_tooltip_point_ignores_scale() {
        let mut m = metrics();
        m.insert(
            "tipped",
            AssetDescriptor {
                url: "pin.svg".into(),
                width: Some(60.0),
                height: Some(60.0),
                offset: Some([-31.0, -55.0]),
                tooltip_offset: Some([4.0, 8.0]),
            },
        );
        let l = MarkerLayer::new(
            vec![Marker::new(MarkerId(1), Point::new(100.0, 100.0), "tipped", "m")],
            m,
        )
        .expect("unique ids");
        let d = l.screen_data(MarkerId(1), 1.0).expect("known id");
        assert_eq!((d.x, d.y), (69.0, 45.0));
        assert_eq!((d.tooltip_x, d.tooltip_y), (104.0, 108.0));

        let d = l.screen_data(MarkerId(1), 4.0).expect("known id");
        assert_eq!((d.x, d.y), (92.25, 86.25));
        assert_eq!((d.tooltip_x, d.tooltip_y), (104.0, 108.0));
    }

    #[test]
    fn screen_data_does_not_need_a_draw() {
        let l = layer();
        assert!(!l.is_drawn());
        let d = l.screen_data(MarkerId(0), 2.0).expect("known id");
        assert_eq!(d.hit_target, Rect::new(84.5, 72.5, 114.5, 102.5));
    }

    #[test]
    fn footprint_ignores_current_scale() {
        let mut l = layer();
        l.draw(4.0);
        assert_eq!(
            l.footprint(MarkerId(0)),
            Some(Rect::new(69.0, 45.0, 129.0, 105.0))
        );
    }

    #[test]
    fn hit_test_picks_the_topmost_marker() {
        let mut l = layer();
        l.draw(1.0);
        // Markers 0 and 1 overlap here; 1 is later in z-order.
        assert_eq!(l.hit_test(Point::new(90.0, 70.0)), Some(MarkerId(1)));
        assert_eq!(l.hit_test(Point::new(72.0, 48.0)), Some(MarkerId(0)));
        assert_eq!(l.hit_test(Point::new(700.0, 500.0)), None);
    }

    #[test]
    fn click_toggles_tooltip_and_bounces() {
        let mut l = layer();
        let vp = viewport();
        let mut tips = single();
        l.draw(vp.scale());

        let clicked = l
            .on_hit_target_clicked(MarkerId(0), &vp, &mut tips)
            .expect("known id");
        assert!(clicked.tooltip_opened);
        assert_eq!((clicked.x, clicked.y), (69.0, 45.0));
        assert_eq!(clicked.marker.name, "Marker 1");
        assert!(tips.contains(&MarkerId(0)));
        assert!(l.is_bouncing(MarkerId(0)));

        let again = l
            .on_hit_target_clicked(MarkerId(0), &vp, &mut tips)
            .expect("known id");
        assert!(!again.tooltip_opened);
        assert!(tips.is_empty());
        assert!(l.is_bouncing(MarkerId(0)));
    }

    #[test]
    fn clicking_another_marker_replaces_in_single_mode() {
        let mut l = layer();
        let vp = viewport();
        let mut tips = single();
        l.draw(1.0);

        l.on_hit_target_clicked(MarkerId(0), &vp, &mut tips)
            .expect("known id");
        l.on_hit_target_clicked(MarkerId(2), &vp, &mut tips)
            .expect("known id");

        assert_eq!(tips.keys(), vec![MarkerId(2)]);
        let notices = tips.drain_notices();
        assert!(matches!(notices[0], TooltipNotice::Shown { key: MarkerId(0), .. }));
        assert!(matches!(notices[1], TooltipNotice::Hidden { key: MarkerId(0), .. }));
        assert!(matches!(notices[2], TooltipNotice::Shown { key: MarkerId(2), .. }));
    }

    #[test]
    fn unknown_marker_click_is_an_error() {
        let mut l = layer();
        let mut tips = single();
        let err = l
            .on_hit_target_clicked(MarkerId(42), &viewport(), &mut tips)
            .unwrap_err();
        assert_eq!(err, MarkerError::UnknownMarker(MarkerId(42)));
        assert!(tips.is_empty());
    }

    #[test]
    fn tooltip_anchor_uses_absolute_coordinates() {
        let l = layer();
        let vp = Viewport::new(Rect::new(20.0, 30.0, 820.0, 630.0));
        let mut tips = single();
        l.show_tooltip(MarkerId(0), &vp, &mut tips)
            .expect("known id");
        // Hit-target (69,45)-(129,105) shifted by the surface origin, anchored
        // below its center plus the tooltip offset.
        let pos = tips.get(&MarkerId(0)).expect("open").position();
        assert_eq!(pos, Point::new(119.0, 140.0));
    }

    #[test]
    fn reposition_follows_and_removes() {
        let mut l = layer();
        let mut vp = viewport();
        let mut tips = single();
        l.draw(1.0);
        l.show_tooltip(MarkerId(0), &vp, &mut tips)
            .expect("known id");
        let before = tips.get(&MarkerId(0)).expect("open").position();

        vp.apply_transform(
            ViewTransform::new(50.0, 0.0, 1.0),
            Motion::Snap,
            &mut (),
        );
        l.draw(vp.scale());
        l.reposition_tooltips(&vp, &mut tips);
        let after = tips.get(&MarkerId(0)).expect("still open").position();
        assert_eq!(after - before, Vec2::new(50.0, 0.0));

        vp.apply_transform(
            ViewTransform::new(-5000.0, 0.0, MAX_SCALE),
            Motion::Snap,
            &mut (),
        );
        l.draw(vp.scale());
        l.reposition_tooltips(&vp, &mut tips);
        assert!(tips.is_empty());
    }

    #[test]
    fn bounce_lifts_icon_in_screen_pixels() {
        let mut l = layer();
        let vp = viewport();
        let mut tips = single();
        l.draw(2.0);
        l.on_hit_target_clicked(MarkerId(2), &vp, &mut tips)
            .expect("known id");

        assert!(l.advance(BOUNCE_RISE));
        let g = l.geometry()[2];
        assert!((g.lift - BOUNCE_HEIGHT / 2.0).abs() < 1e-9);
        // The hit-target does not move with the icon.
        assert_eq!(g.hit_target().origin(), g.origin);
        assert!(g.icon_origin().y < g.origin.y);

        assert!(!l.advance(Duration::from_millis(100)));
        assert!(!l.is_bouncing(MarkerId(2)));
        assert!(l.geometry()[2].lift.abs() < 1e-9);
    }
}
