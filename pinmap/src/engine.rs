// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain state behind the facade.

use core::time::Duration;

use kurbo::{Point, Rect, Size};
use pinmap_bus::{Message, Topic};
use pinmap_load::{LoadCondition, LoadGate, LoadState, Signal, SymbolRegistry};
use pinmap_markers::{MarkerError, MarkerId, MarkerLayer, MarkerScreenData};
use pinmap_tooltip::{ContentHandle, TooltipController, TooltipNotice};
use pinmap_view::{DEFAULT_TRANSITION, Motion, TransformObserver, Viewport};

use crate::api::{
    Action, ApiError, AssetLoadEvent, Event, EventTopic, MarkerClickEvent, PanZoomEvent,
    TooltipHideEvent, TooltipPosition, TooltipShowEvent,
};
use crate::config::{ConfigError, ImageData, MapConfig};
use crate::feedback::{Cursor, CursorFeedback, GestureUpdate, Reveal};

/// Zoom level used by `zoomToMarker`.
pub const MARKER_ZOOM: f64 = 3.0;

/// The two transform listeners, notified in this order on every commit.
#[derive(Debug)]
struct Scene {
    markers: MarkerLayer,
    tooltips: TooltipController<MarkerId>,
    ready: bool,
}

impl TransformObserver for Scene {
    fn transform_committed(&mut self, viewport: &Viewport) {
        if self.ready {
            self.markers.draw(viewport.scale());
        }
        self.markers.reposition_tooltips(viewport, &mut self.tooltips);
    }
}

/// Viewport, markers, tooltips, and load state of one map.
///
/// Every mutating call propagates synchronously: the viewport commits, markers
/// redraw, tooltips follow, and the resulting events are queued before the
/// call returns. [`crate::ImageMap`] drains the queue into its bus.
#[derive(Debug)]
pub struct Engine {
    container_id: String,
    image: ImageData,
    viewport: Viewport,
    scene: Scene,
    gate: LoadGate,
    symbols: SymbolRegistry,
    cursor: CursorFeedback,
    reveal: Reveal,
    outbox: Vec<Event>,
    last_error: Option<ApiError>,
}

impl Engine {
    /// Builds an engine. The surface and frame start out as the image bounds
    /// until the host reports its layout with [`Self::resize`].
    pub fn new(config: &MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let markers = MarkerLayer::new(config.markers_data.clone(), config.metrics())?;
        let image = config.image_data.clone();
        let bounds = Rect::from_origin_size(Point::ZERO, Size::new(image.width, image.height));
        Ok(Self {
            container_id: config.container_id.clone(),
            image,
            viewport: Viewport::new(bounds),
            scene: Scene {
                markers,
                tooltips: TooltipController::new(config.tooltip_config(), bounds),
                ready: false,
            },
            gate: LoadGate::new(),
            symbols: SymbolRegistry::new(),
            cursor: CursorFeedback::default(),
            reveal: Reveal::default(),
            outbox: Vec::new(),
            last_error: None,
        })
    }

    /// Host element id.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Background image.
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Marker layer.
    pub fn markers(&self) -> &MarkerLayer {
        &self.scene.markers
    }

    /// Tooltip controller.
    pub fn tooltips(&self) -> &TooltipController<MarkerId> {
        &self.scene.tooltips
    }

    /// Load barrier.
    pub fn gate(&self) -> &LoadGate {
        &self.gate
    }

    /// Registered marker symbols.
    pub fn symbols(&self) -> &SymbolRegistry {
        &self.symbols
    }

    /// Cursor to show.
    pub fn cursor(&self) -> Cursor {
        self.cursor.cursor()
    }

    /// Map opacity; `0` until loaded, then fading in.
    pub fn opacity(&self) -> f64 {
        self.reveal.opacity()
    }

    /// Returns `true` once image and assets are both loaded.
    pub fn is_ready(&self) -> bool {
        self.scene.ready
    }

    /// Runs `action`. Failures are logged and returned.
    pub fn perform(&mut self, action: &Action) -> Result<(), ApiError> {
        let result = self.run(action);
        if let Err(e) = &result {
            tracing::warn!(action = action.topic().name(), error = %e, "action failed");
        }
        result
    }

    /// Like [`Self::perform`], keeping the failure for [`Self::take_error`].
    ///
    /// Bus handlers cannot return values, so this is what they call.
    pub fn perform_recorded(&mut self, action: &Action) {
        if let Err(e) = self.perform(action) {
            self.last_error = Some(e);
        }
    }

    /// Takes the failure recorded by the last [`Self::perform_recorded`].
    pub fn take_error(&mut self) -> Option<ApiError> {
        self.last_error.take()
    }

    /// Applies one gesture step immediately and updates the cursor.
    pub fn apply_gesture(&mut self, update: GestureUpdate) {
        self.cursor.on_gesture(update.source);
        self.move_viewport(|vp, scene| vp.apply_transform(update.transform, Motion::Snap, scene));
    }

    /// Pointer released: cursor back to idle, settle timer cancelled.
    pub fn pointer_released(&mut self) {
        self.cursor.pointer_released();
    }

    /// Clicks whatever marker is topmost under `pt` (absolute coordinates).
    ///
    /// Nothing is clickable before the map is loaded.
    pub fn click_at(&mut self, pt: Point) -> Option<MarkerId> {
        if !self.scene.ready {
            return None;
        }
        let content = self.viewport.absolute_to_content_point(pt);
        let id = self.scene.markers.hit_test(content)?;
        match self.click_marker(id) {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!(%id, error = %e, "click failed");
                None
            }
        }
    }

    /// Clicks `id`'s hit-target: toggles its tooltip and bounces it.
    ///
    /// Before the map is loaded no hit-targets exist, so the click is ignored.
    pub fn click_marker(&mut self, id: MarkerId) -> Result<(), ApiError> {
        if !self.scene.ready {
            tracing::debug!(%id, "click before load ignored");
            return Ok(());
        }
        let clicked = self
            .scene
            .markers
            .on_hit_target_clicked(id, &self.viewport, &mut self.scene.tooltips)?;
        let mut data = clicked.marker;
        data.x = clicked.x;
        data.y = clicked.y;
        self.outbox.push(Event::MarkerClick(MarkerClickEvent {
            data,
            tooltip_opened: clicked.tooltip_opened,
        }));
        self.flush_notices();
        Ok(())
    }

    /// New surface and frame rects (absolute). Tooltips follow their markers
    /// and are removed if they left the surface; nothing is resized.
    pub fn resize(&mut self, surface: Rect, frame: Rect) {
        self.viewport.set_surface(surface);
        self.scene.tooltips.set_frame(frame);
        self.scene
            .markers
            .reposition_tooltips(&self.viewport, &mut self.scene.tooltips);
        self.flush_notices();
    }

    /// Host measured a tooltip's content box.
    pub fn set_content_bounds(&mut self, content: ContentHandle, bounds: Rect) {
        self.scene.tooltips.set_content_bounds(content, bounds);
    }

    /// Background image finished loading.
    pub fn image_loaded(&mut self) {
        match self.gate.signal(LoadCondition::Image) {
            Signal::Ignored => {}
            Signal::Recorded => self.outbox.push(Event::ImageLoad),
            Signal::Opened => {
                self.outbox.push(Event::ImageLoad);
                self.open();
            }
        }
    }

    /// Asset batch finished loading.
    pub fn assets_loaded(&mut self, symbols: SymbolRegistry) {
        if self.gate.state().contains(LoadState::ASSETS) {
            tracing::debug!("assets already loaded");
            return;
        }
        let kinds = symbols.kinds().into_iter().map(str::to_owned).collect();
        self.symbols = symbols;
        self.outbox.push(Event::AssetLoad(AssetLoadEvent { kinds }));
        if self.gate.signal(LoadCondition::Assets) == Signal::Opened {
            self.open();
        }
    }

    /// Advances transitions, bounces, the cursor timer, and the reveal.
    ///
    /// Returns `true` while any of them is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.move_viewport(|vp, scene| {
            vp.advance(dt, scene);
        });
        let bouncing = self.scene.markers.advance(dt);
        self.cursor.advance(dt);
        let fading = self.reveal.advance(dt);
        self.viewport.is_animating() || bouncing || fading || self.cursor.is_settling()
    }

    /// Screen data for `id` at the current scale.
    pub fn marker_screen_data(&self, id: MarkerId) -> Option<MarkerScreenData> {
        self.scene.markers.screen_data(id, self.viewport.scale())
    }

    /// The `topic` event describing current state, for topics that have one.
    pub fn current_event(&self, topic: EventTopic) -> Option<Event> {
        match topic {
            EventTopic::PanZoom => Some(Event::PanZoom(PanZoomEvent {
                transform: self.viewport.transform(),
            })),
            EventTopic::AssetLoad => Some(Event::AssetLoad(AssetLoadEvent {
                kinds: self.symbols.kinds().into_iter().map(str::to_owned).collect(),
            })),
            _ => None,
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.outbox)
    }

    fn run(&mut self, action: &Action) -> Result<(), ApiError> {
        match *action {
            Action::ZoomToMarker(id) => {
                let focal = self
                    .scene
                    .markers
                    .get(id)
                    .ok_or(MarkerError::UnknownMarker(id))?
                    .position();
                self.move_viewport(|vp, scene| {
                    vp.pan_zoom_to(focal, MARKER_ZOOM, DEFAULT_TRANSITION, scene);
                });
            }
            Action::ZoomToContainElement(id) => {
                let rect = self
                    .scene
                    .markers
                    .footprint(id)
                    .ok_or(MarkerError::UnknownMarker(id))?;
                self.move_viewport(|vp, scene| vp.fit_rect(rect, DEFAULT_TRANSITION, scene));
            }
            Action::ZoomToPosition(t) => {
                let focal = Point::new(t.x, t.y);
                self.move_viewport(|vp, scene| {
                    vp.pan_zoom_to(focal, t.zoom_level, DEFAULT_TRANSITION, scene);
                });
            }
            Action::CenterMap => {
                self.move_viewport(|vp, scene| vp.center_and_reset(DEFAULT_TRANSITION, scene));
            }
            Action::RemoveTooltip(id) => {
                self.scene.tooltips.close(&id)?;
                self.flush_notices();
            }
            Action::ShowTooltip(id) => {
                self.scene
                    .markers
                    .show_tooltip(id, &self.viewport, &mut self.scene.tooltips)?;
                self.flush_notices();
            }
        }
        Ok(())
    }

    /// Runs a viewport operation with the scene as observer, then queues one
    /// `onPanZoom` if anything was committed.
    fn move_viewport(&mut self, f: impl FnOnce(&mut Viewport, &mut Scene)) {
        let before = self.viewport.revision();
        f(&mut self.viewport, &mut self.scene);
        if self.viewport.revision() != before {
            self.outbox.push(Event::PanZoom(PanZoomEvent {
                transform: self.viewport.transform(),
            }));
        }
        self.flush_notices();
    }

    fn open(&mut self) {
        self.scene.ready = true;
        self.scene.markers.draw(self.viewport.scale());
        self.reveal.start();
        self.outbox.push(Event::Load);
    }

    fn flush_notices(&mut self) {
        for notice in self.scene.tooltips.drain_notices() {
            let Some(marker) = self.scene.markers.get(notice.key()).cloned() else {
                tracing::debug!(key = %notice.key(), "tooltip notice for unknown marker");
                continue;
            };
            self.outbox.push(match notice {
                TooltipNotice::Shown {
                    content, position, ..
                } => Event::TooltipShow(TooltipShowEvent {
                    data: marker,
                    content,
                    position: TooltipPosition {
                        top: position.y,
                        left: position.x,
                    },
                }),
                TooltipNotice::Hidden { content, .. } => {
                    Event::TooltipHide(TooltipHideEvent {
                        data: marker,
                        content,
                    })
                }
            });
        }
    }
}
