// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Point, Rect};
use pinmap_bus::{EventBus, Route, Topic};
use pinmap_load::{AssetLoadError, AssetSource, load_symbols};
use pinmap_markers::{MarkerId, MarkerLayer, MarkerScreenData};
use pinmap_tooltip::{ContentHandle, TooltipController};
use pinmap_view::Viewport;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{
    Action, ActionTopic, ApiError, AssetLoadEvent, Event, EventTopic, MarkerClickEvent,
    PanZoomEvent, TooltipHideEvent, TooltipShowEvent, ZoomTarget, is_empty_payload, tagged,
};
use crate::config::{ConfigError, MapConfig};
use crate::engine::Engine;
use crate::feedback::{Cursor, GestureUpdate};

/// The object a host builds: an [`Engine`] behind an [`EventBus`].
///
/// Every action is a method here and goes through the bus, so handlers the
/// host adds with [`Self::on_action`] see it too. Every event has a
/// registration method. Events queued by a call are delivered to listeners
/// before the call returns.
#[derive(Debug)]
pub struct ImageMap {
    bus: EventBus<Engine, Action, Event>,
    engine: Engine,
}

impl ImageMap {
    /// Builds a map from a parsed config.
    pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
        let engine = Engine::new(&config)?;
        let mut bus = EventBus::new();
        for &topic in ActionTopic::ALL {
            bus.register_action(topic, |action: &Action, engine: &mut Engine| {
                engine.perform_recorded(action);
            });
        }
        Ok(Self { bus, engine })
    }

    /// Builds a map from a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(MapConfig::from_json(json)?)
    }

    /// Engine state.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Viewport.
    pub fn viewport(&self) -> &Viewport {
        self.engine.viewport()
    }

    /// Marker layer.
    pub fn markers(&self) -> &MarkerLayer {
        self.engine.markers()
    }

    /// Tooltip controller.
    pub fn tooltips(&self) -> &TooltipController<MarkerId> {
        self.engine.tooltips()
    }

    /// Cursor to show.
    pub fn cursor(&self) -> Cursor {
        self.engine.cursor()
    }

    /// Map opacity.
    pub fn opacity(&self) -> f64 {
        self.engine.opacity()
    }

    /// Returns `true` once image and assets are both loaded.
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Screen data for `id`, or `None` if there is no such marker.
    pub fn marker_screen_data(&self, id: MarkerId) -> Option<MarkerScreenData> {
        self.engine.marker_screen_data(id)
    }

    // --- Actions ---

    /// Runs `action` through the bus.
    pub fn dispatch(&mut self, action: &Action) -> Result<(), ApiError> {
        self.engine.take_error();
        self.bus.dispatch(action, &mut self.engine);
        self.flush();
        self.engine.take_error().map_or(Ok(()), Err)
    }

    /// Runs the action or fires the event called `name` with a JSON payload.
    ///
    /// An event name delivers the decoded event to that topic's listeners. An
    /// empty payload for `onPanZoom` or `onAssetLoad` re-announces the current
    /// transform or symbol kinds. Unknown names and malformed payloads are
    /// logged and rejected before anything changes.
    pub fn dispatch_named(&mut self, name: &str, payload: Value) -> Result<(), ApiError> {
        match self.bus.resolve(name)? {
            Route::Action(topic) => {
                let action: Action = decode(topic.name(), payload)?;
                self.dispatch(&action)
            }
            Route::Event(topic) => {
                let event = match self.engine.current_event(topic) {
                    Some(event) if is_empty_payload(&payload) => event,
                    _ => decode(topic.name(), payload)?,
                };
                self.emit(&event);
                Ok(())
            }
        }
    }

    /// Delivers `event` to its listeners as if the map had raised it.
    pub fn emit(&mut self, event: &Event) {
        self.flush();
        self.bus.emit(event);
    }

    /// `zoomToMarker`: centers the marker at zoom level 3.
    pub fn zoom_to_marker(&mut self, id: MarkerId) -> Result<(), ApiError> {
        self.dispatch(&Action::ZoomToMarker(id))
    }

    /// `zoomToContainElement`: fits the marker's footprint.
    pub fn zoom_to_contain_element(&mut self, id: MarkerId) -> Result<(), ApiError> {
        self.dispatch(&Action::ZoomToContainElement(id))
    }

    /// `zoomToPosition`: centers a content point at `zoom_level`.
    pub fn zoom_to_position(&mut self, x: f64, y: f64, zoom_level: f64) -> Result<(), ApiError> {
        self.dispatch(&Action::ZoomToPosition(ZoomTarget { x, y, zoom_level }))
    }

    /// `centerMap`: back to the identity transform.
    pub fn center_map(&mut self) -> Result<(), ApiError> {
        self.dispatch(&Action::CenterMap)
    }

    /// `removeTooltip`.
    pub fn remove_tooltip(&mut self, id: MarkerId) -> Result<(), ApiError> {
        self.dispatch(&Action::RemoveTooltip(id))
    }

    /// `showTooltip`.
    pub fn show_tooltip(&mut self, id: MarkerId) -> Result<(), ApiError> {
        self.dispatch(&Action::ShowTooltip(id))
    }

    /// Adds an observer for an action topic. It runs after the built-in handler.
    pub fn on_action(&mut self, topic: ActionTopic, mut handler: impl FnMut(&Action) + 'static) {
        self.bus
            .register_action(topic, move |action, _: &mut Engine| handler(action));
    }

    // --- Events ---

    /// Listens to any event topic.
    pub fn on_event(&mut self, topic: EventTopic, listener: impl FnMut(&Event) + 'static) {
        self.bus.register(topic, listener);
    }

    /// Listens to the event called `name`.
    pub fn on(
        &mut self,
        name: &str,
        listener: impl FnMut(&Event) + 'static,
    ) -> Result<EventTopic, ApiError> {
        Ok(self.bus.register_named(name, listener)?)
    }

    /// Listens to several topics at once.
    pub fn on_many<I>(&mut self, listeners: I)
    where
        I: IntoIterator<Item = (EventTopic, Box<dyn FnMut(&Event)>)>,
    {
        self.bus.register_many(listeners);
    }

    /// `onImageLoad`.
    pub fn on_image_load(&mut self, mut listener: impl FnMut() + 'static) {
        self.bus.register(EventTopic::ImageLoad, move |_| listener());
    }

    /// `onAssetLoad`.
    pub fn on_asset_load(&mut self, mut listener: impl FnMut(&AssetLoadEvent) + 'static) {
        self.bus.register(EventTopic::AssetLoad, move |e| {
            if let Event::AssetLoad(p) = e {
                listener(p);
            }
        });
    }

    /// `onLoad`.
    pub fn on_load(&mut self, mut listener: impl FnMut() + 'static) {
        self.bus.register(EventTopic::Load, move |_| listener());
    }

    /// `onMarkerClick`.
    pub fn on_marker_click(&mut self, mut listener: impl FnMut(&MarkerClickEvent) + 'static) {
        self.bus.register(EventTopic::MarkerClick, move |e| {
            if let Event::MarkerClick(p) = e {
                listener(p);
            }
        });
    }

    /// `onPanZoom`.
    pub fn on_pan_zoom(&mut self, mut listener: impl FnMut(&PanZoomEvent) + 'static) {
        self.bus.register(EventTopic::PanZoom, move |e| {
            if let Event::PanZoom(p) = e {
                listener(p);
            }
        });
    }

    /// `onTooltipShow`.
    pub fn on_tooltip_show(&mut self, mut listener: impl FnMut(&TooltipShowEvent) + 'static) {
        self.bus.register(EventTopic::TooltipShow, move |e| {
            if let Event::TooltipShow(p) = e {
                listener(p);
            }
        });
    }

    /// `onTooltipHide`.
    pub fn on_tooltip_hide(&mut self, mut listener: impl FnMut(&TooltipHideEvent) + 'static) {
        self.bus.register(EventTopic::TooltipHide, move |e| {
            if let Event::TooltipHide(p) = e {
                listener(p);
            }
        });
    }

    // --- Host input ---

    /// One step of a pan/zoom gesture.
    pub fn apply_gesture(&mut self, update: GestureUpdate) {
        self.engine.apply_gesture(update);
        self.flush();
    }

    /// Pointer released.
    pub fn pointer_released(&mut self) {
        self.engine.pointer_released();
    }

    /// Click at an absolute point. Returns the marker hit, if any.
    pub fn click_at(&mut self, pt: Point) -> Option<MarkerId> {
        let hit = self.engine.click_at(pt);
        self.flush();
        hit
    }

    /// Click on a marker's hit-target.
    pub fn click_marker(&mut self, id: MarkerId) -> Result<(), ApiError> {
        let result = self.engine.click_marker(id);
        self.flush();
        result
    }

    /// Surface and frame changed size or position.
    pub fn resize(&mut self, surface: Rect, frame: Rect) {
        self.engine.resize(surface, frame);
        self.flush();
    }

    /// Host measured a tooltip's content box.
    pub fn set_content_bounds(&mut self, content: ContentHandle, bounds: Rect) {
        self.engine.set_content_bounds(content, bounds);
    }

    /// Advances every running animation by `dt`. Returns `true` while any is
    /// still running, so the host knows to schedule another frame.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let running = self.engine.advance(dt);
        self.flush();
        running
    }

    /// Background image finished loading.
    pub fn image_loaded(&mut self) {
        self.engine.image_loaded();
        self.flush();
    }

    /// Fetches every asset symbol through `source`.
    ///
    /// On failure nothing is registered and the map never finishes loading.
    pub async fn load_assets<S: AssetSource>(&mut self, source: &S) -> Result<(), AssetLoadError> {
        let sources: Vec<(String, String)> = self
            .engine
            .markers()
            .metrics()
            .sources()
            .into_iter()
            .map(|(kind, url)| (kind.to_owned(), url.to_owned()))
            .collect();
        let symbols = load_symbols(source, sources).await?;
        self.engine.assets_loaded(symbols);
        self.flush();
        Ok(())
    }

    fn flush(&mut self) {
        for event in self.engine.drain_events() {
            self.bus.emit(&event);
        }
    }
}

fn decode<T: DeserializeOwned>(name: &str, payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(tagged(name, payload)).map_err(|source| {
        tracing::error!(name, error = %source, "malformed payload");
        ApiError::Payload {
            name: name.to_owned(),
            source,
        }
    })
}
