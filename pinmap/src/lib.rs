// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap --heading-base-level=0

//! Pinmap: a headless image-map engine.
//!
//! A large background image is shown as a pannable, zoomable surface with
//! markers pinned to it and tooltips floating over them. Pinmap computes the
//! geometry, lifecycle, and events; the host renders.
//!
//! The workspace is split by concern:
//!
//! - [`pinmap_view`]: the bounded pan/zoom transform and its transitions.
//! - [`pinmap_markers`]: markers whose icons keep a constant screen size.
//! - [`pinmap_tooltip`]: overlay placement, boundary removal, and clamping.
//! - [`pinmap_load`]: the first-paint barrier and asset loading.
//! - [`pinmap_bus`]: typed action/event routing.
//!
//! This crate wires them into [`ImageMap`]. Hosts drive it with actions
//! (`zoom_to_marker`, `center_map`, ...), gesture updates, clicks, and frame
//! ticks, and observe it through event listeners.
//!
//! ## Coordinate spaces
//!
//! - **Content**: image pixels, independent of zoom. Markers live here.
//! - **Display**: `translate + content * scale`, relative to the surface.
//! - **Absolute**: display plus the surface origin. Tooltips live here.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use pinmap::{AssetSource, FetchError, ImageMap, MarkerId};
//!
//! struct Inline;
//!
//! impl AssetSource for Inline {
//!     async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
//!         Ok(b"<svg/>".to_vec())
//!     }
//! }
//!
//! let mut map = ImageMap::from_json(
//!     r#"{
//!         "containerId": "floorplan",
//!         "imageData": { "width": 800, "height": 600, "path": "map.png" },
//!         "markersData": [{ "x": 100, "y": 100, "marker": "base", "name": "Desk", "id": 1 }],
//!         "assets": { "base": { "url": "pin.svg", "width": 60, "height": 60, "offset": [-31, -55] } }
//!     }"#,
//! )
//! .unwrap();
//!
//! let clicks = Rc::new(RefCell::new(Vec::new()));
//! let seen = Rc::clone(&clicks);
//! map.on_marker_click(move |e| seen.borrow_mut().push(e.data.id));
//!
//! map.image_loaded();
//! pollster::block_on(map.load_assets(&Inline)).unwrap();
//! assert!(map.is_ready());
//!
//! map.click_marker(MarkerId(1)).unwrap();
//! assert_eq!(*clicks.borrow(), vec![MarkerId(1)]);
//! assert_eq!(map.tooltips().len(), 1);
//!
//! map.zoom_to_marker(MarkerId(1)).unwrap();
//! while map.advance(Duration::from_millis(16)) {}
//! assert_eq!(map.viewport().scale(), 3.0);
//! ```

mod api;
mod config;
mod engine;
mod feedback;
mod map;

pub use api::{
    Action, ActionTopic, ApiError, AssetLoadEvent, Event, EventTopic, MarkerClickEvent,
    PanZoomEvent, TooltipHideEvent, TooltipPosition, TooltipShowEvent, ZoomTarget,
};
pub use config::{ConfigError, ImageData, MapConfig};
pub use engine::{Engine, MARKER_ZOOM};
pub use feedback::{
    Cursor, CursorFeedback, GestureSource, GestureUpdate, REVEAL_DURATION, Reveal, WHEEL_SETTLE,
};
pub use map::ImageMap;

pub use pinmap_load::{AssetLoadError, AssetSource, FetchError};
pub use pinmap_markers::{Marker, MarkerId, MarkerScreenData};
pub use pinmap_view::ViewTransform;
