// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap_markers --heading-base-level=0

//! Pinmap Markers: marker records and their on-screen geometry.
//!
//! Markers live in content space, but their icons are designed in **screen**
//! pixels: an asset declaring `width: 60` should look 60 pixels wide at every
//! zoom level. Because content space is scaled by the viewport, every asset
//! size and offset is divided by the current scale `k` when it is applied in
//! content coordinates:
//!
//! ```text
//! effective_size   = asset_size   / k
//! effective_offset = asset_offset / k
//! ```
//!
//! [`MarkerLayer::draw`] recomputes this for every marker on every call; the
//! result is never reused across transform commits.
//!
//! Each marker also gets an invisible **hit-target** with the same position and
//! size as its icon. Hit-testing uses the hit-target, so transparent regions of
//! an icon still register clicks and the click bounce (which only moves the
//! icon) never shifts the clickable area.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pinmap_markers::{AssetDescriptor, AssetMetrics, Marker, MarkerId, MarkerLayer};
//!
//! let metrics: AssetMetrics = [(
//!     "base".to_string(),
//!     AssetDescriptor {
//!         url: "pin.svg".into(),
//!         width: Some(60.0),
//!         height: Some(60.0),
//!         offset: Some([-31.0, -55.0]),
//!         tooltip_offset: None,
//!     },
//! )]
//! .into_iter()
//! .collect();
//!
//! let markers = vec![Marker::new(MarkerId(0), Point::new(0.0, 0.0), "base", "Marker 1")];
//! let mut layer = MarkerLayer::new(markers, metrics).unwrap();
//!
//! layer.draw(2.0);
//! let g = &layer.geometry()[0];
//! assert_eq!(g.width, Some(30.0));
//! assert_eq!(g.origin, Point::new(-15.5, -27.5));
//! ```

mod asset;
mod bounce;
mod layer;
mod marker;

pub use asset::{AssetDescriptor, AssetMetrics};
pub use bounce::{BOUNCE_HEIGHT, BOUNCE_RISE, BOUNCE_SETTLE, Bounce};
pub use layer::{MarkerClicked, MarkerError, MarkerGeometry, MarkerLayer, MarkerScreenData};
pub use marker::{Marker, MarkerId};
