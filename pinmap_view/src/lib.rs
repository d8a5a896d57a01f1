// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap_view --heading-base-level=0

//! Pinmap View: the viewport model behind a pannable, zoomable image map.
//!
//! This crate owns the single piece of state every other Pinmap layer reads
//! per frame: the current [`ViewTransform`] mapping content space (the
//! image's native pixel grid) into display space (the surface the host
//! renders into). It focuses on:
//! - A translate + uniform scale transform with a bounded scale range.
//! - Programmatic moves: centering a content point at a zoom level, fitting a
//!   content rectangle, and recentering to the identity.
//! - Time-sliced transitions that the host advances once per frame.
//! - Synchronous commit notification through [`TransformObserver`].
//!
//! Three coordinate spaces are involved:
//! - **Content space**: marker and image coordinates, independent of zoom.
//! - **Display space**: `translate + content * scale`, relative to the surface origin.
//! - **Absolute space**: display space offset by the surface's position in
//!   the host window; floating overlays are placed here.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use pinmap_view::Viewport;
//!
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Center content point (100, 100) at zoom 3, without animating.
//! view.pan_zoom_to(Point::new(100.0, 100.0), 3.0, Duration::ZERO, &mut ());
//! let center = view.content_to_display_point(Point::new(100.0, 100.0));
//! assert!((center.x - 400.0).abs() < 1e-9);
//! assert!((center.y - 300.0).abs() < 1e-9);
//!
//! // Out-of-range scales are clamped, never rejected.
//! view.pan_zoom_to(Point::ZERO, 40.0, Duration::ZERO, &mut ());
//! assert_eq!(view.transform().scale, 4.0);
//! ```
//!
//! ## Observing commits
//!
//! Every method that may change the transform takes a `&mut impl
//! TransformObserver`. The observer runs once per commit, before the method
//! returns, so dependent geometry never lags the transform. Pass `&mut ()`
//! when nothing needs to react.
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use pinmap_view::{TransformObserver, Viewport};
//!
//! #[derive(Default)]
//! struct Counter(u32);
//!
//! impl TransformObserver for Counter {
//!     fn transform_committed(&mut self, _viewport: &Viewport) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 400.0, 400.0));
//! let mut counter = Counter::default();
//!
//! view.center_and_reset(Duration::from_millis(100), &mut counter);
//! // Already at the identity: nothing to animate, nothing committed.
//! assert_eq!(counter.0, 0);
//!
//! view.pan_zoom_to(Point::new(10.0, 10.0), 2.0, Duration::from_millis(100), &mut counter);
//! view.advance(Duration::from_millis(50), &mut counter);
//! view.advance(Duration::from_millis(50), &mut counter);
//! assert_eq!(counter.0, 2);
//! assert!(!view.is_animating());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod transform;
mod transition;
mod viewport;

pub use transform::{MAX_SCALE, MIN_SCALE, ScaleExtent, ViewTransform};
pub use transition::{EasingFn, Transition, ease_cubic_in_out, linear};
pub use viewport::{DEFAULT_TRANSITION, Motion, TransformObserver, Viewport, ViewportDebugInfo};
