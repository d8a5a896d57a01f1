// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap_tooltip --heading-base-level=0

//! Pinmap Tooltip: lifecycle and placement of floating overlays bound to markers.
//!
//! [`TooltipController`] exclusively owns every overlay. Callers (the marker
//! layer, the engine) only ask it to open, close, or reposition an overlay for
//! a key, passing the key's current **absolute** anchor rectangle. The
//! controller:
//! - Anchors each overlay centered on the anchor rect, offset by a per-asset
//!   tooltip offset.
//! - Enforces single selection (opening one evicts the rest) unless
//!   multi-selection is enabled.
//! - Removes overlays whose anchor leaves the display surface (shrunk by a
//!   boundary margin) instead of leaving them stranded off-screen.
//! - Applies a corrective translation to the overlay content so it never
//!   overflows the window frame, independently of the anchor.
//!
//! Lifecycle changes are queued as [`TooltipNotice`]s and drained by the
//! caller, which forwards them to its event listeners.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use pinmap_tooltip::{TooltipConfig, TooltipController, TooltipNotice};
//!
//! let frame = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut tips = TooltipController::<u32>::new(TooltipConfig::default(), frame);
//!
//! let marker_rect = Rect::new(100.0, 100.0, 160.0, 160.0);
//! let handle = tips.open(7, marker_rect, Vec2::ZERO);
//!
//! // The host measures its content box (relative to the anchor point) and reports it.
//! tips.set_content_bounds(handle, Rect::new(-50.0, 0.0, 50.0, 40.0));
//!
//! let notices = tips.drain_notices();
//! assert!(matches!(notices[0], TooltipNotice::Shown { key: 7, .. }));
//! assert!(tips.contains(&7));
//! ```

mod config;
mod controller;
mod overlay;

pub use config::{DEFAULT_BOUNDARY, DEFAULT_CLAMP_INSET, Placement, TooltipConfig};
pub use controller::{Repositioned, TooltipController, TooltipError};
pub use overlay::{ContentHandle, TooltipNotice, TooltipOverlay};
