// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Opaque handle to an overlay's content box.
///
/// The host populates and measures the content behind this handle; the
/// controller uses it to address the overlay in [`crate::TooltipController::clamp_to_viewport`]
/// and [`crate::TooltipController::set_content_bounds`]. Handles are never reused
/// within one controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(pub(crate) u64);

impl ContentHandle {
    /// Raw handle value, stable for the overlay's lifetime.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One floating overlay bound to a key (a marker id).
#[derive(Clone, Debug)]
pub struct TooltipOverlay<K> {
    pub(crate) key: K,
    pub(crate) position: Point,
    pub(crate) tooltip_offset: Vec2,
    pub(crate) content: ContentHandle,
    pub(crate) visible: bool,
    pub(crate) content_bounds: Option<Rect>,
    pub(crate) correction: Vec2,
    pub(crate) seq: u64,
}

impl<K: Copy> TooltipOverlay<K> {
    /// Key the overlay is bound to.
    pub fn key(&self) -> K {
        self.key
    }

    /// Anchor point in absolute coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Content handle.
    pub fn content(&self) -> ContentHandle {
        self.content
    }

    /// Overlays are visible from the moment they are opened until removed.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Corrective translation currently applied to the content box.
    pub fn correction(&self) -> Vec2 {
        self.correction
    }

    /// Last reported content box, relative to the anchor point.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.content_bounds
    }

    /// Content box in absolute coordinates, including the correction.
    pub fn content_rect(&self) -> Option<Rect> {
        self.content_bounds
            .map(|b| b + self.position.to_vec2() + self.correction)
    }
}

/// Lifecycle change queued by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TooltipNotice<K> {
    /// An overlay was created.
    Shown {
        /// Key it is bound to.
        key: K,
        /// Content handle for the host to populate.
        content: ContentHandle,
        /// Anchor point in absolute coordinates.
        position: Point,
    },
    /// An overlay was removed.
    Hidden {
        /// Key it was bound to.
        key: K,
        /// Content handle that is no longer valid.
        content: ContentHandle,
    },
}

impl<K: Copy> TooltipNotice<K> {
    /// Key the notice is about.
    pub fn key(&self) -> K {
        match self {
            Self::Shown { key, .. } | Self::Hidden { key, .. } => *key,
        }
    }
}
