// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Host-assigned marker identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// One marker as configured by the host: `{x, y, marker, name, id}`.
///
/// Records are immutable once the layer is built. Their order in the layer is
/// their z-order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Unique id.
    pub id: MarkerId,
    /// Content-space x.
    pub x: f64,
    /// Content-space y.
    pub y: f64,
    /// Asset kind naming the icon and its metrics.
    #[serde(rename = "marker")]
    pub kind: String,
    /// Display name; also the default tooltip text.
    #[serde(default)]
    pub name: String,
}

impl Marker {
    /// Creates a marker record.
    pub fn new(id: MarkerId, position: Point, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Content-space position, before any asset offset.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
