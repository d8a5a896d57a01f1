// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Visual properties of one asset kind, as configured by the host.
///
/// Sizes and offsets are in screen pixels at scale `1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    /// Where the icon is fetched from.
    pub url: String,
    /// Icon width; absent means the renderer's intrinsic size.
    #[serde(default)]
    pub width: Option<f64>,
    /// Icon height; absent means the renderer's intrinsic size.
    #[serde(default)]
    pub height: Option<f64>,
    /// Offset of the icon's origin from the marker position.
    #[serde(default, alias = "positionOffset")]
    pub offset: Option<[f64; 2]>,
    /// Offset of the tooltip anchor from the icon's anchor point.
    #[serde(default, rename = "toolTipOffset", alias = "tooltipOffset")]
    pub tooltip_offset: Option<[f64; 2]>,
}

/// Read-only lookup of asset descriptors by kind.
///
/// Lookups of unknown kinds degrade to zero offsets and undefined sizes so a
/// marker with incomplete metadata is still drawn and clickable.
#[derive(Clone, Debug, Default)]
pub struct AssetMetrics {
    by_kind: HashMap<String, AssetDescriptor>,
}

impl AssetMetrics {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the descriptor for `kind`.
    pub fn insert(&mut self, kind: impl Into<String>, descriptor: AssetDescriptor) {
        self.by_kind.insert(kind.into(), descriptor);
    }

    /// Descriptor for `kind`, if registered.
    pub fn get(&self, kind: &str) -> Option<&AssetDescriptor> {
        self.by_kind.get(kind)
    }

    /// Returns `true` if `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.by_kind.contains_key(kind)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Returns `true` if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// `(kind, url)` pairs sorted by kind.
    pub fn sources(&self) -> Vec<(&str, &str)> {
        let mut v: Vec<_> = self
            .by_kind
            .iter()
            .map(|(kind, d)| (kind.as_str(), d.url.as_str()))
            .collect();
        v.sort_unstable();
        v
    }

    /// Icon offset in content units at scale `k`.
    pub fn marker_offset(&self, kind: &str, k: f64) -> Vec2 {
        match self.get(kind).and_then(|d| d.offset) {
            Some([dx, dy]) => Vec2::new(dx, dy) / safe_scale(k),
            None => Vec2::ZERO,
        }
    }

    /// Icon `(width, height)` in content units at scale `k`.
    pub fn marker_size(&self, kind: &str, k: f64) -> (Option<f64>, Option<f64>) {
        let k = safe_scale(k);
        match self.get(kind) {
            Some(d) => (d.width.map(|w| w / k), d.height.map(|h| h / k)),
            None => (None, None),
        }
    }

    /// Tooltip offset in screen pixels. Overlays are placed in absolute space,
    /// so this is never divided by the scale.
    pub fn tooltip_offset(&self, kind: &str) -> Vec2 {
        match self.get(kind).and_then(|d| d.tooltip_offset) {
            Some([dx, dy]) => Vec2::new(dx, dy),
            None => Vec2::ZERO,
        }
    }
}

impl FromIterator<(String, AssetDescriptor)> for AssetMetrics {
    fn from_iter<I: IntoIterator<Item = (String, AssetDescriptor)>>(iter: I) -> Self {
        Self {
            by_kind: iter.into_iter().collect(),
        }
    }
}

/// Committed scales are always positive; anything else is treated as `1`.
fn safe_scale(k: f64) -> f64 {
    if k > 0.0 && k.is_finite() { k } else { 1.0 }
}
