// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host construction config.

use std::collections::BTreeMap;

use pinmap_markers::{AssetDescriptor, AssetMetrics, Marker, MarkerError};
use pinmap_tooltip::TooltipConfig;
use serde::{Deserialize, Serialize};

/// Errors rejecting a config at construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON did not match the config shape.
    #[error("malformed map config: {0}")]
    Json(#[from] serde_json::Error),
    /// The marker layer rejected the records, e.g. two markers share an id.
    #[error(transparent)]
    Markers(#[from] MarkerError),
    /// The background image has no area.
    #[error("image size must be positive, got {width}x{height}")]
    InvalidImageSize {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
}

/// Background image description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Intrinsic width; also the width of content space.
    pub width: f64,
    /// Intrinsic height; also the height of content space.
    pub height: f64,
    /// Where the host loads the image from.
    pub path: String,
}

/// Everything a host supplies to build a map.
///
/// Field names follow the host-facing JSON shape:
///
/// ```json
/// {
///   "containerId": "floorplan",
///   "imageData": { "width": 1454, "height": 1122, "path": "map.jpeg" },
///   "markersData": [{ "x": 0, "y": 0, "marker": "base", "name": "Marker 1", "id": 0 }],
///   "assets": { "base": { "url": "pin.svg", "width": 60, "height": 60, "offset": [-31, -55] } },
///   "multiSelectionMode": false
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Host element the map is mounted in.
    pub container_id: String,
    /// Background image.
    pub image_data: ImageData,
    /// Markers in z-order.
    #[serde(default)]
    pub markers_data: Vec<Marker>,
    /// Asset descriptors by kind.
    #[serde(default)]
    pub assets: BTreeMap<String, AssetDescriptor>,
    /// Allow several tooltips at once.
    #[serde(default)]
    pub multi_selection_mode: bool,
}

impl MapConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the image size. Marker ids are checked when the marker layer
    /// is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ImageData { width, height, .. } = self.image_data;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidImageSize { width, height });
        }
        Ok(())
    }

    /// Asset metrics table built from [`Self::assets`].
    pub fn metrics(&self) -> AssetMetrics {
        self.assets
            .iter()
            .map(|(kind, d)| (kind.clone(), d.clone()))
            .collect()
    }

    /// Tooltip tunables for this config.
    pub fn tooltip_config(&self) -> TooltipConfig {
        TooltipConfig {
            multi_selection: self.multi_selection_mode,
            ..TooltipConfig::default()
        }
    }
}
