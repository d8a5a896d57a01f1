// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Margin, in pixels, by which the display surface is shrunk before deciding
/// that an anchor has scrolled out of view.
pub const DEFAULT_BOUNDARY: f64 = 10.0;

/// Distance, in pixels, kept between clamped overlay content and the frame edge.
pub const DEFAULT_CLAMP_INSET: f64 = 10.0;

/// Which edge of the anchor rect an overlay hangs from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Anchor point at the bottom-center of the anchor rect.
    #[default]
    Below,
    /// Anchor point at the top-center of the anchor rect.
    Above,
}

/// Tunables for a [`crate::TooltipController`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipConfig {
    /// Allow several overlays to be open at once.
    pub multi_selection: bool,
    /// See [`DEFAULT_BOUNDARY`].
    pub boundary: f64,
    /// See [`DEFAULT_CLAMP_INSET`].
    pub clamp_inset: f64,
    /// Anchor edge.
    pub placement: Placement,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            multi_selection: false,
            boundary: DEFAULT_BOUNDARY,
            clamp_inset: DEFAULT_CLAMP_INSET,
            placement: Placement::default(),
        }
    }
}
