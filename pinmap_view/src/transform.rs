// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Smallest scale the viewport will commit.
pub const MIN_SCALE: f64 = 0.5;
/// Largest scale the viewport will commit.
pub const MAX_SCALE: f64 = 4.0;

/// Translate + uniform scale mapping content space into display space.
///
/// `display = translate + content * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ViewTransform {
    /// Horizontal translation in display pixels.
    pub translate_x: f64,
    /// Vertical translation in display pixels.
    pub translate_y: f64,
    /// Uniform scale factor (`k`).
    pub scale: f64,
}

impl ViewTransform {
    /// No translation, scale `1.0`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a transform from its components.
    #[must_use]
    pub const fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Returns the translation as a vector.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Returns the equivalent affine matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate()) * Affine::scale(self.scale)
    }

    /// Maps a content-space point into display space.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(
            self.translate_x + pt.x * self.scale,
            self.translate_y + pt.y * self.scale,
        )
    }

    /// Maps a display-space point back into content space.
    ///
    /// A zero scale cannot occur for committed transforms; it maps everything
    /// to the origin rather than producing non-finite values.
    #[must_use]
    pub fn invert(&self, pt: Point) -> Point {
        if self.scale == 0.0 {
            return Point::ZERO;
        }
        Point::new(
            (pt.x - self.translate_x) / self.scale,
            (pt.y - self.translate_y) / self.scale,
        )
    }

    /// Component-wise linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.translate_x + (other.translate_x - self.translate_x) * t,
            self.translate_y + (other.translate_y - self.translate_y) * t,
            self.scale + (other.scale - self.scale) * t,
        )
    }

    /// Returns `true` if every component differs by less than `eps`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.translate_x - other.translate_x).abs() < eps
            && (self.translate_y - other.translate_y).abs() < eps
            && (self.scale - other.scale).abs() < eps
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inclusive scale range enforced on every commit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleExtent {
    min: f64,
    max: f64,
}

impl ScaleExtent {
    /// Creates an extent, normalizing the bounds so that `min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the extent. Non-finite input falls back to the
    /// nearest sensible bound (`NaN` maps to `min`).
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// Returns `true` if `scale` lies within the extent.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
        }
    }
}
