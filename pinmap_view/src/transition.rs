// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-sliced interpolation between two transforms.

use core::time::Duration;

use crate::ViewTransform;

/// Easing function signature: maps `t` in `[0, 1]` to output in `[0, 1]`.
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in-out (slow start and end).
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 - 2.0 * t;
        1.0 - u * u * u / 2.0
    }
}

/// An in-flight move from one transform to another.
///
/// Elapsed time is accumulated as a [`Duration`]; callers advance it with
/// [`Transition::tick`] and read the interpolated transform with
/// [`Transition::sample`].
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    from: ViewTransform,
    to: ViewTransform,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Transition {
    /// Creates a transition with cubic in-out easing.
    ///
    /// A zero duration is bumped to one nanosecond so the first tick completes it.
    #[must_use]
    pub fn new(from: ViewTransform, to: ViewTransform, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_cubic_in_out,
        }
    }

    /// Sets the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advances the transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Linear progress before easing, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Transform at the current point of the transition.
    #[must_use]
    pub fn sample(&self) -> ViewTransform {
        if self.is_complete() {
            return self.to;
        }
        self.from.lerp(&self.to, (self.easing)(self.progress()))
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Transform the transition ends on.
    #[must_use]
    pub fn target(&self) -> ViewTransform {
        self.to
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
