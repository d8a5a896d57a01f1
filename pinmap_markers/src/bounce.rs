// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use pinmap_view::ease_cubic_in_out;

/// Peak lift of a clicked marker icon, in screen pixels.
pub const BOUNCE_HEIGHT: f64 = 10.0;
/// Time to reach the peak.
pub const BOUNCE_RISE: Duration = Duration::from_millis(200);
/// Time to fall back to rest.
pub const BOUNCE_SETTLE: Duration = Duration::from_millis(100);

/// Click feedback: the icon rises to [`BOUNCE_HEIGHT`] and settles back.
///
/// Only the icon moves; the hit-target stays where it is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounce {
    elapsed: Duration,
}

impl Bounce {
    /// A bounce at its starting point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the animation. Returns `true` while it is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(BOUNCE_RISE + BOUNCE_SETTLE);
        !self.is_complete()
    }

    /// Current lift in screen pixels.
    pub fn lift(&self) -> f64 {
        if self.elapsed <= BOUNCE_RISE {
            let t = self.elapsed.as_secs_f64() / BOUNCE_RISE.as_secs_f64();
            BOUNCE_HEIGHT * ease_cubic_in_out(t)
        } else {
            let t = (self.elapsed - BOUNCE_RISE).as_secs_f64() / BOUNCE_SETTLE.as_secs_f64();
            BOUNCE_HEIGHT * (1.0 - ease_cubic_in_out(t))
        }
    }

    /// Returns `true` once the icon is back at rest.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= BOUNCE_RISE + BOUNCE_SETTLE
    }
}
