// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor feedback during gestures and the first-paint fade.

use core::time::Duration;

use pinmap_view::ViewTransform;

/// How long a wheel cursor lingers before returning to [`Cursor::Grab`].
pub const WHEEL_SETTLE: Duration = Duration::from_millis(50);

/// Duration of the opacity reveal once the map is loaded.
pub const REVEAL_DURATION: Duration = Duration::from_millis(250);

/// Pointer cursor the host should show over the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Idle.
    #[default]
    Grab,
    /// Dragging.
    Grabbing,
    /// Wheel zooming in.
    ZoomIn,
    /// Wheel zooming out.
    ZoomOut,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
        }
    }
}

/// Raw input that produced a gesture update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSource {
    /// A pointer drag.
    PointerMove,
    /// A wheel step; negative `delta_y` zooms in.
    Wheel {
        /// Vertical wheel delta.
        delta_y: f64,
    },
    /// Anything else (touch pinch, keyboard, programmatic).
    Other,
}

/// One step of a pan/zoom gesture, as computed by the host's recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureUpdate {
    /// Transform the gesture wants.
    pub transform: ViewTransform,
    /// What produced it.
    pub source: GestureSource,
}

/// Cursor state machine with a short settle timer after wheel input.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorFeedback {
    cursor: Cursor,
    settle: Option<Duration>,
}

impl CursorFeedback {
    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns `true` while the wheel settle timer runs.
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Reacts to a gesture step. Any pending settle timer is cancelled first.
    pub fn on_gesture(&mut self, source: GestureSource) {
        self.settle = None;
        match source {
            GestureSource::PointerMove => self.cursor = Cursor::Grabbing,
            GestureSource::Wheel { delta_y } => {
                self.cursor = if delta_y < 0.0 {
                    Cursor::ZoomIn
                } else {
                    Cursor::ZoomOut
                };
                self.settle = Some(WHEEL_SETTLE);
            }
            GestureSource::Other => {}
        }
    }

    /// Pointer released: back to idle, timer cancelled.
    pub fn pointer_released(&mut self) {
        self.cursor = Cursor::Grab;
        self.settle = None;
    }

    /// Runs the settle timer. Returns `true` if the cursor changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.settle else {
            return false;
        };
        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.settle = None;
            let changed = self.cursor != Cursor::Grab;
            self.cursor = Cursor::Grab;
            changed
        } else {
            self.settle = Some(remaining);
            false
        }
    }
}

/// Opacity fade from 0 to 1, started once when the map becomes ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reveal {
    elapsed: Option<Duration>,
}

impl Reveal {
    /// Starts the fade. Later calls do nothing.
    pub fn start(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(Duration::ZERO);
        }
    }

    /// Returns `true` once started.
    pub fn is_started(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Advances the fade. Returns `true` while it is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        match &mut self.elapsed {
            Some(e) if *e < REVEAL_DURATION => {
                *e = e.saturating_add(dt).min(REVEAL_DURATION);
                *e < REVEAL_DURATION
            }
            _ => false,
        }
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        match self.elapsed {
            None => 0.0,
            Some(e) => (e.as_secs_f64() / REVEAL_DURATION.as_secs_f64()).min(1.0),
        }
    }
}
