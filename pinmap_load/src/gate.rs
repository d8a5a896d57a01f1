// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Conditions recorded so far.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LoadState: u8 {
        /// The background image finished loading.
        const IMAGE  = 0b0000_0001;
        /// Every marker symbol is registered.
        const ASSETS = 0b0000_0010;
    }
}

/// One of the two conditions gating first paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadCondition {
    /// Background image loaded.
    Image,
    /// Asset batch loaded.
    Assets,
}

impl LoadCondition {
    fn flag(self) -> LoadState {
        match self {
            Self::Image => LoadState::IMAGE,
            Self::Assets => LoadState::ASSETS,
        }
    }
}

/// Outcome of [`LoadGate::signal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The condition was already recorded.
    Ignored,
    /// The condition was recorded; the other one is still pending.
    Recorded,
    /// The condition completed the pair. Returned once per gate.
    Opened,
}

/// Barrier that opens once both the image and the assets are loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadGate {
    state: LoadState,
}

impl LoadGate {
    /// A closed gate with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `condition`.
    pub fn signal(&mut self, condition: LoadCondition) -> Signal {
        let flag = condition.flag();
        if self.state.contains(flag) {
            return Signal::Ignored;
        }
        self.state.insert(flag);
        if self.state.is_all() {
            Signal::Opened
        } else {
            Signal::Recorded
        }
    }

    /// Returns `true` once both conditions are recorded.
    pub fn is_ready(&self) -> bool {
        self.state.is_all()
    }

    /// Conditions recorded so far.
    pub fn state(&self) -> LoadState {
        self.state
    }
}
