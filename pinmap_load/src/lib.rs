// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap_load --heading-base-level=0

//! Pinmap Load: the first-paint barrier and asset batch loading.
//!
//! A map must not draw markers until both the background image and every
//! marker symbol are available. [`LoadGate`] records the two conditions as
//! monotonic flags and reports [`Signal::Opened`] exactly once, for whichever
//! signal completes the pair. Repeated signals are ignored.
//!
//! ```rust
//! use pinmap_load::{LoadCondition, LoadGate, Signal};
//!
//! let mut gate = LoadGate::new();
//! assert_eq!(gate.signal(LoadCondition::Assets), Signal::Recorded);
//! assert_eq!(gate.signal(LoadCondition::Assets), Signal::Ignored);
//! assert_eq!(gate.signal(LoadCondition::Image), Signal::Opened);
//! assert!(gate.is_ready());
//! ```
//!
//! Symbols are fetched through an [`AssetSource`], which hides the transport.
//! [`load_symbols`] starts every fetch at once and joins them; the first
//! failure aborts the batch and nothing is registered.
//!
//! ```rust
//! use pinmap_load::{AssetSource, FetchError, load_symbols};
//!
//! struct Inline;
//!
//! impl AssetSource for Inline {
//!     async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
//!         Ok(url.as_bytes().to_vec())
//!     }
//! }
//!
//! let registry = pollster::block_on(load_symbols(&Inline, [("base", "pin.svg")])).unwrap();
//! assert_eq!(registry.get("base").unwrap().href(), "#base");
//! ```

mod gate;
mod symbols;

pub use gate::{LoadCondition, LoadGate, LoadState, Signal};
pub use symbols::{AssetLoadError, AssetSource, FetchError, Symbol, SymbolRegistry, load_symbols};
