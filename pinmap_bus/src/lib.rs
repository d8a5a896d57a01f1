// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinmap_bus --heading-base-level=0

//! Pinmap Bus: a typed registry connecting a host to an engine.
//!
//! The bus has two namespaces:
//!
//! - **Actions** flow host → engine. Each action topic has handlers that get
//!   mutable access to a context value `C` (the engine).
//! - **Events** flow engine → host. Each event topic has listeners that observe
//!   the event by reference.
//!
//! Topics are closed enums implementing [`Topic`]; messages implement
//! [`Message`] to name their topic. Handlers and listeners are appended and
//! run in registration order. Nothing is ever removed.
//!
//! Names exist only at the edge: [`EventBus::resolve`] validates a string
//! against both namespaces and logs an error for names that match neither.
//! The bus itself holds no domain state.
//!
//! ```rust
//! use pinmap_bus::{EventBus, Message, Route, Topic};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Act { Bump }
//! impl Topic for Act {
//!     const ALL: &'static [Self] = &[Act::Bump];
//!     fn name(self) -> &'static str { "bump" }
//! }
//! struct Bump(u32);
//! impl Message for Bump {
//!     type Topic = Act;
//!     fn topic(&self) -> Act { Act::Bump }
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Ev { Bumped }
//! impl Topic for Ev {
//!     const ALL: &'static [Self] = &[Ev::Bumped];
//!     fn name(self) -> &'static str { "onBumped" }
//! }
//! struct Bumped;
//! impl Message for Bumped {
//!     type Topic = Ev;
//!     fn topic(&self) -> Ev { Ev::Bumped }
//! }
//!
//! let mut bus: EventBus<u32, Bump, Bumped> = EventBus::new();
//! bus.register_action(Act::Bump, |Bump(n), total: &mut u32| *total += n);
//!
//! let mut total = 0;
//! bus.dispatch(&Bump(3), &mut total);
//! assert_eq!(total, 3);
//! assert_eq!(bus.resolve("onBumped"), Ok(Route::Event(Ev::Bumped)));
//! assert!(bus.resolve("nope").is_err());
//! ```

mod bus;

pub use bus::{BusError, EventBus, Message, Route, Topic};
