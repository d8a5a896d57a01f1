// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unknown names are logged and rejected without touching registrations.

use std::io;
use std::sync::{Arc, Mutex};

use pinmap_bus::{BusError, EventBus, Message, Topic};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Act {
    Center,
}

impl Topic for Act {
    const ALL: &'static [Self] = &[Self::Center];
    fn name(self) -> &'static str {
        "centerMap"
    }
}

struct Center;

impl Message for Center {
    type Topic = Act;
    fn topic(&self) -> Act {
        Act::Center
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Ev {
    Loaded,
}

impl Topic for Ev {
    const ALL: &'static [Self] = &[Self::Loaded];
    fn name(self) -> &'static str {
        "onLoad"
    }
}

struct Loaded;

impl Message for Loaded {
    type Topic = Ev;
    fn topic(&self) -> Ev {
        Ev::Loaded
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn unknown_listener_name_is_logged_and_rejected() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let mut bus: EventBus<(), Center, Loaded> = EventBus::new();
    let result = tracing::subscriber::with_default(subscriber, || {
        bus.register_named("notARealEvent", |_| {})
    });

    assert_eq!(result, Err(BusError::UnknownName("notARealEvent".into())));
    assert_eq!(bus.listener_count(Ev::Loaded), 0);

    let logs = String::from_utf8_lossy(&captured.0.lock().expect("log buffer poisoned")).into_owned();
    assert!(logs.contains("ERROR"), "got: {logs}");
    assert!(logs.contains("notARealEvent"), "got: {logs}");
}

#[test]
fn known_names_route_to_their_namespace() {
    let mut bus: EventBus<u8, Center, Loaded> = EventBus::new();
    bus.register_action(Act::Center, |_, n: &mut u8| *n += 1);
    assert!(bus.register_named("onLoad", |_| {}).is_ok());

    let mut n = 0;
    bus.dispatch(&Center, &mut n);
    assert_eq!(n, 1);
    assert_eq!(bus.emit(&Loaded), 1);
}
