// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// A closed set of named topics.
pub trait Topic: Copy + Eq + Hash + Debug + 'static {
    /// Every topic, in declaration order.
    const ALL: &'static [Self];

    /// Public name of the topic.
    fn name(self) -> &'static str;

    /// Topic whose name is exactly `name`.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// A value addressed to one topic.
pub trait Message {
    /// Topic type of the namespace this message belongs to.
    type Topic: Topic;

    /// Topic this message is delivered on.
    fn topic(&self) -> Self::Topic;
}

/// Which namespace a name resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route<A, E> {
    /// An action topic.
    Action(A),
    /// An event topic.
    Event(E),
}

/// Errors reported by [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// The name matches no action or event.
    #[error("unknown action or event name `{0}`")]
    UnknownName(String),
    /// The name is an action where an event was expected.
    #[error("`{0}` is an action, not an event")]
    NotAnEvent(String),
}

type ActionHandler<A, C> = Box<dyn FnMut(&A, &mut C)>;
type Listener<E> = Box<dyn FnMut(&E)>;

/// Action handlers and event listeners, keyed by topic.
///
/// `C` is the context handed to action handlers, `A` the action message type,
/// and `E` the event message type.
pub struct EventBus<C, A: Message, E: Message> {
    actions: HashMap<A::Topic, SmallVec<[ActionHandler<A, C>; 1]>>,
    listeners: HashMap<E::Topic, SmallVec<[Listener<E>; 2]>>,
}

impl<C, A: Message, E: Message> Default for EventBus<C, A, E> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
            listeners: HashMap::new(),
        }
    }
}

impl<C, A: Message, E: Message> Debug for EventBus<C, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actions: Vec<_> = self.actions.iter().map(|(t, v)| (t.name(), v.len())).collect();
        let listeners: Vec<_> = self
            .listeners
            .iter()
            .map(|(t, v)| (t.name(), v.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("actions", &actions)
            .field("listeners", &listeners)
            .finish()
    }
}

impl<C, A: Message, E: Message> EventBus<C, A, E> {
    /// An empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `name` against both namespaces.
    ///
    /// Unknown names are logged and returned as [`BusError::UnknownName`].
    pub fn resolve(&self, name: &str) -> Result<Route<A::Topic, E::Topic>, BusError> {
        if let Some(t) = A::Topic::from_name(name) {
            return Ok(Route::Action(t));
        }
        if let Some(t) = E::Topic::from_name(name) {
            return Ok(Route::Event(t));
        }
        tracing::error!(name, "no action or event named this");
        Err(BusError::UnknownName(name.to_owned()))
    }

    /// Appends a handler for `topic`.
    pub fn register_action(&mut self, topic: A::Topic, handler: impl FnMut(&A, &mut C) + 'static) {
        self.actions
            .entry(topic)
            .or_default()
            .push(Box::new(handler));
    }

    /// Appends a listener for `topic`.
    pub fn register(&mut self, topic: E::Topic, listener: impl FnMut(&E) + 'static) {
        self.listeners
            .entry(topic)
            .or_default()
            .push(Box::new(listener));
    }

    /// Appends each `(topic, listener)` pair in order.
    pub fn register_many<I>(&mut self, listeners: I)
    where
        I: IntoIterator<Item = (E::Topic, Box<dyn FnMut(&E)>)>,
    {
        for (topic, listener) in listeners {
            self.listeners.entry(topic).or_default().push(listener);
        }
    }

    /// Appends a listener for the event called `name`.
    pub fn register_named(
        &mut self,
        name: &str,
        listener: impl FnMut(&E) + 'static,
    ) -> Result<E::Topic, BusError> {
        match self.resolve(name)? {
            Route::Event(topic) => {
                self.register(topic, listener);
                Ok(topic)
            }
            Route::Action(_) => {
                tracing::error!(name, "cannot listen to an action");
                Err(BusError::NotAnEvent(name.to_owned()))
            }
        }
    }

    /// Runs every handler for `action`'s topic against `ctx`, in registration
    /// order. Returns how many ran.
    pub fn dispatch(&mut self, action: &A, ctx: &mut C) -> usize {
        let topic = action.topic();
        let Some(handlers) = self.actions.get_mut(&topic) else {
            tracing::debug!(topic = topic.name(), "action has no handler");
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(action, &mut *ctx);
        }
        handlers.len()
    }

    /// Delivers `event` to every listener of its topic, in registration order.
    /// Returns how many were called.
    pub fn emit(&mut self, event: &E) -> usize {
        let Some(listeners) = self.listeners.get_mut(&event.topic()) else {
            return 0;
        };
        for listener in listeners.iter_mut() {
            listener(event);
        }
        listeners.len()
    }

    /// Number of handlers for an action topic.
    pub fn action_handler_count(&self, topic: A::Topic) -> usize {
        self.actions.get(&topic).map_or(0, SmallVec::len)
    }

    /// Number of listeners for an event topic.
    pub fn listener_count(&self, topic: E::Topic) -> usize {
        self.listeners.get(&topic).map_or(0, SmallVec::len)
    }
}
