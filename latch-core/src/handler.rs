//! # Handler Resolution
//!
//! Decides, for a (state type, event type) pair, whether the state declares
//! a handler for the event, entirely at compile time. States opt into the
//! events they care about by implementing [`Handle<E>`]; every other event
//! resolves to [`NoTransition`] and is silently ignored.
//!
//! The detection uses autoref-based specialization: [`ResolveHandled`] is
//! implemented for [`Resolver`] by value and only applies when the `Handle`
//! bound holds, while [`ResolveIgnored`] is implemented for `&Resolver`
//! unconditionally. At the monomorphic call sites the `machine!` macro
//! generates, method probing picks the by-value impl when the state has a
//! handler and falls back through autoref to the ignore impl when it does
//! not. No runtime type inspection, no lookup table, no allocation.

use crate::state::{Event, State};
use crate::transition::NoTransition;

/// A state's handler for one event type.
///
/// Implement this once per event type the state reacts to; each impl is
/// resolved independently of every other. `Outcome` is the transition
/// descriptor the handler produces, usually
/// [`TransitionTo<Next>`](crate::TransitionTo), or [`NoTransition`] for a
/// handler that runs side effects but keeps the machine where it is.
///
/// The one-line transition case is covered by the
/// [`transition!`](crate::transition!) macro.
pub trait Handle<E: Event>: State {
    /// Descriptor type returned by [`handle`](Handle::handle).
    type Outcome;

    /// React to `event`, producing a transition descriptor.
    fn handle(&mut self, event: &E) -> Self::Outcome;
}

/// Borrows one state instance and one event for a single resolution.
pub struct Resolver<'a, S, E> {
    state: &'a mut S,
    event: &'a E,
}

impl<'a, S, E> Resolver<'a, S, E> {
    pub fn new(state: &'a mut S, event: &'a E) -> Self {
        Self { state, event }
    }
}

/// Preferred resolution: the state declares a handler for the event.
///
/// Applies to `Resolver<S, E>` by value, only where `S: Handle<E>`.
pub trait ResolveHandled {
    type Outcome;

    fn resolve(self) -> Self::Outcome;
}

impl<S, E> ResolveHandled for Resolver<'_, S, E>
where
    S: Handle<E>,
    E: Event,
{
    type Outcome = S::Outcome;

    fn resolve(self) -> S::Outcome {
        self.state.handle(self.event)
    }
}

/// Fallback resolution: no handler declared, the event is ignored.
///
/// Applies to `&Resolver<S, E>` with no handler bound; method probing only
/// reaches it (through autoref) when [`ResolveHandled`] does not apply.
pub trait ResolveIgnored {
    fn resolve(self) -> NoTransition;
}

impl<S, E> ResolveIgnored for &Resolver<'_, S, E> {
    fn resolve(self) -> NoTransition {
        NoTransition
    }
}
