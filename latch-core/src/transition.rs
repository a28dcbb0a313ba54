//! # Transition Descriptors
//!
//! The outcome of handling (or ignoring) an event. A descriptor is produced
//! by handler resolution and consumed immediately by the machine; it is
//! never stored. Both descriptors are zero-sized: executing one costs a
//! tag write and two hook calls at most, and allocates nothing.

use core::marker::PhantomData;

use crate::machine::Contains;
use crate::state::State;

/// A descriptor knows how to apply itself to a machine.
pub trait Transition<M> {
    /// Apply the described outcome to `machine`.
    fn execute(self, machine: &mut M);
}

/// "Switch the machine to declared state `S`."
///
/// Returned from [`Handle`](crate::Handle) impls to name the destination
/// state. Executing it runs the exit hook on the old current state,
/// retargets the current-state tag, then runs the enter hook on the new
/// current state. `S` must be in the machine's declared state set; the
/// `M: Contains<S>` bound turns a descriptor naming a foreign state into a
/// compile error:
///
/// ```compile_fail
/// use latch_core::{machine, transition, Event, State};
///
/// #[derive(Default, State)]
/// struct Inside;
///
/// #[derive(Default, State)]
/// struct Outside; // not declared in the machine below
///
/// #[derive(Event)]
/// struct Leave;
///
/// transition!(Inside: Leave => Outside);
///
/// machine! {
///     name: Room,
///     states: [Inside],
///     events: [Leave],
/// }
/// ```
///
/// A self-transition (`S` is the current state's own type) is legal and
/// still runs exit then enter on the same instance, exactly once each.
pub struct TransitionTo<S> {
    _target: PhantomData<fn() -> S>,
}

impl<S> TransitionTo<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<S> Default for TransitionTo<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, S> Transition<M> for TransitionTo<S>
where
    M: Contains<S>,
    S: State,
{
    fn execute(self, machine: &mut M) {
        <M as Contains<S>>::transition(machine);
    }
}

/// "Do nothing": the event was ignored or handled in place.
///
/// Synthesized by handler resolution when the current state declares no
/// handler for the event; also usable as an explicit handler outcome for
/// react-but-stay handlers. Executing it fires no hooks and leaves the
/// current state untouched.
pub struct NoTransition;

impl<M> Transition<M> for NoTransition {
    fn execute(self, _machine: &mut M) {
        crate::trace!("[NULL] no transition fired");
    }
}
