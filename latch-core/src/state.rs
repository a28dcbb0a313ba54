//! # State and Event Contracts
//!
//! The minimal capabilities a type needs to participate in a machine. Both
//! contracts are checked where the generated machine code uses them, so a
//! type that does not satisfy its contract is rejected when the consuming
//! program is compiled; there is no runtime error path for an invalid
//! state or event type.

/// Marker trait for dispatchable events.
///
/// Any distinct type can be an event; no operations are required. The trait
/// exists so that dispatch is only offered for types deliberately declared
/// as events, and so the compiler can tell event types apart; handler
/// resolution is purely a function of the event's type identity.
///
/// Events are transient: a machine borrows an event for the duration of one
/// [`dispatch`](crate::Dispatch::dispatch) call and never retains it. An
/// event type may carry payload fields; handlers receive the event by
/// reference and can read them.
///
/// Use `#[derive(Event)]` for the common marker case.
pub trait Event {}

/// Contract every declared state type must satisfy.
///
/// A state is a named mode of a machine. The machine constructs one
/// long-lived instance of every declared state type when it is built (hence
/// the [`Default`] supertrait), owns all of them for its lifetime, and
/// keeps exactly one of them current at a time.
///
/// `#[derive(State)]` covers states that only need a name; states that
/// override the lifecycle hooks implement the trait by hand.
///
/// Declaring a type that does not satisfy the contract does not compile:
///
/// ```compile_fail
/// use latch_core::{machine, Event, State};
///
/// struct Hinge; // implements neither State nor Default
///
/// machine! {
///     name: Door,
///     states: [Hinge],
///     events: [],
/// }
/// ```
pub trait State: Default {
    /// Human-readable name of the state, stable across the program run.
    fn name(&self) -> &'static str;

    /// Called after this state becomes current.
    ///
    /// Not called for the initial state during machine construction.
    fn on_enter(&mut self) {}

    /// Called before this state stops being current.
    fn on_exit(&mut self) {}
}
