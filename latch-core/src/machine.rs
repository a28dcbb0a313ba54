//! # Machine Support Traits
//!
//! The traits a machine type implements, one way or another. The `machine!`
//! macro generates all of these for a declared state/event set; they can
//! equally be implemented by hand (the tests below do exactly that, in the
//! same shape the macro emits).

use crate::state::{Event, State};

/// Introspection surface common to every machine.
///
/// The associated `StateId` is the machine's tag enum: a `Copy` value
/// naming exactly one of the declared state types. The tag always refers to
/// an owned, live state instance; switching it never constructs or
/// destroys a state.
pub trait StateMachine {
    type StateId: Copy + Clone + PartialEq + Eq + core::fmt::Debug;

    /// Tag of the current state.
    fn state(&self) -> Self::StateId;

    /// [`name`](State::name) of the current state instance. Pure query.
    fn state_name(&self) -> &'static str;
}

/// Event routing, implemented once per declared event type.
///
/// Dispatch runs to completion before returning: it resolves the current
/// state's handler for `E`, then executes the resulting descriptor,
/// applying at most one state switch and its exit/enter hooks. It never
/// blocks and never fails; an event the current state declares no handler
/// for is a legal, silent no-op.
///
/// Only declared event types are dispatchable. Passing anything else does
/// not compile:
///
/// ```compile_fail
/// use latch_core::{machine, Event, State};
///
/// #[derive(Default, State)]
/// struct Idle;
///
/// #[derive(Event)]
/// struct Go;
///
/// #[derive(Event)]
/// struct Stop;
///
/// machine! {
///     name: Runner,
///     states: [Idle],
///     events: [Go],
/// }
///
/// let mut runner = Runner::new();
/// runner.dispatch(&Stop); // `Stop` is not in the declared event set
/// ```
pub trait Dispatch<E: Event> {
    fn dispatch(&mut self, event: &E);
}

/// Implemented by a machine for each state type in its declared set.
///
/// This is what makes the state set closed: anything that needs "machine
/// has a state of type `S`" (forced transitions, descriptor execution,
/// instance access) demands this bound, and only declared states get an
/// impl.
pub trait Contains<S: State> {
    /// Shared access to the owned instance of `S`, current or not.
    fn state_ref(&self) -> &S;

    /// Exclusive access to the owned instance of `S`, current or not.
    fn state_mut(&mut self) -> &mut S;

    /// Force a transition to `S`: exit hook on the old current state, then
    /// the tag switch, then enter hook on `S`. Fires both hooks even when
    /// `S` is already current.
    fn transition(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Handle, ResolveHandled as _, ResolveIgnored as _, Resolver};
    use crate::transition::{Transition, TransitionTo};

    use core::sync::atomic::{AtomicUsize, Ordering};

    // One global stamp source; tests only compare stamps taken within a
    // single machine, so interleaving across tests is harmless.
    static SEQ: AtomicUsize = AtomicUsize::new(0);

    fn stamp() -> usize {
        SEQ.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[derive(Default)]
    struct Low {
        entered_at: usize,
        exited_at: usize,
        enter_count: usize,
        exit_count: usize,
    }

    impl State for Low {
        fn name(&self) -> &'static str {
            "Low"
        }

        fn on_enter(&mut self) {
            self.entered_at = stamp();
            self.enter_count += 1;
        }

        fn on_exit(&mut self) {
            self.exited_at = stamp();
            self.exit_count += 1;
        }
    }

    #[derive(Default)]
    struct High {
        entered_at: usize,
        enter_count: usize,
        exit_count: usize,
    }

    impl State for High {
        fn name(&self) -> &'static str {
            "High"
        }

        fn on_enter(&mut self) {
            self.entered_at = stamp();
            self.enter_count += 1;
        }

        fn on_exit(&mut self) {
            self.exit_count += 1;
        }
    }

    struct Rise;
    impl Event for Rise {}

    struct Fall;
    impl Event for Fall {}

    impl Handle<Rise> for Low {
        type Outcome = TransitionTo<High>;

        fn handle(&mut self, _event: &Rise) -> Self::Outcome {
            TransitionTo::new()
        }
    }

    impl Handle<Fall> for High {
        type Outcome = TransitionTo<Low>;

        fn handle(&mut self, _event: &Fall) -> Self::Outcome {
            TransitionTo::new()
        }
    }

    // Hand-rolled machine in the exact shape `machine!` generates.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum FlipFlopStateId {
        Low,
        High,
    }

    struct FlipFlop {
        low: Low,
        high: High,
        current: FlipFlopStateId,
    }

    impl FlipFlop {
        fn new() -> Self {
            Self {
                low: Low::default(),
                high: High::default(),
                current: FlipFlopStateId::Low,
            }
        }

        fn exit_current(&mut self) {
            match self.current {
                FlipFlopStateId::Low => self.low.on_exit(),
                FlipFlopStateId::High => self.high.on_exit(),
            }
        }

        fn enter_current(&mut self) {
            match self.current {
                FlipFlopStateId::Low => self.low.on_enter(),
                FlipFlopStateId::High => self.high.on_enter(),
            }
        }
    }

    impl StateMachine for FlipFlop {
        type StateId = FlipFlopStateId;

        fn state(&self) -> FlipFlopStateId {
            self.current
        }

        fn state_name(&self) -> &'static str {
            match self.current {
                FlipFlopStateId::Low => self.low.name(),
                FlipFlopStateId::High => self.high.name(),
            }
        }
    }

    impl Contains<Low> for FlipFlop {
        fn state_ref(&self) -> &Low {
            &self.low
        }

        fn state_mut(&mut self) -> &mut Low {
            &mut self.low
        }

        fn transition(&mut self) {
            self.exit_current();
            self.current = FlipFlopStateId::Low;
            self.enter_current();
        }
    }

    impl Contains<High> for FlipFlop {
        fn state_ref(&self) -> &High {
            &self.high
        }

        fn state_mut(&mut self) -> &mut High {
            &mut self.high
        }

        fn transition(&mut self) {
            self.exit_current();
            self.current = FlipFlopStateId::High;
            self.enter_current();
        }
    }

    impl Dispatch<Rise> for FlipFlop {
        fn dispatch(&mut self, event: &Rise) {
            match self.current {
                FlipFlopStateId::Low => {
                    let outcome = Resolver::new(&mut self.low, event).resolve();
                    outcome.execute(self);
                }
                FlipFlopStateId::High => {
                    let outcome = Resolver::new(&mut self.high, event).resolve();
                    outcome.execute(self);
                }
            }
        }
    }

    impl Dispatch<Fall> for FlipFlop {
        fn dispatch(&mut self, event: &Fall) {
            match self.current {
                FlipFlopStateId::Low => {
                    let outcome = Resolver::new(&mut self.low, event).resolve();
                    outcome.execute(self);
                }
                FlipFlopStateId::High => {
                    let outcome = Resolver::new(&mut self.high, event).resolve();
                    outcome.execute(self);
                }
            }
        }
    }

    #[test]
    fn construction_selects_first_state_and_fires_no_hooks() {
        let machine = FlipFlop::new();

        assert_eq!(machine.state(), FlipFlopStateId::Low);
        assert_eq!(machine.state_name(), "Low");
        assert_eq!(machine.low.enter_count, 0, "no enter hook on construction");
        assert_eq!(machine.low.exit_count, 0, "no exit hook on construction");
    }

    #[test]
    fn dispatch_executes_declared_transition() {
        let mut machine = FlipFlop::new();

        machine.dispatch(&Rise);

        assert_eq!(machine.state(), FlipFlopStateId::High);
        assert_eq!(machine.low.exit_count, 1);
        assert_eq!(machine.high.enter_count, 1);
    }

    #[test]
    fn exit_fires_before_enter() {
        let mut machine = FlipFlop::new();

        machine.dispatch(&Rise);

        assert!(
            machine.low.exited_at < machine.high.entered_at,
            "old state must exit (stamp {}) before new state enters (stamp {})",
            machine.low.exited_at,
            machine.high.entered_at
        );
    }

    #[test]
    fn unhandled_event_is_a_silent_no_op() {
        let mut machine = FlipFlop::new();

        machine.dispatch(&Fall); // `Low` declares no handler for `Fall`

        assert_eq!(machine.state(), FlipFlopStateId::Low);
        assert_eq!(machine.low.exit_count, 0, "no hooks on ignored events");
        assert_eq!(machine.high.enter_count, 0, "no hooks on ignored events");
    }

    #[test]
    fn dispatch_depends_only_on_current_state() {
        let mut machine = FlipFlop::new();

        machine.dispatch(&Rise);
        assert_eq!(machine.state(), FlipFlopStateId::High);

        // Second `Rise` finds `High` current, which ignores it.
        machine.dispatch(&Rise);
        assert_eq!(machine.state(), FlipFlopStateId::High);

        machine.dispatch(&Fall);
        assert_eq!(machine.state(), FlipFlopStateId::Low);
    }

    #[test]
    fn forced_transition_runs_hooks() {
        let mut machine = FlipFlop::new();

        <FlipFlop as Contains<High>>::transition(&mut machine);

        assert_eq!(machine.state(), FlipFlopStateId::High);
        assert_eq!(machine.low.exit_count, 1);
        assert_eq!(machine.high.enter_count, 1);
    }

    #[test]
    fn self_transition_fires_both_hooks_once() {
        let mut machine = FlipFlop::new();

        <FlipFlop as Contains<Low>>::transition(&mut machine);

        assert_eq!(machine.state(), FlipFlopStateId::Low);
        assert_eq!(machine.low.exit_count, 1, "exit fires on self-transition");
        assert_eq!(machine.low.enter_count, 1, "enter fires on self-transition");
        assert!(
            machine.low.exited_at < machine.low.entered_at,
            "exit still precedes enter on the same instance"
        );
    }

    #[test]
    fn state_data_persists_while_not_current() {
        let mut machine = FlipFlop::new();

        machine.dispatch(&Rise);
        machine.dispatch(&Fall);
        machine.dispatch(&Rise);

        // `High` was entered twice; its instance survived being non-current.
        assert_eq!(machine.high.enter_count, 2);
        assert_eq!(machine.high.exit_count, 1);
    }
}
