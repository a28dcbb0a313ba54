// Copyright 2025 Latch Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg_attr(not(feature = "std"), no_std)]

//! # Latch
//!
//! A Rust library for building flat, type-safe finite state machines with
//! compile-time handler resolution. A machine owns one instance of every
//! declared state type, tracks which one is current through a generated tag
//! enum, and routes each dispatched event to the current state's handler,
//! or silently ignores it when no handler is declared. Whether a handler
//! exists is decided per (state type, event type) pair at compile time; the
//! dispatch path performs no runtime type inspection and no allocation,
//! which keeps the engine suitable for `no_std` and embedded use.
//!
//! ## Example
//!
//! ```
//! use latch_core::{machine, transition, Event, State};
//!
//! #[derive(Default, State)]
//! struct Closed;
//!
//! #[derive(Default, State)]
//! struct Open;
//!
//! #[derive(Event)]
//! struct OpenEvent;
//!
//! #[derive(Event)]
//! struct CloseEvent;
//!
//! transition! {
//!     Closed: OpenEvent => Open;
//!     Open: CloseEvent => Closed;
//! }
//!
//! machine! {
//!     name: Door,
//!     states: [Closed, Open],
//!     events: [OpenEvent, CloseEvent],
//! }
//!
//! let mut door = Door::new();
//! assert_eq!(door.current_state_name(), "Closed");
//!
//! door.dispatch(&OpenEvent);
//! assert_eq!(door.current_state_name(), "Open");
//!
//! // `Open` declares no handler for `OpenEvent`: the event is ignored.
//! door.dispatch(&OpenEvent);
//! assert_eq!(door.current_state_name(), "Open");
//!
//! door.dispatch(&CloseEvent);
//! assert_eq!(door.current_state_name(), "Closed");
//! ```
//!
//! ## Threading
//!
//! A machine is a plain value with no interior synchronization. Dispatch
//! runs to completion on the calling thread; dispatching to one machine
//! from multiple threads concurrently is not supported and must be
//! serialized by the caller (one machine per thread, or an external lock).

mod macros;

pub mod handler;
pub mod machine;
pub mod state;
pub mod transition;

pub use handler::{Handle, ResolveHandled, ResolveIgnored, Resolver};
pub use machine::{Contains, Dispatch, StateMachine};
pub use state::{Event, State};
pub use transition::{NoTransition, Transition, TransitionTo};

// Declaration macros, re-exported so consumers depend on one crate.
pub use latch_macro::{machine, Event, State};

// `trace!` expands at the caller's site; route it through this re-export so
// callers don't need their own `log` dependency.
#[cfg(feature = "debug-log")]
#[doc(hidden)]
pub use ::log;
