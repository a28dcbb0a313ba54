//! Integration and property tests for latch
//!
//! This crate holds the tests that want std and heavier dev tooling that
//! shouldn't be part of the core `no_std` build.

#![cfg(test)]

pub mod integration;

/// Common test fixtures: the door-lock machine from the scenario tests and
/// a capturing logger for the `debug-log` feature.
pub mod common {
    use std::sync::{Mutex, OnceLock};

    use log::{LevelFilter, Metadata, Record};

    use latch_core::{machine, transition, Event, State};

    #[derive(Default)]
    pub struct Closed {
        pub enter_count: usize,
        pub exit_count: usize,
    }

    impl State for Closed {
        fn name(&self) -> &'static str {
            "Closed"
        }

        fn on_enter(&mut self) {
            self.enter_count += 1;
        }

        fn on_exit(&mut self) {
            self.exit_count += 1;
        }
    }

    #[derive(Default)]
    pub struct Open {
        pub enter_count: usize,
        pub exit_count: usize,
    }

    impl State for Open {
        fn name(&self) -> &'static str {
            "Open"
        }

        fn on_enter(&mut self) {
            self.enter_count += 1;
        }

        fn on_exit(&mut self) {
            self.exit_count += 1;
        }
    }

    #[derive(Event)]
    pub struct OpenEvent;

    #[derive(Event)]
    pub struct CloseEvent;

    transition! {
        Closed: OpenEvent => Open;
        Open: CloseEvent => Closed;
    }

    machine! {
        name: DoorLock,
        states: [Closed, Open],
        events: [OpenEvent, CloseEvent],
    }

    // --- Trace capture for the debug-log feature ---

    static CAPTURED: OnceLock<Mutex<Vec<String>>> = OnceLock::new();

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            captured_lines()
                .lock()
                .expect("capture mutex poisoned")
                .push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn captured_lines() -> &'static Mutex<Vec<String>> {
        CAPTURED.get_or_init(|| Mutex::new(Vec::new()))
    }

    /// Installs the capturing logger. Safe to call from every test; only
    /// the first call wins.
    pub fn setup_logging() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    }

    /// Snapshot of everything logged so far, across all tests.
    pub fn captured() -> Vec<String> {
        captured_lines()
            .lock()
            .expect("capture mutex poisoned")
            .clone()
    }
}
