//! Declarative helpers: the `transition!` sugar and the `trace!` shim used
//! by generated code.

/// Declares one-line transitions: a [`Handle`](crate::Handle) impl whose
/// handler does nothing but return [`TransitionTo`](crate::TransitionTo).
///
/// ```
/// use latch_core::{transition, Event, State};
///
/// #[derive(Default, State)]
/// struct Red;
/// #[derive(Default, State)]
/// struct Green;
///
/// #[derive(Event)]
/// struct Timer;
///
/// transition! {
///     Red: Timer => Green;
///     Green: Timer => Red;
/// }
/// ```
///
/// Handlers with side effects are written as ordinary `Handle` impls
/// instead.
#[macro_export]
macro_rules! transition {
    ($($state:ty : $event:ty => $target:ty);+ $(;)?) => {
        $(
            impl $crate::Handle<$event> for $state {
                type Outcome = $crate::TransitionTo<$target>;

                fn handle(&mut self, _event: &$event) -> Self::Outcome {
                    $crate::TransitionTo::new()
                }
            }
        )+
    };
}

/// Diagnostic trace record, routed through the `log` facade when the
/// `debug-log` feature is enabled and compiled out entirely otherwise.
/// Purely diagnostic; no behavioral effect either way.
#[cfg(feature = "debug-log")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { $crate::log::trace!($($arg)*) };
}

/// Diagnostic trace record, routed through the `log` facade when the
/// `debug-log` feature is enabled and compiled out entirely otherwise.
/// Purely diagnostic; no behavioral effect either way.
#[cfg(not(feature = "debug-log"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
