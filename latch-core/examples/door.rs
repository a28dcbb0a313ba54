//! A door with two states; open and close events switch between them.

use latch_core::{machine, transition, Event, State};

#[derive(Default, State)]
struct Closed;

#[derive(Default, State)]
struct Open;

#[derive(Event)]
struct OpenEvent;

#[derive(Event)]
struct CloseEvent;

transition! {
    Closed: OpenEvent => Open;
    Open: CloseEvent => Closed;
}

machine! {
    name: Door,
    states: [Closed, Open],
    events: [OpenEvent, CloseEvent],
}

fn main() {
    let mut door = Door::new();

    door.dispatch(&OpenEvent);
    door.dispatch(&CloseEvent);

    println!("{}", door.current_state_name());
}
