//! The TCP connection lifecycle as an eleven-state machine.
//!
//! Drives a passive open followed by a data send and the peer's syn-ack,
//! which lands the connection in `Established`.

use latch_core::{machine, transition, Event, Handle, State, TransitionTo};

#[derive(Event)]
struct Syn;

#[derive(Event)]
struct SynAck;

#[derive(Event)]
struct Ack;

#[derive(Event)]
struct Fin;

#[derive(Event)]
struct FinAck;

#[derive(Event)]
struct Rst;

#[derive(Event)]
struct Timeout;

#[derive(Event)]
struct ActiveOpen;

#[derive(Event)]
struct PassiveOpen;

#[derive(Event)]
struct SendData;

#[derive(Event)]
struct Close;

#[derive(Default, State)]
struct Closed;

#[derive(Default, State)]
struct Listen;

#[derive(Default, State)]
struct SynRcvd;

#[derive(Default, State)]
struct SynSent;

#[derive(Default)]
struct Established;

impl State for Established {
    fn name(&self) -> &'static str {
        "Established"
    }

    fn on_enter(&mut self) {
        println!("connection established");
    }
}

#[derive(Default, State)]
struct FinWait1;

#[derive(Default, State)]
struct FinWait2;

#[derive(Default, State)]
struct Closing;

#[derive(Default, State)]
struct TimeWait;

#[derive(Default, State)]
struct CloseWait;

#[derive(Default, State)]
struct LastAck;

impl Handle<PassiveOpen> for Closed {
    type Outcome = TransitionTo<Listen>;

    fn handle(&mut self, _event: &PassiveOpen) -> Self::Outcome {
        println!("passive open, listening");
        TransitionTo::new()
    }
}

impl Handle<SendData> for Listen {
    type Outcome = TransitionTo<SynSent>;

    fn handle(&mut self, _event: &SendData) -> Self::Outcome {
        println!("sending data");
        TransitionTo::new()
    }
}

impl Handle<SynAck> for SynSent {
    type Outcome = TransitionTo<Established>;

    fn handle(&mut self, _event: &SynAck) -> Self::Outcome {
        println!("got syn-ack");
        TransitionTo::new()
    }
}

transition! {
    Closed: ActiveOpen => SynSent;
    Listen: Syn => SynRcvd;
    SynRcvd: Timeout => Closed;
    SynRcvd: Rst => Listen;
    SynRcvd: Ack => Established;
    SynRcvd: Close => FinWait1;
    SynSent: Close => Closed;
    SynSent: Syn => SynRcvd;
    Established: Fin => CloseWait;
    Established: Close => FinWait1;
    FinWait1: Fin => Closing;
    FinWait1: Ack => FinWait2;
    FinWait1: FinAck => TimeWait;
    FinWait2: Fin => TimeWait;
    Closing: Ack => TimeWait;
    TimeWait: Timeout => Closed;
    CloseWait: Close => LastAck;
    LastAck: Ack => Closed;
}

machine! {
    name: TcpConnection,
    states: [
        Closed,
        Listen,
        SynRcvd,
        SynSent,
        Established,
        FinWait1,
        FinWait2,
        Closing,
        TimeWait,
        CloseWait,
        LastAck,
    ],
    events: [
        Syn,
        SynAck,
        Ack,
        Fin,
        FinAck,
        Rst,
        Timeout,
        ActiveOpen,
        PassiveOpen,
        SendData,
        Close,
    ],
}

fn main() {
    let mut connection = TcpConnection::new();

    connection.dispatch(&PassiveOpen);
    connection.dispatch(&SendData);
    connection.dispatch(&SynAck);

    println!("{}", connection.current_state_name());
}
