//! Scenario tests driving whole machines through multi-step event chains.

use crate::common::{self, CloseEvent, Closed, DoorLock, DoorLockStateId, Open, OpenEvent};

#[test]
fn door_lock_scenario() {
    let mut door = DoorLock::new();
    assert_eq!(door.state(), DoorLockStateId::Closed);

    door.dispatch(&OpenEvent);
    assert_eq!(door.state(), DoorLockStateId::Open);

    // `Open` declares no handler for `OpenEvent`: ignored.
    door.dispatch(&OpenEvent);
    assert_eq!(door.state(), DoorLockStateId::Open);

    door.dispatch(&CloseEvent);
    assert_eq!(door.state(), DoorLockStateId::Closed);

    assert_eq!(door.state_ref::<Open>().enter_count, 1);
    assert_eq!(door.state_ref::<Open>().exit_count, 1);
    assert_eq!(door.state_ref::<Closed>().enter_count, 1);
    assert_eq!(
        door.state_ref::<Closed>().exit_count,
        1,
        "the ignored OpenEvent must not have fired any hook"
    );
}

#[test]
fn machines_do_not_share_state() {
    let mut first = DoorLock::new();
    let second = DoorLock::new();

    first.dispatch(&OpenEvent);

    assert_eq!(first.state(), DoorLockStateId::Open);
    assert_eq!(
        second.state(),
        DoorLockStateId::Closed,
        "each machine owns its own state instances"
    );
    assert_eq!(second.state_ref::<Open>().enter_count, 0);
}

mod tcp {
    use latch_core::{machine, transition, Event, State};

    #[derive(Default, State)]
    pub struct Closed;

    #[derive(Default, State)]
    pub struct Listen;

    #[derive(Default, State)]
    pub struct SynRcvd;

    #[derive(Default, State)]
    pub struct SynSent;

    #[derive(Default, State)]
    pub struct Established;

    #[derive(Default, State)]
    pub struct FinWait1;

    #[derive(Default, State)]
    pub struct FinWait2;

    #[derive(Default, State)]
    pub struct Closing;

    #[derive(Default, State)]
    pub struct TimeWait;

    #[derive(Default, State)]
    pub struct CloseWait;

    #[derive(Default, State)]
    pub struct LastAck;

    #[derive(Event)]
    pub struct Syn;

    #[derive(Event)]
    pub struct SynAck;

    #[derive(Event)]
    pub struct Ack;

    #[derive(Event)]
    pub struct Fin;

    #[derive(Event)]
    pub struct FinAck;

    #[derive(Event)]
    pub struct Rst;

    #[derive(Event)]
    pub struct Timeout;

    #[derive(Event)]
    pub struct ActiveOpen;

    #[derive(Event)]
    pub struct PassiveOpen;

    #[derive(Event)]
    pub struct SendData;

    #[derive(Event)]
    pub struct Close;

    transition! {
        Closed: PassiveOpen => Listen;
        Closed: ActiveOpen => SynSent;
        Listen: SendData => SynSent;
        Listen: Syn => SynRcvd;
        SynRcvd: Timeout => Closed;
        SynRcvd: Rst => Listen;
        SynRcvd: Ack => Established;
        SynRcvd: Close => FinWait1;
        SynSent: Close => Closed;
        SynSent: Syn => SynRcvd;
        SynSent: SynAck => Established;
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
}

#[test]
fn tcp_three_event_chain_reaches_established() {
    use tcp::{PassiveOpen, SendData, SynAck, TcpConnection, TcpConnectionStateId};

    let mut connection = TcpConnection::new();
    assert_eq!(connection.state(), TcpConnectionStateId::Closed);

    connection.dispatch(&PassiveOpen);
    assert_eq!(connection.state(), TcpConnectionStateId::Listen);

    connection.dispatch(&SendData);
    assert_eq!(connection.state(), TcpConnectionStateId::SynSent);

    connection.dispatch(&SynAck);
    assert_eq!(connection.state(), TcpConnectionStateId::Established);
}

#[test]
fn tcp_full_lifecycle_closes_cleanly() {
    use tcp::{Ack, ActiveOpen, Close, Fin, SynAck, TcpConnection, TcpConnectionStateId, Timeout};

    let mut connection = TcpConnection::new();

    connection.dispatch(&ActiveOpen);
    connection.dispatch(&SynAck);
    assert_eq!(connection.state(), TcpConnectionStateId::Established);

    connection.dispatch(&Close);
    assert_eq!(connection.state(), TcpConnectionStateId::FinWait1);

    connection.dispatch(&Ack);
    connection.dispatch(&Fin);
    assert_eq!(connection.state(), TcpConnectionStateId::TimeWait);

    connection.dispatch(&Timeout);
    assert_eq!(connection.state(), TcpConnectionStateId::Closed);
}

#[test]
fn tcp_out_of_sequence_segments_are_ignored() {
    use tcp::{Fin, SynAck, TcpConnection, TcpConnectionStateId};

    let mut connection = TcpConnection::new();

    // Neither event means anything to `Closed`.
    connection.dispatch(&SynAck);
    connection.dispatch(&Fin);

    assert_eq!(connection.state(), TcpConnectionStateId::Closed);
}

mod observability {
    use super::common;
    use latch_core::{machine, transition, Event, State};

    // Unique names so assertions can pick this machine's records out of the
    // shared capture buffer.
    #[derive(Default, State)]
    pub struct VaultSealed;

    #[derive(Default, State)]
    pub struct VaultAjar;

    #[derive(Event)]
    pub struct Unseal;

    #[derive(Event)]
    pub struct Seal;

    transition! {
        VaultSealed: Unseal => VaultAjar;
        VaultAjar: Seal => VaultSealed;
    }

    machine! {
        name: Vault,
        states: [VaultSealed, VaultAjar],
        events: [Unseal, Seal],
    }

    #[test]
    fn transitions_and_ignores_are_traced() {
        common::setup_logging();

        let mut vault = Vault::new();
        vault.dispatch(&Unseal);
        vault.dispatch(&Unseal); // ignored by VaultAjar

        let lines = common::captured();
        assert!(
            lines
                .iter()
                .any(|line| line.contains("[TRANSITION] VaultSealed -> VaultAjar")),
            "expected a transition trace, got: {lines:?}"
        );
        assert!(
            lines.iter().any(|line| line.contains("[NULL]")),
            "expected a null-transition trace for the ignored event, got: {lines:?}"
        );
    }
}
