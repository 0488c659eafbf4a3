//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware logs them to the
//! console.  None of these are part of the serial protocol.

use crate::fsm::StateId;
use crate::fsm::outputs::OutputLevels;
use crate::protocol::{Ack, Command};

/// What caused a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// A command byte from the host.
    Command(Command),
    /// A physical button press.
    Button,
    /// No heartbeat within the monitor overtime.
    MonitorTimeout,
}

/// What set the panic latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchCause {
    Button,
    Escalation,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The FSM entered `to`.  `from == to` for a re-entry, which restarts
    /// the state's timer.
    StateChanged {
        from: StateId,
        to: StateId,
        cause: TransitionCause,
    },

    /// A redundant monitor command restarted the heartbeat timer.
    MonitorRefreshed,

    /// An acknowledgment byte was produced for the host.
    Acknowledged(Ack),

    /// A command had no effect.  `latched` tells whether the panic latch
    /// blocked it (and a `'P'` was echoed) or it was simply unrecognised.
    CommandRejected { command: Command, latched: bool },

    /// A button press arrived while latched and was ignored.
    ButtonIgnored,

    LatchSet(LatchCause),
    LatchCleared,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub state: StateId,
    pub elapsed_secs: u64,
    pub latched: bool,
    pub outputs: OutputLevels,
    pub polls: u64,
    pub acks_sent: u64,
    pub button_presses: u64,
    pub commands_rejected: u64,
}
