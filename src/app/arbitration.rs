//! Input arbitration policy.
//!
//! Reconciles the host command channel and the panic button into a single
//! decision per input, given the current state and the panic latch.  The
//! functions here are pure; [`AppService`](super::service::AppService)
//! applies the decisions to the FSM.
//!
//! Precedence, highest first:
//!
//! 1. `Off` command: always honoured, clears the latch.
//! 2. Panic latch: every other command is answered with `'P'` and
//!    changes nothing; button presses are ignored.
//! 3. Button press: enters `Panic` and latches immediately.
//! 4. Remaining commands, dispatched normally.

use crate::fsm::StateId;
use crate::protocol::{Ack, Command};

/// Effect of a decision on the panic latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchAction {
    Keep,
    Set,
    Clear,
}

/// Outcome of arbitrating one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Enter `to` (re-entry included), apply `latch`, then acknowledge.
    Transition {
        to: StateId,
        latch: LatchAction,
        ack: Ack,
    },
    /// Stay in `Monitor`, restart its timer, acknowledge with `'M'`.
    RefreshMonitor,
    /// Blocked by the latch: no state change, echo `'P'`.
    Reject,
    /// No effect and no acknowledgment.
    Ignore,
}

/// Decide what a received command does.
pub fn arbitrate_command(command: Command, state: StateId, latched: bool) -> Decision {
    if latched && command != Command::Off {
        return Decision::Reject;
    }

    match command {
        Command::Off => Decision::Transition {
            to: StateId::Off,
            latch: LatchAction::Clear,
            ack: Ack::Off,
        },
        Command::EnterMonitor if state == StateId::Monitor => Decision::RefreshMonitor,
        Command::EnterMonitor => Decision::Transition {
            to: StateId::Monitor,
            latch: LatchAction::Keep,
            ack: Ack::Monitor,
        },
        Command::EnterPanic => Decision::Transition {
            to: StateId::Panic,
            latch: LatchAction::Keep,
            ack: Ack::Panic,
        },
        Command::Unrecognized(_) => Decision::Ignore,
    }
}

/// Decide what a button press event does.
pub fn arbitrate_button_press(latched: bool) -> Decision {
    if latched {
        Decision::Ignore
    } else {
        Decision::Transition {
            to: StateId::Panic,
            latch: LatchAction::Set,
            ack: Ack::Panic,
        }
    }
}
