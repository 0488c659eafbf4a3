//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the time spent in the current state, the panic latch, the
//! acknowledgments queued for the command channel this cycle, and the
//! configuration.

use heapless::Vec;
use log::warn;

use super::latch::PanicLatch;
use crate::config::SystemConfig;
use crate::protocol::Ack;

/// Upper bound on acknowledgments produced by one poll cycle: one for the
/// command, one for the button, one for escalation.
pub const ACK_QUEUE_CAP: usize = 4;

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Whole seconds since the current state was entered (or refreshed).
    /// Written by the engine before each `on_update`.
    pub elapsed_secs: u64,

    // -- Alarm --
    pub latch: PanicLatch,

    // -- Outbound --
    /// Acknowledgments to send, in emission order.  Drained once per poll.
    pub acks: Vec<Ack, ACK_QUEUE_CAP>,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            elapsed_secs: 0,
            latch: PanicLatch::new(),
            acks: Vec::new(),
            config,
        }
    }

    /// Queue an acknowledgment for the command channel.
    pub fn queue_ack(&mut self, ack: Ack) {
        if self.acks.push(ack).is_err() {
            warn!("Ack queue full, dropping {:?}", ack);
        }
    }

    /// Take every queued acknowledgment, leaving the queue empty.
    pub fn take_acks(&mut self) -> Vec<Ack, ACK_QUEUE_CAP> {
        core::mem::take(&mut self.acks)
    }
}
