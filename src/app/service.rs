//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the FSM (state + elapsed timer), the shared context
//! (panic latch, pending acks), and the button edge memory.  It exposes a
//! hardware-agnostic [`poll`](AppService::poll) plus a
//! [`run_cycle`](AppService::run_cycle) helper that wires the ports.
//!
//! ```text
//!  ClockPort ─────┐
//!  ButtonPort ────┼─▶ ┌──────────────────────────────┐ ──▶ OutputPort
//!  CommandChannel ┘   │          AppService          │ ──▶ CommandChannel (acks)
//!                     │ arbitration · FSM · outputs  │ ──▶ EventSink
//!                     └──────────────────────────────┘
//! ```
//!
//! One poll cycle:
//!
//! 1. Command arbitration, if a byte arrived.
//! 2. Button arbitration, if the button was just pressed.  A press that
//!    starts while latched is not remembered as held.
//! 3. Timing rules for the current state (monitor timeout, escalation).
//! 4. Output levels for the resulting state and elapsed time.

use core::time::Duration;

use heapless::Vec;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::drivers::button::{ButtonEdgeDetector, ButtonEvent};
use crate::fsm::context::{ACK_QUEUE_CAP, FsmContext};
use crate::fsm::outputs::{OutputLevels, output_levels};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::protocol::{Ack, Command};

use super::arbitration::{Decision, LatchAction, arbitrate_button_press, arbitrate_command};
use super::events::{AppEvent, LatchCause, TelemetryData, TransitionCause};
use super::ports::{ButtonPort, ClockPort, CommandChannel, EventSink, OutputPort};

/// Result of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutput {
    /// Levels to drive on the LED, relay, and buzzer.
    pub outputs: OutputLevels,
    /// Acknowledgment bytes to send, in order.
    pub acks: Vec<Ack, ACK_QUEUE_CAP>,
}

#[derive(Debug, Clone, Copy, Default)]
struct PollStats {
    polls: u64,
    acks_sent: u64,
    button_presses: u64,
    commands_rejected: u64,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    button: ButtonEdgeDetector,
    /// A press that began while latched has already been reported.
    latched_press_reported: bool,
    outputs: OutputLevels,
    stats: PollStats,
}

impl AppService {
    /// Construct the service in `Off` with its timer referenced at `now`.
    ///
    /// Does **not** run the initial state's entry action: call
    /// [`start`](Self::start) next.
    pub fn new(config: SystemConfig, now: Duration) -> Self {
        let fsm = Fsm::new(build_state_table(), StateId::Off, now);
        Self {
            fsm,
            ctx: FsmContext::new(config),
            button: ButtonEdgeDetector::new(),
            latched_press_reported: false,
            outputs: OutputLevels::ALL_OFF,
            stats: PollStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle against the ports: sample the clock, the button
    /// and at most one command byte, then send the acks and drive the
    /// outputs.
    pub fn run_cycle(
        &mut self,
        clock: &impl ClockPort,
        io: &mut (impl ButtonPort + OutputPort),
        channel: &mut impl CommandChannel,
        sink: &mut impl EventSink,
    ) -> PollOutput {
        let now = clock.now();
        let pressed = io.is_pressed();
        let incoming = channel.read_byte();

        let out = self.poll(now, pressed, incoming, sink);

        for &ack in &out.acks {
            channel.send_ack(ack);
        }
        io.apply(out.outputs);
        out
    }

    /// Advance the controller by one cycle.  Never blocks.
    ///
    /// * `now`: monotonic time since boot.
    /// * `button_pressed`: raw button level this cycle.
    /// * `incoming`: the command byte received since the last cycle, if any.
    pub fn poll(
        &mut self,
        now: Duration,
        button_pressed: bool,
        incoming: Option<u8>,
        sink: &mut impl EventSink,
    ) -> PollOutput {
        self.stats.polls += 1;

        // 1. Command arbitration
        if let Some(byte) = incoming {
            self.handle_command(Command::from_byte(byte), now, sink);
        }

        // 2. Button arbitration
        if !button_pressed {
            self.latched_press_reported = false;
        }
        if button_pressed && !self.button.is_held() && self.ctx.latch.is_set() {
            // The edge memory stays released, so the press fires as soon
            // as the latch clears.
            self.handle_button_press(now, sink);
        } else {
            match self.button.update(button_pressed) {
                Some(ButtonEvent::Pressed) => {
                    self.stats.button_presses += 1;
                    self.handle_button_press(now, sink);
                }
                Some(ButtonEvent::Released) => debug!("Button released"),
                None => {}
            }
        }

        // 3. Timing rules
        let latched_before = self.ctx.latch.is_set();
        if let Some(t) = self.fsm.update(&mut self.ctx, now) {
            sink.emit(&AppEvent::StateChanged {
                from: t.from,
                to: t.to,
                cause: TransitionCause::MonitorTimeout,
            });
        }
        if !latched_before && self.ctx.latch.is_set() {
            sink.emit(&AppEvent::LatchSet(LatchCause::Escalation));
        }

        // 4. Output levels
        self.outputs = output_levels(
            self.fsm.current_state(),
            self.ctx.elapsed_secs,
            self.ctx.config.alarm_escalation_secs,
        );

        let acks = self.ctx.take_acks();
        for &ack in &acks {
            self.stats.acks_sent += 1;
            sink.emit(&AppEvent::Acknowledged(ack));
        }

        PollOutput {
            outputs: self.outputs,
            acks,
        }
    }

    // ── Arbitration ───────────────────────────────────────────

    fn handle_command(&mut self, command: Command, now: Duration, sink: &mut impl EventSink) {
        let state = self.fsm.current_state();
        let latched = self.ctx.latch.is_set();

        match arbitrate_command(command, state, latched) {
            Decision::Transition { to, latch, ack } => {
                info!("Command '{}' -> {:?}", command, to);
                self.enter_state(to, latch, TransitionCause::Command(command), now, sink);
                self.ctx.queue_ack(ack);
            }
            Decision::RefreshMonitor => {
                debug!("Command 'monitor' refreshed heartbeat timer");
                self.fsm.refresh_timer(&mut self.ctx, now);
                self.ctx.queue_ack(Ack::Monitor);
                sink.emit(&AppEvent::MonitorRefreshed);
            }
            Decision::Reject => {
                warn!("Command '{}' rejected: panic latched", command);
                self.stats.commands_rejected += 1;
                self.ctx.queue_ack(Ack::Panic);
                sink.emit(&AppEvent::CommandRejected {
                    command,
                    latched: true,
                });
            }
            Decision::Ignore => {
                debug!("Command '{}' ignored", command);
                self.stats.commands_rejected += 1;
                sink.emit(&AppEvent::CommandRejected {
                    command,
                    latched: false,
                });
            }
        }
    }

    fn handle_button_press(&mut self, now: Duration, sink: &mut impl EventSink) {
        match arbitrate_button_press(self.ctx.latch.is_set()) {
            Decision::Transition { to, latch, ack } => {
                warn!("Button pressed -> {:?}", to);
                self.enter_state(to, latch, TransitionCause::Button, now, sink);
                self.ctx.queue_ack(ack);
            }
            _ => {
                if !self.latched_press_reported {
                    self.latched_press_reported = true;
                    debug!("Button press ignored: panic latched");
                    sink.emit(&AppEvent::ButtonIgnored);
                }
            }
        }
    }

    /// Transition, then apply the latch effect.  Only a button press ever
    /// sets the latch from here; escalation sets it inside the FSM.
    fn enter_state(
        &mut self,
        to: StateId,
        latch: LatchAction,
        cause: TransitionCause,
        now: Duration,
        sink: &mut impl EventSink,
    ) {
        let t = self.fsm.transition_to(to, &mut self.ctx, now);
        sink.emit(&AppEvent::StateChanged {
            from: t.from,
            to: t.to,
            cause,
        });

        match latch {
            LatchAction::Keep => {}
            LatchAction::Set => {
                if self.ctx.latch.set() {
                    sink.emit(&AppEvent::LatchSet(LatchCause::Button));
                }
            }
            LatchAction::Clear => {
                if self.ctx.latch.clear() {
                    info!("Panic latch cleared");
                    sink.emit(&AppEvent::LatchCleared);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot at `now`.
    pub fn build_telemetry(&self, now: Duration) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            elapsed_secs: self.fsm.elapsed_secs(now),
            latched: self.ctx.latch.is_set(),
            outputs: self.outputs,
            polls: self.stats.polls,
            acks_sent: self.stats.acks_sent,
            button_presses: self.stats.button_presses,
            commands_rejected: self.stats.commands_rejected,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Whether the panic latch is set.
    pub fn is_latched(&self) -> bool {
        self.ctx.latch.is_set()
    }

    /// Whole seconds in the current state at `now`.
    pub fn elapsed_secs(&self, now: Duration) -> u64 {
        self.fsm.elapsed_secs(now)
    }

    /// Output levels computed by the most recent poll.
    pub fn outputs(&self) -> OutputLevels {
        self.outputs
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    /// Poll cycles executed since startup.
    pub fn poll_count(&self) -> u64 {
        self.stats.polls
    }
}
