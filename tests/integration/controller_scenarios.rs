//! End-to-end controller scenarios: clock + button + serial channel →
//! AppService → outputs and acknowledgments.
//!
//! Drives [`AppService::run_cycle`] with a manual clock, mock GPIO, and
//! the host-side [`UartCommandChannel`], so every byte the host would
//! see on the wire can be asserted on.

use core::time::Duration;

use carsentry::adapters::serial::UartCommandChannel;
use carsentry::app::events::{AppEvent, LatchCause, TransitionCause};
use carsentry::app::ports::ClockPort;
use carsentry::app::service::{AppService, PollOutput};
use carsentry::config::SystemConfig;
use carsentry::fsm::StateId;
use carsentry::fsm::outputs::OutputLevels;
use carsentry::protocol::Command;

use super::mock_hw::{ManualClock, MockHardware, RecordingSink};

struct Rig {
    app: AppService,
    clock: ManualClock,
    hw: MockHardware,
    uart: UartCommandChannel,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    fn with_config(config: SystemConfig) -> Self {
        let clock = ManualClock::new();
        let mut sink = RecordingSink::new();
        let mut app = AppService::new(config, Duration::ZERO);
        app.start(&mut sink);
        Self {
            app,
            clock,
            hw: MockHardware::new(),
            uart: UartCommandChannel::new(),
            sink,
        }
    }

    fn cycle(&mut self) -> PollOutput {
        self.app
            .run_cycle(&self.clock, &mut self.hw, &mut self.uart, &mut self.sink)
    }

    fn send(&mut self, byte: u8) -> PollOutput {
        assert_eq!(self.uart.inject(&[byte]), 1);
        self.cycle()
    }

    fn at_secs(&mut self, secs: u64) -> PollOutput {
        self.clock.set(Duration::from_secs(secs));
        self.cycle()
    }

    /// 'p' at t=0, then poll through to escalation at t=20.
    fn escalate(&mut self) {
        self.send(b'p');
        self.at_secs(20);
        assert!(self.app.is_latched());
    }

    fn sent(&self) -> &[u8] {
        self.uart.sent()
    }
}

const ESCALATED: OutputLevels = OutputLevels {
    led: true,
    relay: true,
    buzzer: false,
};

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_off_with_everything_released() {
    let mut rig = Rig::new();
    assert_eq!(rig.sink.events.first(), Some(&AppEvent::Started(StateId::Off)));

    let out = rig.cycle();
    assert_eq!(rig.app.state(), StateId::Off);
    assert!(!rig.app.is_latched());
    assert_eq!(out.outputs, OutputLevels::ALL_OFF);
    assert_eq!(rig.hw.levels(), OutputLevels::ALL_OFF);
    assert!(rig.sent().is_empty());
}

// ── 'o' from every state ──────────────────────────────────────

#[test]
fn off_from_off_acks_once() {
    let mut rig = Rig::new();
    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert_eq!(rig.sent(), b"O");
}

#[test]
fn off_from_monitor_acks_once() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.uart.clear_sent();

    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert_eq!(rig.sent(), b"O");
    assert_eq!(rig.hw.levels(), OutputLevels::ALL_OFF);
}

#[test]
fn off_from_latched_panic_clears_latch() {
    let mut rig = Rig::new();
    rig.escalate();
    rig.uart.clear_sent();

    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert!(!rig.app.is_latched());
    assert_eq!(rig.sent(), b"O");
    assert_eq!(rig.hw.levels(), OutputLevels::ALL_OFF);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::LatchCleared), 1);
}

// ── Monitor heartbeat ─────────────────────────────────────────

#[test]
fn redundant_monitor_restarts_the_timeout() {
    let mut rig = Rig::new();
    rig.send(b'm');
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.clock.set(Duration::from_secs(4));
    rig.send(b'm');
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.app.elapsed_secs(rig.clock.now()), 0);

    // Measured from the refresh at t=4: 5 s is not yet overtime...
    rig.at_secs(9);
    assert_eq!(rig.app.state(), StateId::Monitor);

    // ...6 s is.
    rig.at_secs(10);
    assert_eq!(rig.app.state(), StateId::Panic);

    assert_eq!(rig.sent(), b"MM");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::MonitorRefreshed), 1);
}

#[test]
fn monitor_times_out_into_panic_after_six_seconds() {
    let mut rig = Rig::new();
    rig.send(b'm');

    for t in 1..=5 {
        rig.at_secs(t);
        assert_eq!(rig.app.state(), StateId::Monitor, "t={t}");
    }
    rig.at_secs(6);
    assert_eq!(rig.app.state(), StateId::Panic);
    assert!(!rig.app.is_latched());

    let timeouts = rig.sink.count(|e| {
        matches!(
            e,
            AppEvent::StateChanged {
                from: StateId::Monitor,
                to: StateId::Panic,
                cause: TransitionCause::MonitorTimeout,
            }
        )
    });
    assert_eq!(timeouts, 1);
    // The timeout itself is silent on the wire.
    assert_eq!(rig.sent(), b"M");
}

#[test]
fn timeout_panic_escalates_on_its_own_clock() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.at_secs(6);
    assert_eq!(rig.app.state(), StateId::Panic);

    rig.at_secs(25);
    assert!(!rig.app.is_latched());
    rig.at_secs(26);
    assert!(rig.app.is_latched());
    assert_eq!(rig.hw.levels(), ESCALATED);
    assert_eq!(rig.sent(), b"MP");
}

// ── Panic phases ──────────────────────────────────────────────

#[test]
fn warning_phase_blinks_at_one_hertz() {
    let mut rig = Rig::new();
    rig.send(b'p');

    for t in 0..20u64 {
        let out = rig.at_secs(t);
        let blink = t % 2 == 1;
        assert_eq!(
            out.outputs,
            OutputLevels {
                led: blink,
                relay: false,
                buzzer: blink,
            },
            "t={t}"
        );
    }
    assert!(!rig.app.is_latched());
}

#[test]
fn escalation_sends_exactly_one_p_however_many_polls() {
    let mut rig = Rig::new();
    rig.send(b'p');
    rig.uart.clear_sent();

    for t in 20..30u64 {
        for ms in [0u64, 250, 500, 750] {
            rig.clock.set(Duration::from_secs(t) + Duration::from_millis(ms));
            let out = rig.cycle();
            assert_eq!(out.outputs, ESCALATED, "t={t}.{ms}");
        }
    }

    assert_eq!(rig.sent(), b"P");
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::LatchSet(LatchCause::Escalation)),
        1
    );
}

#[test]
fn custom_escalation_threshold_is_honoured() {
    let mut rig = Rig::with_config(SystemConfig {
        alarm_escalation_secs: 3,
        ..SystemConfig::default()
    });
    rig.send(b'p');
    rig.at_secs(2);
    assert!(!rig.app.is_latched());
    rig.at_secs(3);
    assert!(rig.app.is_latched());
    assert_eq!(rig.hw.levels(), ESCALATED);
}

// ── Button ────────────────────────────────────────────────────

#[test]
fn held_button_fires_once() {
    let mut rig = Rig::new();
    rig.hw.press();
    for _ in 0..50 {
        rig.cycle();
        rig.clock.advance(Duration::from_millis(10));
    }

    assert_eq!(rig.app.state(), StateId::Panic);
    assert_eq!(rig.sent(), b"P");
    let presses = rig.sink.count(|e| {
        matches!(
            e,
            AppEvent::StateChanged {
                cause: TransitionCause::Button,
                ..
            }
        )
    });
    assert_eq!(presses, 1);
}

#[test]
fn button_works_from_every_state() {
    for setup in [None, Some(b'm'), Some(b'p')] {
        let mut rig = Rig::new();
        if let Some(byte) = setup {
            rig.send(byte);
        }
        rig.uart.clear_sent();

        rig.hw.press();
        rig.cycle();
        rig.hw.release();
        rig.cycle();

        assert_eq!(rig.app.state(), StateId::Panic, "from {setup:?}");
        assert_eq!(rig.sent(), b"P", "from {setup:?}");
    }
}

#[test]
fn button_latches_and_blocks_further_presses() {
    let mut rig = Rig::new();
    rig.hw.press();
    rig.cycle();
    rig.hw.release();
    rig.cycle();
    assert!(rig.app.is_latched());

    rig.hw.press();
    rig.cycle();
    assert_eq!(rig.sent(), b"P");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::ButtonIgnored), 1);

    // Escalation does not repeat the acknowledgment.
    rig.hw.release();
    rig.at_secs(20);
    assert_eq!(rig.hw.levels(), ESCALATED);
    assert_eq!(rig.sent(), b"P");
}

#[test]
fn button_held_across_off_re_triggers_panic() {
    let mut rig = Rig::new();
    rig.escalate();
    rig.uart.clear_sent();

    rig.clock.set(Duration::from_secs(21));
    rig.hw.press();
    rig.cycle();
    assert!(rig.sent().is_empty());

    rig.clock.set(Duration::from_secs(22));
    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Panic);
    assert!(rig.app.is_latched());
    assert_eq!(rig.sent(), b"OP");
    // The warning phase restarts, so the relay drops out.
    assert_eq!(rig.hw.levels(), OutputLevels::ALL_OFF);

    rig.clock.set(Duration::from_secs(23));
    rig.cycle();
    assert_eq!(rig.sent(), b"OP");
}

// ── Latched arbitration ───────────────────────────────────────

#[test]
fn latched_rejects_everything_but_off() {
    let mut rig = Rig::new();
    rig.escalate();
    rig.uart.clear_sent();

    for byte in [b'p', b'm', b'x', b'\n'] {
        rig.send(byte);
        assert_eq!(rig.app.state(), StateId::Panic, "byte {byte:#04x}");
        assert_eq!(rig.hw.levels(), ESCALATED);
    }
    assert_eq!(rig.sent(), b"PPPP");
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CommandRejected { latched: true, .. })),
        4
    );

    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert_eq!(rig.sent(), b"PPPPO");
}

#[test]
fn latched_rejection_keeps_the_alarm_clock() {
    let mut rig = Rig::new();
    rig.escalate();
    rig.clock.set(Duration::from_secs(40));
    rig.send(b'p');
    assert_eq!(rig.app.elapsed_secs(Duration::from_secs(40)), 40);
}

#[test]
fn unrecognized_byte_is_ignored_when_unlatched() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.send(b'z');
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.sent(), b"M");
    assert!(rig.sink.events.contains(&AppEvent::CommandRejected {
        command: Command::Unrecognized(b'z'),
        latched: false,
    }));
}

#[test]
fn panic_command_while_panicking_restarts_the_warning() {
    let mut rig = Rig::new();
    rig.send(b'p');
    rig.clock.set(Duration::from_secs(15));
    rig.send(b'p');
    rig.at_secs(34);
    assert!(!rig.app.is_latched());
    rig.at_secs(35);
    assert!(rig.app.is_latched());
    assert_eq!(rig.sent(), b"PPP");
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_tracks_counters() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.send(b'q');
    rig.hw.press();
    rig.cycle();

    let t = rig.app.build_telemetry(rig.clock.now());
    assert_eq!(t.state, StateId::Panic);
    assert_eq!(t.polls, 3);
    assert_eq!(t.acks_sent, 2);
    assert_eq!(t.button_presses, 1);
    assert_eq!(t.commands_rejected, 1);
    assert!(t.latched);
}
