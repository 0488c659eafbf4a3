//! Fuzz target: `AppService::poll`
//!
//! Decodes the input as a stream of 2-byte poll steps and drives the
//! controller with them, asserting the latch and output invariants after
//! every cycle.
//!
//! Step encoding: byte 0 low nibble = time advance in 250 ms units,
//! bit 4 = button level, bit 5 = a command byte is present (byte 1).
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use core::time::Duration;

use carsentry::app::events::AppEvent;
use carsentry::app::ports::EventSink;
use carsentry::app::service::AppService;
use carsentry::config::SystemConfig;
use carsentry::fsm::StateId;
use carsentry::fsm::outputs::{OutputLevels, output_levels};
use carsentry::protocol::Ack;
use libfuzzer_sys::fuzz_target;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut sink = NullSink;
    let mut now = Duration::ZERO;
    let mut app = AppService::new(SystemConfig::default(), now);
    app.start(&mut sink);

    for step in data.chunks_exact(2) {
        let flags = step[0];
        now += Duration::from_millis(u64::from(flags & 0x0f) * 250);
        let button = flags & 0x10 != 0;
        let incoming = (flags & 0x20 != 0).then_some(step[1]);

        let was_latched = app.is_latched();
        let out = app.poll(now, button, incoming, &mut sink);

        // One command ack, one button ack, one escalation ack at most.
        assert!(out.acks.len() <= 3);

        if app.is_latched() {
            assert_eq!(app.state(), StateId::Panic);
        }
        if incoming == Some(b'o') {
            assert!(out.acks.contains(&Ack::Off));
        }
        if was_latched && incoming.is_some_and(|b| b != b'o') {
            assert_eq!(out.acks.first(), Some(&Ack::Panic));
        }

        let expected = output_levels(
            app.state(),
            app.elapsed_secs(now),
            app.config().alarm_escalation_secs,
        );
        assert_eq!(out.outputs, expected);
        if app.state() != StateId::Panic {
            assert_eq!(out.outputs, OutputLevels::ALL_OFF);
        }
    }
});
