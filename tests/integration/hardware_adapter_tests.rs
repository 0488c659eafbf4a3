//! Integration tests for the board hardware adapter on host stand-ins.
//!
//! On the host, `hw_init` GPIO writes are no-ops and inputs float high,
//! so the button reads as released and the drivers track levels in
//! memory.

use core::time::Duration;

use carsentry::adapters::hardware::BoardHardware;
use carsentry::adapters::serial::UartCommandChannel;
use carsentry::app::ports::{ButtonPort, OutputPort};
use carsentry::app::service::AppService;
use carsentry::config::SystemConfig;
use carsentry::drivers::hw_init;
use carsentry::fsm::StateId;
use carsentry::fsm::outputs::OutputLevels;

use super::mock_hw::{ManualClock, RecordingSink};

#[test]
fn host_peripheral_init_succeeds() {
    assert!(hw_init::init_peripherals(&SystemConfig::default()).is_ok());
}

#[test]
fn floating_button_reads_released() {
    let mut hw = BoardHardware::from_pins();
    assert!(!hw.is_pressed());
}

#[test]
fn safe_start_forces_outputs_off() {
    let mut hw = BoardHardware::from_pins();
    hw.apply(OutputLevels {
        led: true,
        relay: true,
        buzzer: true,
    });
    hw.all_off();
    assert_eq!(hw.levels(), OutputLevels::ALL_OFF);
}

#[test]
fn board_follows_the_controller_through_escalation() {
    let clock = ManualClock::new();
    let mut hw = BoardHardware::from_pins();
    let mut uart = UartCommandChannel::new();
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(SystemConfig::default(), Duration::ZERO);
    app.start(&mut sink);

    uart.inject(b"p");
    app.run_cycle(&clock, &mut hw, &mut uart, &mut sink);
    assert_eq!(app.state(), StateId::Panic);

    clock.set(Duration::from_secs(1));
    app.run_cycle(&clock, &mut hw, &mut uart, &mut sink);
    assert_eq!(
        hw.levels(),
        OutputLevels {
            led: true,
            relay: false,
            buzzer: true,
        }
    );

    clock.set(Duration::from_secs(20));
    app.run_cycle(&clock, &mut hw, &mut uart, &mut sink);
    assert_eq!(
        hw.levels(),
        OutputLevels {
            led: true,
            relay: true,
            buzzer: false,
        }
    );

    uart.inject(b"o");
    app.run_cycle(&clock, &mut hw, &mut uart, &mut sink);
    assert_eq!(hw.levels(), OutputLevels::ALL_OFF);
    assert_eq!(uart.sent(), b"PPO");
}
