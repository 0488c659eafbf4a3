//! Actuator drivers, the button input, hardware initialisation, and the
//! task watchdog.

pub mod button;
pub mod buzzer;
pub mod hw_init;
pub mod relay;
pub mod status_led;
pub mod watchdog;
