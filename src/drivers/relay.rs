//! Alarm / immobiliser relay driver.
//!
//! The relay coil is driven through a low-side transistor: HIGH energises
//! the coil and locks the vehicle's starter circuit.  The coil is released
//! at boot and whenever the controller leaves the escalated alarm.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a real GPIO through [`hw_init::GpioOutput`](super::hw_init::GpioOutput).
//! On host/test: any `OutputPin` implementation.

use embedded_hal::digital::{OutputPin, PinState};
use log::{info, warn};

pub struct RelayDriver<P> {
    pin: P,
    engaged: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            engaged: false,
        }
    }

    /// Drive the coil.  The pin is only written when the level changes.
    pub fn set(&mut self, engaged: bool) {
        if engaged == self.engaged {
            return;
        }
        if self.write(engaged) {
            info!("Relay {}", if engaged { "engaged" } else { "released" });
        }
    }

    /// Release the coil, writing the pin even if it is believed low.
    pub fn release(&mut self) {
        self.write(false);
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    fn write(&mut self, engaged: bool) -> bool {
        match self.pin.set_state(PinState::from(engaged)) {
            Ok(()) => {
                self.engaged = engaged;
                true
            }
            Err(e) => {
                warn!("Relay write failed: {:?}", e);
                false
            }
        }
    }
}
