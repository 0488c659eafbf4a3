//! Indicator LED driver.
//!
//! Single discrete LED on a digital output.  Blink timing is not generated
//! here: the output driver decides the level each poll and this driver
//! just applies it.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct StatusLed<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    /// Apply a level; a repeat of the current level is a no-op.
    pub fn set(&mut self, on: bool) {
        if on != self.on {
            self.write(on);
        }
    }

    /// Force the LED dark regardless of the remembered level.
    pub fn off(&mut self) {
        self.write(false);
    }

    /// Last level successfully written.
    pub fn is_on(&self) -> bool {
        self.on
    }

    fn write(&mut self, on: bool) {
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.on = on,
            Err(e) => warn!("LED write failed: {:?}", e),
        }
    }
}
