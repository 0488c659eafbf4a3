//! Piezo buzzer driver (self-oscillating, on/off only).

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct BuzzerDriver<P> {
    pin: P,
    sounding: bool,
}

impl<P: OutputPin> BuzzerDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            sounding: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.sounding {
            self.write(on);
        }
    }

    /// Drive the pin low unconditionally.
    pub fn silence(&mut self) {
        self.write(false);
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    fn write(&mut self, on: bool) {
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.sounding = on,
            Err(e) => warn!("Buzzer write failed: {:?}", e),
        }
    }
}
