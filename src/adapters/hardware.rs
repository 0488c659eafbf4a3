//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the panic button and the three actuator drivers, exposing them
//! through [`ButtonPort`] and [`OutputPort`].  Generic over the
//! `embedded-hal` pin types so host tests can drive it with mock pins;
//! the firmware instantiates it with [`GpioOutput`]/[`GpioInput`].
//!
//! [`GpioOutput`]: crate::drivers::hw_init::GpioOutput
//! [`GpioInput`]: crate::drivers::hw_init::GpioInput

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ButtonPort, OutputPort};
use crate::drivers::button::ButtonInput;
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::hw_init::{GpioInput, GpioOutput};
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;
use crate::fsm::outputs::OutputLevels;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<O, I> {
    led: StatusLed<O>,
    relay: RelayDriver<O>,
    buzzer: BuzzerDriver<O>,
    button: ButtonInput<I>,
}

/// The board wiring from [`crate::pins`].
pub type BoardHardware = HardwareAdapter<GpioOutput, GpioInput>;

impl BoardHardware {
    pub fn from_pins() -> Self {
        Self::new(
            StatusLed::new(GpioOutput(pins::LED_GPIO)),
            RelayDriver::new(GpioOutput(pins::RELAY_GPIO)),
            BuzzerDriver::new(GpioOutput(pins::BUZZER_GPIO)),
            ButtonInput::new(GpioInput(pins::BUTTON_GPIO)),
        )
    }
}

impl<O: OutputPin, I: InputPin> HardwareAdapter<O, I> {
    pub fn new(
        led: StatusLed<O>,
        relay: RelayDriver<O>,
        buzzer: BuzzerDriver<O>,
        button: ButtonInput<I>,
    ) -> Self {
        Self {
            led,
            relay,
            buzzer,
            button,
        }
    }

    /// Levels last written to the pins.
    pub fn levels(&self) -> OutputLevels {
        OutputLevels {
            led: self.led.is_on(),
            relay: self.relay.is_engaged(),
            buzzer: self.buzzer.is_sounding(),
        }
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<O: OutputPin, I: InputPin> ButtonPort for HardwareAdapter<O, I> {
    fn is_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<O: OutputPin, I: InputPin> OutputPort for HardwareAdapter<O, I> {
    fn apply(&mut self, levels: OutputLevels) {
        self.led.set(levels.led);
        self.relay.set(levels.relay);
        self.buzzer.set(levels.buzzer);
    }

    fn all_off(&mut self) {
        self.led.off();
        self.relay.release();
        self.buzzer.silence();
    }
}
