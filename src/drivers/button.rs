//! Panic button: raw level input and press-edge detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  Contact bounce is
//! filtered by the RC network on the board; this module only turns a
//! level into edges.
//!
//! ## Edge detection
//!
//! [`ButtonEdgeDetector`] remembers whether the button was already held on
//! the previous poll, so a press produces exactly one
//! [`ButtonEvent::Pressed`] no matter how many polls it spans.  Releasing
//! the button clears that memory.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::ButtonPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Press-edge memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdgeDetector {
    held: bool,
}

impl ButtonEdgeDetector {
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Feed the level sampled this poll.  Returns an event only on a
    /// change of level.
    pub fn update(&mut self, pressed: bool) -> Option<ButtonEvent> {
        match (self.held, pressed) {
            (false, true) => {
                self.held = true;
                Some(ButtonEvent::Pressed)
            }
            (true, false) => {
                self.held = false;
                Some(ButtonEvent::Released)
            }
            _ => None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Active-low button on a digital input pin.
pub struct ButtonInput<P> {
    pin: P,
}

impl<P: InputPin> ButtonInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ButtonPort for ButtonInput<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                // Treat an unreadable input as released so a faulty pin
                // cannot trigger the alarm on its own.
                warn!("Button read failed: {:?}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct LevelPin(bool);

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl InputPin for LevelPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[test]
    fn no_events_while_released() {
        let mut btn = ButtonEdgeDetector::new();
        assert_eq!(btn.update(false), None);
        assert_eq!(btn.update(false), None);
    }

    #[test]
    fn holding_produces_one_press() {
        let mut btn = ButtonEdgeDetector::new();
        assert_eq!(btn.update(true), Some(ButtonEvent::Pressed));
        for _ in 0..100 {
            assert_eq!(btn.update(true), None);
        }
        assert!(btn.is_held());
        assert_eq!(btn.update(false), Some(ButtonEvent::Released));
        assert!(!btn.is_held());
    }

    #[test]
    fn second_press_after_release_fires_again() {
        let mut btn = ButtonEdgeDetector::new();
        btn.update(true);
        btn.update(false);
        assert_eq!(btn.update(true), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn input_is_active_low() {
        assert!(ButtonInput::new(LevelPin(false)).is_pressed());
        assert!(!ButtonInput::new(LevelPin(true)).is_pressed());
    }
}
