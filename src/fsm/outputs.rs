//! Output driver: maps (state, seconds in state) to physical levels.
//!
//! | State   | Phase                    | LED        | Buzzer     | Relay |
//! |---------|--------------------------|------------|------------|-------|
//! | Off     | any                      | off        | off        | off   |
//! | Monitor | any                      | off        | off        | off   |
//! | Panic   | warning (`t < alarm`)    | `t` odd    | `t` odd    | off   |
//! | Panic   | escalated (`t >= alarm`) | on         | off        | on    |
//!
//! The warning phase is a 1 Hz blink: LED and buzzer are active during
//! every odd second.  This function holds no state; the same inputs always
//! give the same levels.

use super::StateId;

/// Levels for the three outputs.  `true` = active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputLevels {
    pub led: bool,
    pub relay: bool,
    pub buzzer: bool,
}

impl OutputLevels {
    /// All outputs inactive: safe default.
    pub const ALL_OFF: Self = Self {
        led: false,
        relay: false,
        buzzer: false,
    };
}

/// Phase of the `Panic` state at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicPhase {
    /// Blinking warning, relay released.
    Warning,
    /// LED solid, relay locked.
    Escalated,
}

impl PanicPhase {
    pub fn at(elapsed_secs: u64, alarm_escalation_secs: u64) -> Self {
        if elapsed_secs < alarm_escalation_secs {
            Self::Warning
        } else {
            Self::Escalated
        }
    }
}

/// Compute the output levels for `state` after `elapsed_secs` in it.
pub fn output_levels(state: StateId, elapsed_secs: u64, alarm_escalation_secs: u64) -> OutputLevels {
    match state {
        StateId::Off | StateId::Monitor => OutputLevels::ALL_OFF,
        StateId::Panic => match PanicPhase::at(elapsed_secs, alarm_escalation_secs) {
            PanicPhase::Warning => {
                let blink = elapsed_secs % 2 == 1;
                OutputLevels {
                    led: blink,
                    relay: false,
                    buzzer: blink,
                }
            }
            PanicPhase::Escalated => OutputLevels {
                led: true,
                relay: true,
                buzzer: false,
            },
        },
    }
}
