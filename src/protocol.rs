//! Single-byte serial command protocol.
//!
//! | Received | Command        | Ack   |
//! |----------|----------------|-------|
//! | `'o'`    | `Off`          | `'O'` |
//! | `'m'`    | `EnterMonitor` | `'M'` |
//! | `'p'`    | `EnterPanic`   | `'P'` |
//! | other    | `Unrecognized` | none (or `'P'` while latched) |
//!
//! Commands are not authenticated: any byte that matches is trusted.

use core::fmt;

/// A decoded inbound command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Off,
    EnterMonitor,
    EnterPanic,
    /// Any byte outside the command set; carries the raw value for logging.
    Unrecognized(u8),
}

impl Command {
    pub const OFF_BYTE: u8 = b'o';
    pub const MONITOR_BYTE: u8 = b'm';
    pub const PANIC_BYTE: u8 = b'p';

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            Self::OFF_BYTE => Self::Off,
            Self::MONITOR_BYTE => Self::EnterMonitor,
            Self::PANIC_BYTE => Self::EnterPanic,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::EnterMonitor => write!(f, "monitor"),
            Self::EnterPanic => write!(f, "panic"),
            Self::Unrecognized(b) => write!(f, "unrecognized(0x{b:02x})"),
        }
    }
}

/// Outbound acknowledgment byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ack {
    Off = b'O',
    Monitor = b'M',
    Panic = b'P',
}

impl Ack {
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}
