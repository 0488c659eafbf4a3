//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (clock, button, serial channel, outputs, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Every port call is a non-blocking snapshot or set: the poll loop must
//! never stall on I/O.

use core::time::Duration;

use crate::fsm::outputs::OutputLevels;
use crate::protocol::Ack;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait ClockPort {
    /// Time since boot.  Must never go backwards.
    fn now(&self) -> Duration;
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: GPIO → domain)
// ───────────────────────────────────────────────────────────────

/// Raw panic-button level.
pub trait ButtonPort {
    /// `true` while the button is physically held down.  Electrical
    /// polarity (active-low) is the adapter's concern.
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Command channel (driven adapter: serial ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented host command channel.
pub trait CommandChannel {
    /// Next received byte, if any.  Returns immediately when nothing is
    /// pending.
    fn read_byte(&mut self) -> Option<u8>;

    /// Send one acknowledgment byte.  Transport failures are the
    /// adapter's to log; the domain does not retry.
    fn send_ack(&mut self, ack: Ack);
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → LED / relay / buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the three physical outputs.
pub trait OutputPort {
    /// Drive every output to the given levels.
    fn apply(&mut self, levels: OutputLevels);

    /// Release every output: safe shutdown.
    fn all_off(&mut self) {
        self.apply(OutputLevels::ALL_OFF);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
