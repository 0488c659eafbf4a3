//! Panic latch.
//!
//! Once an alarm is latched, nothing but an explicit `Off` command may
//! change the system state: the button is ignored and every other command
//! is answered with a repeated `'P'`.  The latch is set either when the
//! alarm escalates or when a button press is accepted, and cleared only by
//! the `Off` override.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanicLatch {
    set: bool,
}

impl PanicLatch {
    pub const fn new() -> Self {
        Self { set: false }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Set the latch.  Returns `true` only if it was previously clear, so
    /// callers can emit one-shot side effects on the rising edge.
    pub fn set(&mut self) -> bool {
        let was_clear = !self.set;
        self.set = true;
        was_clear
    }

    /// Clear the latch.  Returns `true` if it was set.
    pub fn clear(&mut self) -> bool {
        let was_set = self.set;
        self.set = false;
        was_set
    }
}
