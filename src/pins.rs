//! GPIO / peripheral pin assignments for the CarSentry controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Indicator LED (active HIGH).
pub const LED_GPIO: i32 = 2;
/// Alarm / immobiliser relay coil driver (active HIGH).
pub const RELAY_GPIO: i32 = 12;
/// Piezo buzzer driver transistor (active HIGH).
pub const BUZZER_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// User button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary panic button.  LOW = pressed.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// UART command channel
// ---------------------------------------------------------------------------

/// UART peripheral used for the host command channel.
pub const COMMAND_UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Driver RX ring buffer size (bytes).  Must exceed the 128-byte HW FIFO.
pub const UART_RX_BUFFER_BYTES: i32 = 256;
