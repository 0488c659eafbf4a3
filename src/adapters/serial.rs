//! Serial command channel adapter.
//!
//! Implements [`CommandChannel`] over the command UART.
//!
//! - **`target_os = "espidf"`**: non-blocking reads from the UART driver
//!   RX ring buffer and single-byte writes, via [`hw_init`].
//! - **`not(target_os = "espidf")`**: an in-memory RX queue and TX log,
//!   so host tests and simulations can script the host side.
//!
//! [`hw_init`]: crate::drivers::hw_init

use crate::app::ports::CommandChannel;
use crate::protocol::Ack;

#[cfg(not(target_os = "espidf"))]
use heapless::{Deque, Vec};

/// Host-side RX queue depth.
#[cfg(not(target_os = "espidf"))]
pub const SIM_RX_CAPACITY: usize = 64;
/// Host-side TX log depth.  Acks past this are dropped with a warning.
#[cfg(not(target_os = "espidf"))]
pub const SIM_TX_CAPACITY: usize = 64;

pub struct UartCommandChannel {
    #[cfg(target_os = "espidf")]
    read_errors: u32,
    #[cfg(not(target_os = "espidf"))]
    rx: Deque<u8, SIM_RX_CAPACITY>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<u8, SIM_TX_CAPACITY>,
}

impl Default for UartCommandChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl UartCommandChannel {
    /// The UART itself is configured by
    /// [`init_peripherals`](crate::drivers::hw_init::init_peripherals).
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            read_errors: 0,
            #[cfg(not(target_os = "espidf"))]
            rx: Deque::new(),
            #[cfg(not(target_os = "espidf"))]
            tx: Vec::new(),
        }
    }

    /// Queue bytes as if the host had sent them.  Returns how many fit.
    #[cfg(not(target_os = "espidf"))]
    pub fn inject(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .take_while(|&&b| self.rx.push_back(b).is_ok())
            .count()
    }

    /// Every byte written so far, in order.
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[u8] {
        &self.tx
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn clear_sent(&mut self) {
        self.tx.clear();
    }
}

#[cfg(target_os = "espidf")]
impl CommandChannel for UartCommandChannel {
    fn read_byte(&mut self) -> Option<u8> {
        match crate::drivers::hw_init::uart_read_byte() {
            Ok(byte) => byte,
            Err(e) => {
                self.read_errors = self.read_errors.saturating_add(1);
                log::warn!("UART: {} (errors={})", e, self.read_errors);
                None
            }
        }
    }

    fn send_ack(&mut self, ack: Ack) {
        if let Err(e) = crate::drivers::hw_init::uart_write_byte(ack.as_byte()) {
            log::warn!("UART: ack '{}' dropped: {}", ack.as_byte() as char, e);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl CommandChannel for UartCommandChannel {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn send_ack(&mut self, ack: Ack) {
        if self.tx.push(ack.as_byte()).is_err() {
            log::warn!("UART(sim): TX log full, ack dropped");
        }
    }
}
