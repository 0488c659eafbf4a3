//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART0 / USB-CDC in production, not
//! the command UART).

use log::{info, warn};

use crate::app::events::{AppEvent, TransitionCause};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn on_off(level: bool) -> &'static str {
    if level { "on" } else { "off" }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} t={}s | latched={} | led={} relay={} buzzer={} | \
                     polls={} acks={} presses={} rejected={}",
                    t.state,
                    t.elapsed_secs,
                    t.latched,
                    on_off(t.outputs.led),
                    on_off(t.outputs.relay),
                    on_off(t.outputs.buzzer),
                    t.polls,
                    t.acks_sent,
                    t.button_presses,
                    t.commands_rejected,
                );
            }
            AppEvent::StateChanged { from, to, cause } => match cause {
                TransitionCause::Command(cmd) => {
                    info!("STATE | {:?} -> {:?} (command {})", from, to, cmd);
                }
                TransitionCause::Button => {
                    info!("STATE | {:?} -> {:?} (button)", from, to);
                }
                TransitionCause::MonitorTimeout => {
                    warn!("STATE | {:?} -> {:?} (monitor timeout)", from, to);
                }
            },
            AppEvent::MonitorRefreshed => {
                info!("STATE | Monitor heartbeat, timer restarted");
            }
            AppEvent::Acknowledged(ack) => {
                info!("ACK | '{}'", ack.as_byte() as char);
            }
            AppEvent::CommandRejected { command, latched } => {
                if *latched {
                    warn!("CMD | {} rejected: panic latched", command);
                } else {
                    info!("CMD | {} ignored", command);
                }
            }
            AppEvent::ButtonIgnored => {
                info!("BUTTON | press ignored: panic latched");
            }
            AppEvent::LatchSet(cause) => {
                warn!("LATCH | set ({:?})", cause);
            }
            AppEvent::LatchCleared => {
                info!("LATCH | cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
