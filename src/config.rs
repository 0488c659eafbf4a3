//! System configuration parameters
//!
//! All tunable parameters for the CarSentry controller.  There is no
//! persistent store: the firmware boots with [`SystemConfig::default`],
//! and host tools or simulations can supply overrides as JSON through
//! [`SystemConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Escalation timing ---
    /// Seconds without a monitor heartbeat before `Monitor` escalates to
    /// `Panic`.  The threshold must be strictly exceeded.
    pub monitor_overtime_secs: u64,
    /// Seconds spent in the `Panic` warning phase before the relay locks.
    pub alarm_escalation_secs: u64,

    // --- Loop ---
    /// Main poll loop period (milliseconds)
    pub poll_interval_ms: u32,
    /// Status telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Transport ---
    /// UART baud rate handed to the serial transport (8N1 framing).
    pub serial_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            monitor_overtime_secs: 5,
            alarm_escalation_secs: 20,

            poll_interval_ms: 10,        // 100 Hz
            telemetry_interval_secs: 10, // 6/min

            serial_baud: 9600,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.monitor_overtime_secs == 0 {
            return Err(Error::Config("monitor_overtime_secs must be > 0"));
        }
        if self.alarm_escalation_secs == 0 {
            return Err(Error::Config("alarm_escalation_secs must be > 0"));
        }
        // The warning blink toggles once per second; a slower loop would
        // skip whole phases of it.
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= 1000 {
            return Err(Error::Config("poll_interval_ms must be in 1..1000"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(Error::Config("telemetry_interval_secs must be > 0"));
        }
        if self.serial_baud == 0 {
            return Err(Error::Config("serial_baud must be > 0"));
        }
        Ok(())
    }

    /// Parse a JSON override document.  Missing fields take their default
    /// value; the result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of poll cycles between telemetry reports.
    pub fn telemetry_every_polls(&self) -> u64 {
        let period_ms = u64::from(self.telemetry_interval_secs) * 1000;
        (period_ms / u64::from(self.poll_interval_ms.max(1))).max(1)
    }
}
