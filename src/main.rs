//! CarSentry Firmware: Main Entry Point
//!
//! Single-threaded poll loop over a hexagonal core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    UartCommandChannel   LogEventSink  Esp32Time│
//! │  (Button+Output)    (CommandChannel)     (EventSink)   (Clock)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Arbitration · FSM · Panic latch · Output mapping      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use carsentry::adapters::hardware::BoardHardware;
use carsentry::adapters::log_sink::LogEventSink;
use carsentry::adapters::serial::UartCommandChannel;
use carsentry::adapters::time::Esp32TimeAdapter;
use carsentry::app::events::AppEvent;
use carsentry::app::ports::{ClockPort, EventSink, OutputPort};
use carsentry::app::service::AppService;
use carsentry::config::SystemConfig;
use carsentry::drivers::{hw_init, watchdog::Watchdog};

/// Optional JSON overrides baked in at build time.
const CONFIG_OVERRIDES: Option<&str> = option_env!("CARSENTRY_CONFIG_JSON");

fn load_config() -> SystemConfig {
    let Some(json) = CONFIG_OVERRIDES else {
        return SystemConfig::default();
    };
    match SystemConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config: build-time overrides applied");
            cfg
        }
        Err(e) => {
            warn!("Config: overrides rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  CarSentry v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    config.validate()?;
    info!("Config: {:?}", config);

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(&config) {
        // Peripheral init failure is critical: log and halt.
        // The task watchdog resets the device after its timeout.
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let mut watchdog = Watchdog::default();

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = BoardHardware::from_pins();
    hw.all_off();

    let clock = Esp32TimeAdapter::new();
    let mut uart = UartCommandChannel::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let telemetry_every = config.telemetry_every_polls();
    let poll_interval_ms = config.poll_interval_ms;
    let mut app = AppService::new(config, clock.now());
    app.start(&mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 6. Poll loop ──────────────────────────────────────────
    let mut telemetry_counter: u64 = 0;

    loop {
        app.run_cycle(&clock, &mut hw, &mut uart, &mut log_sink);

        telemetry_counter += 1;
        if telemetry_counter >= telemetry_every {
            let t = app.build_telemetry(clock.now());
            log_sink.emit(&AppEvent::Telemetry(t));
            telemetry_counter = 0;
        }

        watchdog.feed();

        esp_idf_hal::delay::FreeRtos::delay_ms(poll_interval_ms);
    }
}
