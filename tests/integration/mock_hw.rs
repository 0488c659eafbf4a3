//! Mock hardware for integration tests.
//!
//! Records every output write so tests can assert on the full level
//! history without touching real GPIO registers, and exposes a manual
//! clock the test advances explicitly.

use core::cell::Cell;
use core::time::Duration;

use carsentry::app::events::AppEvent;
use carsentry::app::ports::{ButtonPort, ClockPort, EventSink, OutputPort};
use carsentry::fsm::outputs::OutputLevels;

// ── ManualClock ───────────────────────────────────────────────

#[derive(Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub pressed: bool,
    pub writes: Vec<OutputLevels>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Most recently written levels; all off before the first write.
    pub fn levels(&self) -> OutputLevels {
        self.writes.last().copied().unwrap_or(OutputLevels::ALL_OFF)
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

impl OutputPort for MockHardware {
    fn apply(&mut self, levels: OutputLevels) {
        self.writes.push(levels);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
