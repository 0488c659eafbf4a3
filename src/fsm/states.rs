//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.  The handlers here implement only the **timing**
//! rules; command and button arbitration live in
//! [`app::arbitration`](crate::app::arbitration).
//!
//! ```text
//!  OFF ──'m'──▶ MONITOR ──[elapsed > overtime]──▶ PANIC ──[elapsed >= alarm]──▶ escalated + latched
//!                │  ▲                              ▲
//!                └──┘ 'm' refreshes the timer      │
//!  OFF / MONITOR ─────────['p' or button]──────────┘
//!
//!  any state ──'o'──▶ OFF (latch cleared)
//! ```

use super::context::FsmContext;
use super::outputs::PanicPhase;
use super::{StateDescriptor, StateId};
use crate::protocol::Ack;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Off
        StateDescriptor {
            id: StateId::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_update: off_update,
        },
        // Index 1: Monitor
        StateDescriptor {
            id: StateId::Monitor,
            name: "Monitor",
            on_enter: Some(monitor_enter),
            on_update: monitor_update,
        },
        // Index 2: Panic
        StateDescriptor {
            id: StateId::Panic,
            name: "Panic",
            on_enter: Some(panic_enter),
            on_update: panic_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(_ctx: &mut FsmContext) {
    info!("OFF: outputs released");
}

fn off_update(_ctx: &mut FsmContext) -> Option<StateId> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  MONITOR state: host must send 'm' at least every overtime period
// ═══════════════════════════════════════════════════════════════════════════

fn monitor_enter(ctx: &mut FsmContext) {
    info!(
        "MONITOR: expecting heartbeat within {}s",
        ctx.config.monitor_overtime_secs
    );
}

fn monitor_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Missing heartbeat is treated as a fault.
    if ctx.elapsed_secs > ctx.config.monitor_overtime_secs {
        warn!(
            "MONITOR: no heartbeat for {}s, escalating to Panic",
            ctx.elapsed_secs
        );
        return Some(StateId::Panic);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PANIC state: blinking warning, then relay lock
// ═══════════════════════════════════════════════════════════════════════════

fn panic_enter(ctx: &mut FsmContext) {
    warn!(
        "PANIC: warning phase, relay locks in {}s",
        ctx.config.alarm_escalation_secs
    );
}

fn panic_update(ctx: &mut FsmContext) -> Option<StateId> {
    let phase = PanicPhase::at(ctx.elapsed_secs, ctx.config.alarm_escalation_secs);
    if phase == PanicPhase::Escalated && ctx.latch.set() {
        warn!(
            "PANIC: escalated after {}s, relay locked, latch set",
            ctx.elapsed_secs
        );
        ctx.queue_ack(Ack::Panic);
    }
    None
}
