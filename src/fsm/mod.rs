//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  StateTable                                  │
//! │  ┌─────────┬───────────┬───────────────────┐ │
//! │  │ StateId │ on_enter  │ on_update         │ │
//! │  ├─────────┼───────────┼───────────────────┤ │
//! │  │ Off     │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ Monitor │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ Panic   │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  └─────────┴───────────┴───────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Each poll the engine refreshes `ctx.elapsed_secs` from its
//! [`ElapsedTimer`] and calls `on_update` for the **current** state.  If it
//! returns `Some(next_id)` the engine transitions: it updates the current
//! state, resets the timer, and runs `on_enter` for the next state.
//!
//! [`Fsm::transition_to`] is the only way the state changes, whether the
//! request comes from a timing rule inside `on_update` or from input
//! arbitration outside the engine.  Re-entering the current state is a
//! real transition and restarts the timer.

pub mod context;
pub mod latch;
pub mod outputs;
pub mod states;
pub mod timer;

use core::time::Duration;

use context::FsmContext;
use log::info;
use timer::ElapsedTimer;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible system states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Off = 0,
    Monitor = 1,
    Panic = 2,
}

impl StateId {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 3;

    pub const ALL: [Self; Self::COUNT] = [Self::Off, Self::Monitor, Self::Panic];
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs exactly once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-poll update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

/// A completed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table, the current state, and the elapsed-time source.
/// The mutable [`FsmContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
    timer: ElapsedTimer,
    /// Number of transitions since start (re-entries included).
    transitions: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in
    /// `initial` with the timer referenced at `now`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId, now: Duration) -> Self {
        Self {
            table,
            current: initial,
            timer: ElapsedTimer::started_at(now),
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `update()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.descriptor().name);
        ctx.elapsed_secs = 0;
        if let Some(enter) = self.descriptor().on_enter {
            enter(ctx);
        }
    }

    /// Run the current state's timing rules.
    ///
    /// 1. Refresh `ctx.elapsed_secs` from the timer.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, transition.
    pub fn update(&mut self, ctx: &mut FsmContext, now: Duration) -> Option<Transition> {
        ctx.elapsed_secs = self.timer.elapsed_secs(now);
        let next = (self.descriptor().on_update)(ctx);
        next.map(|next_id| self.transition_to(next_id, ctx, now))
    }

    /// Set the current state and restart the timer, then run `on_enter`.
    pub fn transition_to(&mut self, next: StateId, ctx: &mut FsmContext, now: Duration) -> Transition {
        let from = self.current;

        info!(
            "FSM transition: {} -> {}",
            self.descriptor().name,
            self.table[next as usize].name
        );

        self.current = next;
        self.timer.reset(now);
        self.transitions = self.transitions.wrapping_add(1);
        ctx.elapsed_secs = 0;

        if let Some(enter) = self.descriptor().on_enter {
            enter(ctx);
        }

        Transition { from, to: next }
    }

    /// Restart the timer without leaving the current state.  `on_enter`
    /// does not run.
    pub fn refresh_timer(&mut self, ctx: &mut FsmContext, now: Duration) {
        self.timer.reset(now);
        ctx.elapsed_secs = 0;
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Whole seconds spent in the current state at `now`.
    pub fn elapsed_secs(&self, now: Duration) -> u64 {
        self.timer.elapsed_secs(now)
    }

    /// Transitions performed since construction.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self) -> &StateDescriptor {
        &self.table[self.current as usize]
    }
}
