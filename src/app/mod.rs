//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules of the security controller: input
//! arbitration, FSM orchestration, and output mapping.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod arbitration;
pub mod events;
pub mod ports;
pub mod service;
