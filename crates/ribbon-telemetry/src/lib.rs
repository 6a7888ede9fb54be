//! # ribbon-telemetry
//!
//! Structured per-tick events (timing, contacts, breaking, energy) and
//! the bus that hands them to pluggable sinks.
//!
//! ## Key Types
//!
//! - [`EventBus`]: queues events during a tick, dispatches on flush
//! - [`SimulationEvent`] / [`EventKind`]: event envelope and payloads
//! - [`EventSink`]: consumer trait, with [`VecSink`], [`TracingSink`]
//!   and [`JsonLinesSink`] implementations

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
