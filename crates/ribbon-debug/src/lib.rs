//! # ribbon-debug
//!
//! Inspection hooks called from the tick loop, and binary state
//! snapshots for replay and offline inspection.

pub mod hooks;
pub mod snapshot;

pub use hooks::{BreakRecorder, InspectionHook, TelemetryHook};
pub use snapshot::StateSnapshot;
