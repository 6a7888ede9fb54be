//! # ribbon-sim
//!
//! Ties the solver, the collision passes and telemetry into the per-tick
//! pipeline the host drives.
//!
//! ## Key Types
//!
//! - [`RibbonSimulation`]: owns the solver state and runs one tick at a time
//! - [`SimulationConfig`]: TOML-loadable top-level configuration
//! - [`FixedStepDriver`]: turns elapsed wall-clock time into whole ticks

pub mod config;
pub mod driver;
pub mod simulation;

pub use config::{SimulationConfig, SphereSetup};
pub use driver::FixedStepDriver;
pub use simulation::{RibbonSimulation, TickReport};
