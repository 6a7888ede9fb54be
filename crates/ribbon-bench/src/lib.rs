//! # ribbon-bench
//!
//! Canned ribbon scenarios, a runner that times them tick by tick, and
//! CSV export of the collected metrics.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::ScenarioRunner;
pub use scenarios::{Scenario, ScenarioKind};
