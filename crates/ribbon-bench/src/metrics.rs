//! Metrics collected during a benchmark run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub particle_count: usize,
    pub constraint_count: usize,
    /// Ticks executed.
    pub ticks: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_tick_time: f64,
    pub min_tick_time: f64,
    pub max_tick_time: f64,
    pub final_kinetic_energy: f64,
    /// Constraints broken by the end of the run.
    pub broken_constraints: usize,
    /// Largest particle displacement from its rest position.
    pub max_displacement: f32,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,particle_count,constraint_count,ticks,total_wall_time_s,avg_tick_ms,min_tick_ms,max_tick_ms,final_ke,broken_constraints,max_displacement".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{},{:.6}",
            self.scenario,
            self.particle_count,
            self.constraint_count,
            self.ticks,
            self.total_wall_time,
            self.avg_tick_time * 1000.0,
            self.min_tick_time * 1000.0,
            self.max_tick_time * 1000.0,
            self.final_kinetic_energy,
            self.broken_constraints,
            self.max_displacement,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
