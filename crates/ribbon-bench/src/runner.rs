//! Scenario runner: drives a simulation and times every tick.

use std::time::Instant;

use ribbon_sim::RibbonSimulation;
use ribbon_types::RibbonResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run `scenario` to completion and collect its metrics.
    pub fn run(scenario: &Scenario) -> RibbonResult<BenchmarkMetrics> {
        let mut sim = RibbonSimulation::new(scenario.config.clone())?;
        let dt = scenario.config.dt;

        let mut tick_times: Vec<f64> = Vec::with_capacity(scenario.ticks as usize);
        let total_start = Instant::now();

        for _ in 0..scenario.ticks {
            let report = sim.step(dt)?;
            tick_times.push(report.wall_time);
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let state = sim.state();
        let rest = &sim.topology().rest_positions;
        let max_displacement = state
            .particles
            .ids()
            .map(|p| (state.particles.position(p) - rest[p.index()]).length())
            .fold(0.0_f32, f32::max);

        let avg_tick_time = if tick_times.is_empty() {
            0.0
        } else {
            tick_times.iter().sum::<f64>() / tick_times.len() as f64
        };
        let min_tick_time = tick_times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_tick_time = tick_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            particle_count: state.particles.particle_count,
            constraint_count: state.constraints.len(),
            ticks: scenario.ticks,
            total_wall_time,
            avg_tick_time,
            min_tick_time: if tick_times.is_empty() { 0.0 } else { min_tick_time },
            max_tick_time,
            final_kinetic_energy: state.particles.kinetic_energy(),
            broken_constraints: state.constraints.broken_count(),
            max_displacement,
        };

        tracing::info!(
            scenario = %metrics.scenario,
            ticks = metrics.ticks,
            avg_tick_ms = metrics.avg_tick_time * 1000.0,
            broken = metrics.broken_constraints,
            "scenario finished"
        );
        Ok(metrics)
    }

    /// Run every scenario kind with its default settings.
    pub fn run_all() -> RibbonResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}

