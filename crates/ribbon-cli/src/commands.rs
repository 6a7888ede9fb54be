//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;

use ribbon_bench::metrics::BenchmarkMetrics;
use ribbon_bench::runner::ScenarioRunner;
use ribbon_bench::scenarios::{Scenario, ScenarioKind};
use ribbon_debug::snapshot::StateSnapshot;
use ribbon_sim::{RibbonSimulation, SimulationConfig};
use ribbon_telemetry::sinks::{JsonLinesSink, TracingSink};

/// Run a simulation, optionally recording events and a final snapshot.
pub fn simulate(
    config_path: Option<&str>,
    ticks: u32,
    snapshot_path: Option<&str>,
    events_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Ribbon Simulation");
    println!("─────────────────");

    let config = match config_path {
        Some(path) => {
            println!("Config: {path}");
            SimulationConfig::from_path(path)?
        }
        None => {
            println!("Config: defaults");
            SimulationConfig::default()
        }
    };
    let dt = config.dt;

    let mut sim = RibbonSimulation::new(config)?;
    sim.event_bus_mut()
        .add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    if let Some(path) = events_path {
        let writer = BufWriter::new(File::create(path)?);
        sim.event_bus_mut().add_sink(Box::new(JsonLinesSink::new(writer)));
    }

    println!(
        "Grid: {} particles, {} constraints, {} ticks at dt = {dt}",
        sim.topology().particle_count(),
        sim.topology().constraint_count(),
        ticks
    );
    println!();

    let mut total_wall = 0.0;
    for _ in 0..ticks {
        let report = sim.step(dt)?;
        total_wall += report.wall_time;
        if !report.newly_broken.is_empty() {
            println!(
                "  tick {:>5}: {} constraint(s) broken, {} active",
                report.tick,
                report.newly_broken.len(),
                report.active_constraints
            );
        }
    }
    sim.finish();

    let mesh = sim.build_mesh()?;

    println!();
    println!("Sim time:     {:.3}s", sim.sim_time());
    println!("Wall time:    {:.3}ms", total_wall * 1000.0);
    println!("Broken:       {}", sim.constraints().broken_count());
    println!("Kinetic E:    {:.6e}", sim.state().particles.kinetic_energy());
    if let Some((min_y, max_y)) = mesh.y_range() {
        println!("Y range:      [{min_y:.4}, {max_y:.4}]");
    }
    println!("Triangles:    {}", mesh.triangle_count());

    if let Some(path) = snapshot_path {
        sim.snapshot().write_to(path)?;
        println!("Snapshot written to: {path}");
    }
    if let Some(path) = events_path {
        println!("Events written to: {path}");
    }

    Ok(())
}

/// Run benchmark scenarios.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Ribbon Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "Unknown scenario: '{scenario_name}'. Available: {}, all",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({}x{} grid, {} ticks)",
            kind.name(),
            scenario.config.solver.grid_width,
            scenario.config.solver.grid_height,
            scenario.ticks,
        );

        let metrics =
            ScenarioRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg tick:      {:.3}ms", metrics.avg_tick_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Broken:        {}", metrics.broken_constraints);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Print a summary of a state snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Ribbon Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = StateSnapshot::read_from(path)?;

    println!("Tick:         {}", snapshot.tick);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count);
    println!(
        "Constraints:  {} ({} broken)",
        snapshot.constraint_count(),
        snapshot.broken_count()
    );

    if snapshot.particle_count > 0 {
        let ys = snapshot.positions.chunks_exact(3).map(|p| p[1]);
        let (min_y, max_y) = ys.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        let max_speed = snapshot
            .velocities
            .chunks_exact(3)
            .map(|v| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt())
            .fold(0.0_f32, f32::max);
        println!("Y range:      [{min_y:.4}, {max_y:.4}]");
        println!("Max speed:    {max_speed:.4}");
    }

    Ok(())
}

/// Load a config and build the simulation it describes without running it.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig::from_path(path)?;
    let sim = RibbonSimulation::new(config)?;

    println!("✓ {path} is valid");
    println!(
        "  {}x{} grid: {} particles, {} constraints",
        sim.config().solver.grid_width,
        sim.config().solver.grid_height,
        sim.topology().particle_count(),
        sim.topology().constraint_count()
    );
    println!("  dt = {}, substeps = {}", sim.config().dt, sim.config().solver.substeps);
    println!(
        "  sphere: {}",
        if sim.sphere().is_some() { "kinematic" } else { "none" }
    );
    Ok(())
}
