//! Integration tests for ribbon-sim.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ribbon_debug::hooks::InspectionHook;
use ribbon_math::Vec3;
use ribbon_mesh::generators::ribbon_grid;
use ribbon_sim::{FixedStepDriver, RibbonSimulation, SimulationConfig};
use ribbon_telemetry::sinks::VecSink;
use ribbon_types::{ConstraintId, ParticleId, RibbonError};

fn weightless_debug() -> SimulationConfig {
    let mut config = SimulationConfig::debug();
    config.solver.gravity = [0.0, 0.0, 0.0];
    config
}

#[derive(Default)]
struct Counters {
    begins: AtomicU32,
    ends: AtomicU32,
    breaks: AtomicU32,
    finished: AtomicU32,
}

struct CountingHook(Arc<Counters>);

impl InspectionHook for CountingHook {
    fn on_tick_begin(&mut self, _tick: u64, _sim_time: f64, _dt: f32) {
        self.0.begins.fetch_add(1, Ordering::Relaxed);
    }

    fn on_constraint_broken(&mut self, _tick: u64, _constraint: ConstraintId, length: f32) {
        assert!(length > 0.6);
        self.0.breaks.fetch_add(1, Ordering::Relaxed);
    }

    fn on_tick_end(&mut self, _tick: u64, _wall_time: f64) {
        self.0.ends.fetch_add(1, Ordering::Relaxed);
    }

    fn on_simulation_end(&mut self) {
        self.0.finished.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &str {
        "counting_hook"
    }
}

// ─── Tick Tests ───────────────────────────────────────────────

#[test]
fn zero_dt_tick_is_a_no_op() {
    let mut sim = RibbonSimulation::new(weightless_debug()).unwrap();
    let before = sim.state().particles.clone();

    let report = sim.tick(0.0).unwrap();

    let after = &sim.state().particles;
    assert_eq!(after.pos_x, before.pos_x);
    assert_eq!(after.pos_y, before.pos_y);
    assert_eq!(after.pos_z, before.pos_z);
    assert!(report.newly_broken.is_empty());
    assert_eq!(report.active_constraints, sim.constraints().len());
    assert_eq!(report.tick, 0);
    assert_eq!(sim.tick_count(), 1);
}

#[test]
fn invalid_dt_is_rejected_before_mutation() {
    let mut sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    let before = sim.state().particles.clone();

    assert!(matches!(sim.tick(-0.01), Err(RibbonError::InvalidTimestep(_))));
    assert!(sim.tick(f32::NAN).is_err());
    assert_eq!(sim.tick_count(), 0);
    assert_eq!(sim.state().particles.pos_y, before.pos_y);
}

#[test]
fn invalid_config_fails_fast() {
    let mut config = SimulationConfig::default();
    config.solver.grid_width = 1;
    assert!(RibbonSimulation::new(config).is_err());
}

#[test]
fn initial_kick_moves_first_particle_up() {
    let mut sim = RibbonSimulation::new(weightless_debug()).unwrap();
    sim.tick(0.02).unwrap();
    assert!(sim.state().particles.position(ParticleId(0)).y > 0.0);
}

#[test]
fn ribbon_stays_planar() {
    let config = SimulationConfig::default().with_sphere(Vec3::new(2.0, 6.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
    let mut sim = RibbonSimulation::new(config).unwrap();
    for _ in 0..200 {
        sim.step(0.02).unwrap();
        let particles = &sim.state().particles;
        assert!(particles.pos_z.iter().all(|z| *z == 0.0));
        assert!(particles.vel_z.iter().all(|z| *z == 0.0));
    }
}

#[test]
fn ribbon_rests_on_ground() {
    let mut sim = RibbonSimulation::new(SimulationConfig::default()).unwrap();
    for _ in 0..300 {
        sim.tick(0.02).unwrap();
        assert!(sim.state().particles.pos_y.iter().all(|y| *y >= -4.0011));
    }
    assert!(sim.state().particles.is_finite());
    assert!((sim.sim_time() - 6.0).abs() < 1e-6);
}

#[test]
fn breaking_is_monotonic() {
    let mut config = SimulationConfig::default()
        .with_sphere(Vec3::new(-2.0, 2.0, 0.0), Vec3::new(6.0, 0.0, 0.0));
    config.solver.break_threshold = 0.6;
    let mut sim = RibbonSimulation::new(config).unwrap();

    let mut active = sim.constraints().active_count();
    let mut broken_ids: Vec<ConstraintId> = Vec::new();
    for _ in 0..150 {
        let report = sim.step(0.02).unwrap();
        assert!(report.active_constraints <= active);
        assert_eq!(active - report.active_constraints, report.newly_broken.len());
        active = report.active_constraints;
        broken_ids.extend(report.newly_broken);
        assert!(broken_ids.iter().all(|c| !sim.constraints().is_active(*c)));
    }
}

#[test]
fn step_advances_sphere() {
    let config = SimulationConfig::debug().with_sphere(Vec3::new(10.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let mut sim = RibbonSimulation::new(config).unwrap();

    let report = sim.step(0.5).unwrap();

    assert_eq!(report.sphere_contacts, 0);
    assert_eq!(report.sphere_velocity, Some(Vec3::new(1.0, 0.0, 0.0)));
    assert!((sim.sphere().unwrap().position().x - 10.5).abs() < 1e-6);
}

#[test]
fn detached_sphere_is_not_collided() {
    let config = SimulationConfig::debug().with_sphere(Vec3::new(0.5, 0.5, 0.0), Vec3::ZERO);
    let mut sim = RibbonSimulation::new(config).unwrap();
    assert!(sim.detach_sphere().is_some());

    let report = sim.tick(0.02).unwrap();
    assert_eq!(report.sphere_contacts, 0);
    assert!(report.sphere_velocity.is_none());
}

// ─── Publication Tests ────────────────────────────────────────

#[test]
fn publish_copies_positions_and_normals() {
    let mut sim = RibbonSimulation::new(SimulationConfig::default()).unwrap();
    let mut mesh = sim.build_mesh().unwrap();
    assert_eq!(mesh.vertex_count(), 100);

    for _ in 0..10 {
        sim.tick(0.02).unwrap();
    }
    sim.publish(&mut mesh).unwrap();

    for p in sim.state().particles.ids() {
        assert_eq!(mesh.position(p.index()), sim.state().particles.position(p));
    }
    assert!((mesh.normal(0).length() - 1.0).abs() < 1e-4);
}

#[test]
fn publish_rejects_wrong_mesh() {
    let sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    let mut mesh = ribbon_grid(4, 4, 0.5);
    assert!(matches!(sim.publish(&mut mesh), Err(RibbonError::InvalidMesh(_))));
}

// ─── Telemetry Tests ──────────────────────────────────────────

#[test]
fn tick_emits_events_in_order() {
    let mut sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    let sink = VecSink::new();
    let buffer = sink.buffer();
    sim.event_bus_mut().add_sink(Box::new(sink));

    sim.tick(0.02).unwrap();
    sim.tick(0.02).unwrap();

    let events = buffer.lock().unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.kind_name()).collect();
    assert_eq!(
        &names[..5],
        &["tick_begin", "collision", "constraints_broken", "energy", "tick_end"]
    );
    assert_eq!(events.len(), 10);
    assert_eq!(events[5].tick, 1);
}

#[test]
fn hooks_are_called() {
    let counters = Arc::new(Counters::default());
    let mut config = SimulationConfig::default()
        .with_sphere(Vec3::new(-2.0, 2.0, 0.0), Vec3::new(6.0, 0.0, 0.0));
    config.solver.break_threshold = 0.6;
    let mut sim = RibbonSimulation::new(config).unwrap();
    sim.add_hook(Box::new(CountingHook(Arc::clone(&counters))));

    for _ in 0..100 {
        sim.step(0.02).unwrap();
    }
    sim.finish();

    assert_eq!(counters.begins.load(Ordering::Relaxed), 100);
    assert_eq!(counters.ends.load(Ordering::Relaxed), 100);
    assert_eq!(
        counters.breaks.load(Ordering::Relaxed) as usize,
        sim.constraints().broken_count()
    );
    assert_eq!(counters.finished.load(Ordering::Relaxed), 1);
}

#[test]
fn snapshot_tracks_progress() {
    let mut sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    sim.tick(0.02).unwrap();
    let snap = sim.snapshot();
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.particle_count, 9);
    assert!((snap.sim_time - 0.02).abs() < 1e-9);
}

// ─── Driver Tests ─────────────────────────────────────────────

#[test]
fn driver_runs_whole_steps() {
    let mut sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    let mut driver = FixedStepDriver::new(0.02).unwrap();

    assert_eq!(driver.advance(Duration::from_millis(50), &mut sim).unwrap(), 2);
    assert!((driver.accumulator() - 0.01).abs() < 1e-4);
    assert_eq!(driver.advance(Duration::from_millis(15), &mut sim).unwrap(), 1);
    assert_eq!(sim.tick_count(), 3);
}

#[test]
fn driver_caps_and_pauses() {
    let mut sim = RibbonSimulation::new(SimulationConfig::debug()).unwrap();
    let mut driver = FixedStepDriver::new(0.02).unwrap();

    assert_eq!(driver.advance(Duration::from_secs(1), &mut sim).unwrap(), 8);
    assert_eq!(driver.accumulator(), 0.0);

    driver.set_paused(true);
    assert_eq!(driver.advance(Duration::from_secs(1), &mut sim).unwrap(), 0);
    assert_eq!(sim.tick_count(), 8);

    driver.step(&mut sim).unwrap();
    assert_eq!(sim.tick_count(), 9);
}

#[test]
fn driver_rejects_bad_timestep() {
    assert!(FixedStepDriver::new(0.0).is_err());
    assert!(FixedStepDriver::new(-0.02).is_err());
    assert!(FixedStepDriver::new(f32::NAN).is_err());
    assert!(FixedStepDriver::new(f32::INFINITY).is_err());
    assert_eq!(FixedStepDriver::new(0.01).unwrap().dt(), 0.01);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_from_toml() {
    let config = SimulationConfig::from_toml_str(
        r#"
dt = 0.01

[solver]
grid_width = 6
grid_height = 4

[contact]
ground_level = -2.0

[sphere]
center = [2.0, 6.0, 0.0]
velocity = [0.0, -3.0, 0.0]
"#,
    )
    .unwrap();

    assert_eq!(config.dt, 0.01);
    assert_eq!(config.solver.grid_width, 6);
    assert_eq!(config.solver.stiffness, 100.0);
    assert_eq!(config.contact.ground_level, -2.0);
    assert_eq!(config.sphere.unwrap().velocity, [0.0, -3.0, 0.0]);
}

#[test]
fn config_toml_round_trip() {
    let config = SimulationConfig::debug().with_sphere(Vec3::new(1.0, 2.0, 0.0), Vec3::X);
    let text = config.to_toml_string().unwrap();
    assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn config_rejects_bad_values() {
    assert!(SimulationConfig::from_toml_str("dt = 0.0").is_err());
    assert!(SimulationConfig::from_toml_str("dt = \"fast\"").is_err());
    assert!(SimulationConfig::from_toml_str("[solver]\nsubsteps = 0").is_err());
    assert!(SimulationConfig::from_toml_str("").is_ok());
}
