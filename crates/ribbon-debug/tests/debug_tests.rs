//! Integration tests for ribbon-debug.

use ribbon_debug::hooks::{BreakRecorder, InspectionHook, TelemetryHook};
use ribbon_debug::snapshot::StateSnapshot;
use ribbon_solver::config::SolverConfig;
use ribbon_solver::state::SolverState;
use ribbon_telemetry::events::EventKind;
use ribbon_types::{ConstraintId, ParticleId};

fn small_state() -> SolverState {
    let (state, _) = SolverState::new(&SolverConfig::debug()).unwrap();
    state
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_events() {
    let mut hook = TelemetryHook::new();
    hook.on_tick_begin(0, 0.0, 0.02);
    hook.on_constraint_broken(0, ConstraintId(3), 1.2);
    hook.on_constraint_broken(0, ConstraintId(4), 1.1);
    hook.on_tick_end(0, 0.001);

    let events = hook.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].tick, 0);
    assert_eq!(
        events[1].kind,
        EventKind::ConstraintsBroken {
            newly_broken: 2,
            total_broken: 2
        }
    );
    assert_eq!(events[2].kind, EventKind::TickEnd { wall_time: 0.001 });
}

#[test]
fn telemetry_hook_skips_empty_break_reports() {
    let mut hook = TelemetryHook::new();
    hook.on_tick_begin(5, 0.1, 0.02);
    hook.on_tick_end(5, 0.0);
    let events = hook.drain_events();
    assert_eq!(events.len(), 2);
    assert!(hook.drain_events().is_empty());
}

#[test]
fn break_recorder_records_breaks() {
    let mut hook = BreakRecorder::new();
    hook.on_tick_begin(0, 0.0, 0.02);
    hook.on_constraint_broken(7, ConstraintId(1), 0.95);
    hook.on_simulation_end();

    assert_eq!(hook.breaks, vec![(7, ConstraintId(1), 0.95)]);
    assert!(hook.is_finished());
    assert_eq!(hook.name(), "break_recorder");
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_captures_state() {
    let state = small_state();
    let snap = StateSnapshot::from_state(4, 0.08, &state);

    assert_eq!(snap.particle_count, 9);
    assert_eq!(snap.positions.len(), 27);
    assert_eq!(snap.constraint_count(), state.constraints.len());
    assert_eq!(snap.broken_count(), 0);
    assert_eq!(snap.position(4), Some([0.5, 0.5, 0.0]));
    assert_eq!(snap.position(9), None);
    // perturbed particle 0 starts with an upward kick
    assert_eq!(snap.velocities[1], 3.0);
}

#[test]
fn snapshot_bytes_round_trip() {
    let mut state = small_state();
    state.constraints.deactivate(ConstraintId(2));
    let snap = StateSnapshot::from_state(10, 0.2, &state);

    let bytes = snap.to_bytes().unwrap();
    let recovered = StateSnapshot::from_bytes(&bytes).unwrap();
    assert_eq!(recovered, snap);
    assert_eq!(recovered.broken_count(), 1);
}

#[test]
fn snapshot_rejects_garbage() {
    assert!(StateSnapshot::from_bytes(&[1, 2, 3]).is_err());
}

#[test]
fn snapshot_rejects_short_buffers() {
    let forged = StateSnapshot {
        tick: 0,
        sim_time: 0.0,
        particle_count: 9,
        positions: vec![0.0; 3],
        velocities: vec![0.0; 27],
        active: vec![true; 20],
    };
    assert!(forged.validate().is_err());

    let bytes = forged.to_bytes().unwrap();
    assert!(StateSnapshot::from_bytes(&bytes).is_err());

    let mut state = small_state();
    let before = state.particles.pos_y.clone();
    assert!(forged.restore_into(&mut state).is_err());
    assert_eq!(state.particles.pos_y, before);

    let good = StateSnapshot::from_state(0, 0.0, &state);
    assert!(good.max_position_delta(&forged).is_none());
}

#[test]
fn snapshot_restore() {
    let mut state = small_state();
    state.particles.pos_x[8] = 3.0;
    state.constraints.deactivate(ConstraintId(0));
    let snap = StateSnapshot::from_state(1, 0.02, &state);

    let mut fresh = small_state();
    snap.restore_into(&mut fresh).unwrap();
    assert_eq!(fresh.particles.position(ParticleId(8)).x, 3.0);
    assert!(!fresh.constraints.is_active(ConstraintId(0)));
    assert_eq!(StateSnapshot::from_state(1, 0.02, &fresh), snap);
}

#[test]
fn snapshot_restore_rejects_mismatch() {
    let snap = StateSnapshot::from_state(0, 0.0, &small_state());
    let (mut other, _) = SolverState::new(&SolverConfig::default()).unwrap();
    assert!(snap.restore_into(&mut other).is_err());
}

#[test]
fn snapshot_position_delta() {
    let state = small_state();
    let a = StateSnapshot::from_state(0, 0.0, &state);
    let mut moved = state.clone();
    moved.particles.pos_y[3] += 0.25;
    let b = StateSnapshot::from_state(1, 0.02, &moved);

    assert!((a.max_position_delta(&b).unwrap() - 0.25).abs() < 1e-6);
    let big = StateSnapshot::from_state(0, 0.0, &SolverState::new(&SolverConfig::default()).unwrap().0);
    assert!(a.max_position_delta(&big).is_none());
}

#[test]
fn snapshot_file_round_trip() {
    let path = std::env::temp_dir().join(format!("ribbon_snapshot_{}.bin", std::process::id()));
    let snap = StateSnapshot::from_state(3, 0.06, &small_state());
    snap.write_to(&path).unwrap();
    let recovered = StateSnapshot::read_from(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(recovered, snap);
}
