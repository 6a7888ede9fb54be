//! The per-tick pipeline.
//!
//! ```text
//! tick(dt):
//!   integrate (substepped) → ground → sphere → planar → break → events
//! ```

use std::time::Instant;

use ribbon_contact::{CollisionPipeline, KinematicSphere, SphereBody};
use ribbon_debug::hooks::InspectionHook;
use ribbon_debug::snapshot::StateSnapshot;
use ribbon_math::Vec3;
use ribbon_mesh::generators::ribbon_grid;
use ribbon_mesh::normals::compute_vertex_normals;
use ribbon_mesh::TriangleMesh;
use ribbon_solver::{
    ConstraintEvaluator, ConstraintTable, ExplicitEuler, Integrator, RibbonTopology, SolverState,
};
use ribbon_telemetry::events::{EventKind, SimulationEvent};
use ribbon_telemetry::EventBus;
use ribbon_types::{ConstraintId, RibbonError, RibbonResult};

use crate::config::SimulationConfig;

/// Summary of one completed tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Index of the tick (0-based).
    pub tick: u64,
    pub ground_contacts: u32,
    pub sphere_contacts: u32,
    /// Constraints broken during this tick.
    pub newly_broken: Vec<ConstraintId>,
    /// Active constraints after the tick.
    pub active_constraints: usize,
    pub kinetic_energy: f64,
    /// Sphere velocity after collision feedback.
    pub sphere_velocity: Option<Vec3>,
    /// Wall-clock time for the tick (seconds).
    pub wall_time: f64,
}

/// A ribbon simulation: solver state plus everything that runs on it.
pub struct RibbonSimulation {
    config: SimulationConfig,
    topology: RibbonTopology,
    state: SolverState,
    integrator: Box<dyn Integrator>,
    collisions: CollisionPipeline,
    evaluator: ConstraintEvaluator,
    bus: EventBus,
    hooks: Vec<Box<dyn InspectionHook>>,
    tick: u64,
    sim_time: f64,
}

impl RibbonSimulation {
    /// Build the lattice, apply the initial kick and set up collisions.
    pub fn new(config: SimulationConfig) -> RibbonResult<Self> {
        config.validate()?;
        let (state, topology) = SolverState::new(&config.solver)?;

        let mut collisions = CollisionPipeline::from_config(&config.contact);
        if let Some(setup) = &config.sphere {
            collisions.attach_sphere(Box::new(KinematicSphere::new(
                Vec3::from_array(setup.center),
                Vec3::from_array(setup.velocity),
            )));
        }

        tracing::debug!(
            particles = topology.particle_count(),
            constraints = topology.constraint_count(),
            sphere = config.sphere.is_some(),
            "ribbon simulation initialized"
        );

        Ok(Self {
            integrator: Box::new(ExplicitEuler::from_config(&config.solver)),
            evaluator: ConstraintEvaluator::from_config(&config.solver),
            collisions,
            topology,
            state,
            config,
            bus: EventBus::new(),
            hooks: Vec::new(),
            tick: 0,
            sim_time: 0.0,
        })
    }

    /// Run one tick of length `dt`.
    ///
    /// Fails only for a negative or non-finite `dt`, before anything is
    /// mutated. `dt == 0` is a valid tick that moves nothing.
    pub fn tick(&mut self, dt: f32) -> RibbonResult<TickReport> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(RibbonError::InvalidTimestep(dt));
        }
        let start = Instant::now();
        let tick = self.tick;

        for hook in &mut self.hooks {
            hook.on_tick_begin(tick, self.sim_time, dt);
        }
        self.bus.emit(SimulationEvent::new(
            tick,
            EventKind::TickBegin {
                sim_time: self.sim_time,
                dt,
            },
        ));

        self.integrator.integrate(&mut self.state, dt)?;
        let contacts = self.collisions.step(&mut self.state);
        let newly_broken = self.evaluator.evaluate(&mut self.state);

        for &c in &newly_broken {
            let length = self.state.constraints.current_length(c, &self.state.particles);
            for hook in &mut self.hooks {
                hook.on_constraint_broken(tick, c, length);
            }
        }
        if !newly_broken.is_empty() {
            tracing::debug!(tick, count = newly_broken.len(), "constraints broken");
        }

        let kinetic_energy = self.state.particles.kinetic_energy();
        let active_constraints = self.state.constraints.active_count();
        let wall_time = start.elapsed().as_secs_f64();

        self.bus.emit(SimulationEvent::new(
            tick,
            EventKind::Collision {
                ground_contacts: contacts.ground.resolved_count,
                sphere_contacts: contacts.sphere.resolved_count,
                sphere_velocity: contacts.sphere_velocity.map(|v| v.to_array()),
            },
        ));
        self.bus.emit(SimulationEvent::new(
            tick,
            EventKind::ConstraintsBroken {
                newly_broken: newly_broken.len() as u32,
                total_broken: self.state.constraints.broken_count() as u32,
            },
        ));
        self.bus.emit(SimulationEvent::new(
            tick,
            EventKind::Energy {
                kinetic: kinetic_energy,
            },
        ));
        self.bus
            .emit(SimulationEvent::new(tick, EventKind::TickEnd { wall_time }));
        self.bus.flush();

        for hook in &mut self.hooks {
            hook.on_tick_end(tick, wall_time);
        }

        self.tick += 1;
        self.sim_time += dt as f64;

        Ok(TickReport {
            tick,
            ground_contacts: contacts.ground.resolved_count,
            sphere_contacts: contacts.sphere.resolved_count,
            newly_broken,
            active_constraints,
            kinetic_energy,
            sphere_velocity: contacts.sphere_velocity,
            wall_time,
        })
    }

    /// One fixed step of the world: a tick, then the attached sphere
    /// moves by `dt`.
    pub fn step(&mut self, dt: f32) -> RibbonResult<TickReport> {
        let report = self.tick(dt)?;
        if let Some(sphere) = self.collisions.sphere_mut() {
            sphere.advance(dt);
        }
        Ok(report)
    }

    /// Copy particle positions into `mesh` and recompute its normals.
    pub fn publish(&self, mesh: &mut TriangleMesh) -> RibbonResult<()> {
        let particles = &self.state.particles;
        mesh.update_positions(&particles.pos_x, &particles.pos_y, &particles.pos_z)?;
        compute_vertex_normals(mesh);
        Ok(())
    }

    /// A display mesh matching the lattice, already holding current positions.
    pub fn build_mesh(&self) -> RibbonResult<TriangleMesh> {
        let solver = &self.config.solver;
        let mut mesh = ribbon_grid(solver.grid_width, solver.grid_height, solver.spacing);
        self.publish(&mut mesh)?;
        Ok(mesh)
    }

    /// Tell hooks and sinks the run is over.
    pub fn finish(&mut self) {
        for hook in &mut self.hooks {
            hook.on_simulation_end();
        }
        self.bus.finalize();
    }

    /// Capture particle state and constraint activity at the current tick.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_state(self.tick, self.sim_time, &self.state)
    }

    // ─── Accessors ───

    /// The configuration the simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Particle and constraint buffers.
    pub fn state(&self) -> &SolverState {
        &self.state
    }

    /// Constraint table, including broken constraints.
    pub fn constraints(&self) -> &ConstraintTable {
        &self.state.constraints
    }

    /// Lattice layout with rest lengths and adjacency.
    pub fn topology(&self) -> &RibbonTopology {
        &self.topology
    }

    /// Name of the active integrator.
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// The attached sphere, if any.
    pub fn sphere(&self) -> Option<&dyn SphereBody> {
        self.collisions.sphere()
    }

    /// Mutable access to the attached sphere, if any.
    pub fn sphere_mut(&mut self) -> Option<&mut (dyn SphereBody + 'static)> {
        self.collisions.sphere_mut()
    }

    /// Attach a sphere, returning the one it replaces.
    pub fn attach_sphere(&mut self, body: Box<dyn SphereBody>) -> Option<Box<dyn SphereBody>> {
        self.collisions.attach_sphere(body)
    }

    /// Remove the sphere. Later ticks skip the sphere pass.
    pub fn detach_sphere(&mut self) -> Option<Box<dyn SphereBody>> {
        self.collisions.detach_sphere()
    }

    /// Number of ticks completed.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds elapsed.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// The event bus, for registering sinks.
    pub fn event_bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Register an inspection hook. Hooks run in registration order.
    pub fn add_hook(&mut self, hook: Box<dyn InspectionHook>) {
        self.hooks.push(hook);
    }
}
