//! Physical constants and simulation defaults.

/// Downward gravitational acceleration (simulation units).
pub const GRAVITY: f32 = 5.0;

/// Default fixed timestep delivered by the host loop (seconds).
pub const DEFAULT_DT: f32 = 1.0 / 50.0;

/// Default number of integration substeps per tick.
pub const DEFAULT_SUBSTEPS: u32 = 2;

/// Maximum constraints touching one particle (4 structural + 4 shear).
pub const MAX_CONSTRAINTS_PER_PARTICLE: usize = 8;

/// Stretched length beyond which a constraint breaks.
pub const DEFAULT_BREAK_THRESHOLD: f32 = 0.9;

/// Height of the ground plane.
pub const DEFAULT_GROUND_LEVEL: f32 = -4.0;

/// Radius of the dynamic sphere obstacle.
pub const DEFAULT_SPHERE_RADIUS: f32 = 0.5;

/// Lengths below this are treated as degenerate (no direction).
pub const EPSILON: f32 = 1.0e-7;
