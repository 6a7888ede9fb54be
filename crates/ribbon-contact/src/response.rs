//! Contact pass results.

use ribbon_math::Vec3;

/// Result of one contact pass.
#[derive(Debug, Clone, Default)]
pub struct ContactResult {
    /// Number of particles corrected.
    pub resolved_count: u32,
    /// Deepest penetration found before correction.
    pub max_penetration: f32,
    /// Net impulse exchanged with the obstacle (sphere pass only).
    pub impulse_total: Vec3,
}
