use serde::{Deserialize, Serialize};

use super::physics;

/// Physical constants and numerical resolutions injected into the simulation.
///
/// Every formula reads these instead of the module constants so tests can
/// run the same ride under different gravity or speed limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (length / s^2).
    pub gravity: f32,
    /// Absolute speed limit along the track.
    pub max_speed: f32,
    /// Samples used for the arc-length table.
    pub arc_samples: usize,
    /// Half-width of the curvature sampling window, in curve parameter units.
    pub curvature_epsilon: f32,
    /// Tangent change (radians) below which the previous right vector is kept.
    pub straight_threshold: f32,
    /// Largest time step the driver will integrate in one tick.
    pub max_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: physics::G,
            max_speed: physics::DEFAULT_MAX_SPEED,
            arc_samples: physics::ARC_SAMPLES,
            curvature_epsilon: physics::CURVATURE_EPSILON,
            straight_threshold: physics::STRAIGHT_THRESHOLD,
            max_dt: physics::MAX_DT,
        }
    }
}
