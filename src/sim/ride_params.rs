use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

pub const MASS_RANGE: RangeInclusive<f32> = 50.0..=1000.0;
pub const FRICTION_RANGE: RangeInclusive<f32> = 0.0..=0.1;

/// Live-tunable cart parameters.
///
/// Applied between ticks; the integrator reads them once per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideParams {
    pub mass: f32,
    pub friction: f32,
}

impl RideParams {
    pub fn new(mass: f32, friction: f32) -> Self {
        Self { mass, friction }
    }

    /// Returns a copy with `mass` clamped into [`MASS_RANGE`].
    pub fn with_mass(self, mass: f32) -> Self {
        Self {
            mass: clamp_into("mass", mass, &MASS_RANGE),
            ..self
        }
    }

    /// Returns a copy with `friction` clamped into [`FRICTION_RANGE`].
    pub fn with_friction(self, friction: f32) -> Self {
        Self {
            friction: clamp_into("friction", friction, &FRICTION_RANGE),
            ..self
        }
    }
}

impl Default for RideParams {
    fn default() -> Self {
        Self {
            mass: 228.6,
            friction: 0.015,
        }
    }
}

fn clamp_into(name: &str, value: f32, range: &RangeInclusive<f32>) -> f32 {
    // NaN lands on the lower bound.
    let clamped = if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    };
    if clamped != value {
        debug!(param = name, requested = value, applied = clamped, "clamped ride parameter");
    }
    clamped
}
