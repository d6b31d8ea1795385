use crate::sim::{to_kmh, Curvature, Float3, Forces, Frame};

/// Mutable cart state, written only by the integrator.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VehicleState {
    /// Arc length from the start of the track, in `[0, total_length]`.
    pub distance: f32,
    /// Signed speed along the curve parametrization.
    pub velocity: f32,
    /// Signed along-track acceleration from the last tick.
    pub acceleration: f32,
    pub forces: Forces,
    /// Last valid curvature estimate; kept when the estimate degenerates.
    pub curvature: Curvature,
    pub centripetal: f32,
}

impl VehicleState {
    pub const fn new() -> Self {
        Self {
            distance: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            forces: Forces::RESTING,
            curvature: Curvature::ZERO,
            centripetal: 0.0,
        }
    }

    /// At rest at `distance` along the track.
    pub const fn at_distance(distance: f32) -> Self {
        Self {
            distance,
            ..Self::new()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Speed for display, in km/h.
    pub fn speed_kmh(&self) -> f32 {
        to_kmh(self.velocity.abs())
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-tick result handed to the renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickOutput {
    pub position: Float3,
    pub frame: Frame,
    /// Curve parameter the cart sits at.
    pub u: f32,
    /// The cart was stopped at a track end this tick.
    pub at_boundary: bool,
}
