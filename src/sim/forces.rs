use super::curvature::Curvature;
use super::frame::Frame;
use super::math::Float3;

/// Rider-felt load in multiples of standard gravity.
///
/// Accelerometer convention: a cart resting on level track reads
/// `vertical = 1`. Positive `lateral` pushes towards `right`, positive
/// `longitudinal` is speeding up in the direction of travel.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Forces {
    pub vertical: f32,
    pub lateral: f32,
    pub longitudinal: f32,
}

impl Forces {
    pub const fn new(vertical: f32, lateral: f32, longitudinal: f32) -> Self {
        Self {
            vertical,
            lateral,
            longitudinal,
        }
    }

    /// Combines gravity and centripetal load into G readouts.
    ///
    /// # Arguments
    /// * `gravity_local` - Gravitational acceleration split into
    ///   (tangential, normal, lateral) components of `frame`
    /// * `curvature` - Local curvature at the cart
    /// * `frame` - Cart frame the readouts are expressed in
    /// * `velocity` - Speed along the track (sign ignored)
    /// * `travel_acceleration` - Along-track acceleration in the direction of travel
    /// * `gravity` - Magnitude of gravity, the G unit
    pub fn compute(
        gravity_local: Float3,
        curvature: Curvature,
        frame: &Frame,
        velocity: f32,
        travel_acceleration: f32,
        gravity: f32,
    ) -> Self {
        let centripetal = curvature.centripetal(velocity);
        let toward_centre = curvature.direction;

        let vertical = (centripetal * toward_centre.dot(frame.up) - gravity_local.y) / gravity;
        let lateral = (centripetal * toward_centre.dot(frame.right) - gravity_local.z) / gravity;
        let longitudinal = travel_acceleration / gravity;

        Self::new(
            finite_or_zero(vertical),
            finite_or_zero(lateral),
            finite_or_zero(longitudinal),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.vertical.is_finite() && self.lateral.is_finite() && self.longitudinal.is_finite()
    }

    pub const RESTING: Self = Self::new(1.0, 0.0, 0.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
}

impl Default for Forces {
    fn default() -> Self {
        Self::RESTING
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
