use super::math::Float3;
use super::physics;

/// Local track curvature: `magnitude` is 1/radius, `direction` points
/// towards the centre of curvature (zero on a straight).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curvature {
    pub magnitude: f32,
    pub direction: Float3,
}

impl Curvature {
    pub const fn new(magnitude: f32, direction: Float3) -> Self {
        Self {
            magnitude,
            direction,
        }
    }

    /// Estimates curvature from three consecutive curve samples.
    ///
    /// Takes the unit tangents of the chords `prev -> curr` and `curr -> next`.
    /// Their difference over the arc length between the chord midpoints is
    /// the curvature vector. Returns `None` when either chord has zero length
    /// (sample window collapsed at a curve end, or duplicated control points).
    pub fn from_samples(prev: Float3, curr: Float3, next: Float3) -> Option<Self> {
        let back = curr - prev;
        let ahead = next - curr;
        let back_len = back.magnitude();
        let ahead_len = ahead.magnitude();
        if back_len < physics::EPSILON || ahead_len < physics::EPSILON {
            return None;
        }

        let turn = ahead * (1.0 / ahead_len) - back * (1.0 / back_len);
        let span = 0.5 * (back_len + ahead_len);
        let vector = turn * (1.0 / span);
        let magnitude = vector.magnitude();
        if !magnitude.is_finite() {
            return None;
        }

        Some(Self::new(magnitude, vector.normalize()))
    }

    /// Centripetal acceleration at the given speed.
    pub fn centripetal(&self, velocity: f32) -> f32 {
        self.magnitude * velocity * velocity
    }

    pub const ZERO: Self = Self::new(0.0, Float3::ZERO);
}

impl Default for Curvature {
    fn default() -> Self {
        Self::ZERO
    }
}
