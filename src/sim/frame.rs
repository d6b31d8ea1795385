use tracing::debug;

use super::math::{Float3, Matrix3, Quaternion};

/// Below this, `cross(tangent, world_up)` is treated as degenerate.
const DEGENERATE_CROSS: f32 = 1e-4;

/// Orthonormal cart orientation at a point on the track.
///
/// Right-handed basis of three unit vectors:
/// - `tangent`: direction of travel
/// - `up`: away from the rails, towards the rider's head
/// - `right`: `tangent x up`
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Float3,
    pub up: Float3,
    pub right: Float3,
}

impl Frame {
    pub const fn new(tangent: Float3, up: Float3, right: Float3) -> Self {
        Self { tangent, up, right }
    }

    /// Re-orthonormalizes the frame using the Gram-Schmidt process.
    ///
    /// Preserves tangent exactly, orthogonalizes right against it,
    /// then recomputes up as right x tangent.
    pub fn reorthonormalize(self) -> Self {
        let tangent = self.tangent.normalize();
        let right = (self.right - tangent * tangent.dot(self.right)).normalize();
        let up = right.cross(tangent).normalize();
        Self::new(tangent, up, right)
    }

    /// Basis matrix with columns (tangent, up, right).
    pub fn basis(&self) -> Matrix3 {
        Matrix3::from_columns(self.tangent, self.up, self.right)
    }

    /// Expresses a world vector as (tangential, normal, lateral) components.
    pub fn to_local(&self, v: Float3) -> Float3 {
        self.basis().transpose().multiply_vector(v)
    }

    /// Rotation mapping world X/Y/Z onto tangent/up/right.
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_matrix(&self.basis())
    }

    pub fn roll(&self) -> f32 {
        (-self.right.y).atan2(self.up.y)
    }

    pub fn pitch(&self) -> f32 {
        let mag = (self.tangent.x * self.tangent.x + self.tangent.z * self.tangent.z).sqrt();
        self.tangent.y.atan2(mag)
    }

    pub fn yaw(&self) -> f32 {
        (-self.tangent.z).atan2(self.tangent.x)
    }

    pub fn is_finite(&self) -> bool {
        self.tangent.is_finite() && self.up.is_finite() && self.right.is_finite()
    }

    pub const DEFAULT: Self = Self::new(Float3::RIGHT, Float3::UP, Float3::new(0.0, 0.0, 1.0));
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Continuity memory carried from one frame build to the next.
///
/// `right` is the unbanked right vector and `tangent` is the reference
/// tangent it was last derived from world-up at.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameHint {
    pub tangent: Float3,
    pub right: Float3,
}

/// Builds the cart frame for `tangent` rolled by `banking` radians.
///
/// While the tangent stays within `straight_threshold` of the hint's
/// reference tangent, the hint's right vector is reused (projected onto the
/// plane normal to the tangent) instead of being recomputed from world-up.
/// When the tangent is parallel to world-up the hint's right vector is used
/// if there is one, else the right vector is derived from [`Float3::BACK`].
///
/// Returns the new frame and the hint for the next call.
pub fn build_frame(
    tangent: Float3,
    banking: f32,
    hint: Option<&FrameHint>,
    straight_threshold: f32,
) -> (Frame, FrameHint) {
    let mut tangent = tangent.normalize();
    if tangent == Float3::ZERO {
        debug!("zero-length tangent, falling back to previous direction");
        tangent = hint.map_or(Float3::RIGHT, |h| h.tangent);
    }

    let carried = hint
        .filter(|h| h.tangent.angle_between(tangent) < straight_threshold)
        .and_then(|h| project_onto_plane(h.right, tangent).map(|r| (r, h.tangent)));

    let (base_right, reference) = match carried {
        Some(carried) => carried,
        None => (right_from_world_up(tangent, hint), tangent),
    };

    let banked = Quaternion::from_axis_angle(tangent, banking).mul_vec(base_right);
    let up = banked.cross(tangent).normalize();
    let right = tangent.cross(up).normalize();

    (
        Frame::new(tangent, up, right),
        FrameHint {
            tangent: reference,
            right: base_right,
        },
    )
}

fn right_from_world_up(tangent: Float3, hint: Option<&FrameHint>) -> Float3 {
    let right = tangent.cross(Float3::UP);
    if right.magnitude() >= DEGENERATE_CROSS {
        return right.normalize();
    }

    debug!(
        tangent_y = tangent.y,
        "tangent parallel to world up, using fallback right vector"
    );
    hint.and_then(|h| project_onto_plane(h.right, tangent))
        .unwrap_or_else(|| tangent.cross(Float3::BACK).normalize())
}

fn project_onto_plane(v: Float3, normal: Float3) -> Option<Float3> {
    let projected = v - normal * normal.dot(v);
    if projected.magnitude() < DEGENERATE_CROSS {
        None
    } else {
        Some(projected.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-5;
    const THRESHOLD: f32 = 0.01;

    fn assert_orthonormal(frame: &Frame) {
        assert_relative_eq!(frame.tangent.magnitude(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.up.magnitude(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.right.magnitude(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.tangent.dot(frame.up), 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.tangent.dot(frame.right), 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.up.dot(frame.right), 0.0, epsilon = TOLERANCE);

        let handed = frame.tangent.cross(frame.up);
        assert_relative_eq!(handed.dot(frame.right), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_default_frame_orthonormal() {
        assert_orthonormal(&Frame::DEFAULT);
    }

    #[test]
    fn flat_tangent_no_banking_gives_world_up() {
        let (frame, hint) = build_frame(Float3::RIGHT, 0.0, None, THRESHOLD);

        assert_relative_eq!(frame.up.y, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.right.z, 1.0, epsilon = TOLERANCE);
        assert_eq!(hint.tangent, frame.tangent);
        assert_orthonormal(&frame);
    }

    #[test]
    fn banking_rolls_about_tangent() {
        let banking = PI / 6.0;
        let (frame, _) = build_frame(Float3::RIGHT, banking, None, THRESHOLD);

        assert_relative_eq!(frame.roll(), banking, epsilon = TOLERANCE);
        assert_relative_eq!(frame.tangent.x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.up.y, banking.cos(), epsilon = TOLERANCE);
        assert_orthonormal(&frame);
    }

    #[test]
    fn hint_stores_unbanked_right() {
        let (_, hint) = build_frame(Float3::RIGHT, 0.7, None, THRESHOLD);
        assert_relative_eq!(hint.right.y, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(hint.right.z, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn near_parallel_tangent_reuses_previous_right() {
        let (_, hint) = build_frame(Float3::RIGHT, 0.0, None, THRESHOLD);

        let nudged = Float3::new(1.0, 0.001, 0.002).normalize();
        let (frame, next) = build_frame(nudged, 0.0, Some(&hint), THRESHOLD);

        assert_eq!(next.tangent, hint.tangent);
        assert_relative_eq!(frame.right.z, 1.0, epsilon = 1e-3);
        assert_orthonormal(&frame);
    }

    #[test]
    fn turning_tangent_recomputes_right() {
        let (_, hint) = build_frame(Float3::RIGHT, 0.0, None, THRESHOLD);

        let turned = Float3::new(0.0, 0.0, -1.0);
        let (frame, next) = build_frame(turned, 0.0, Some(&hint), THRESHOLD);

        assert_eq!(next.tangent, turned);
        assert_relative_eq!(frame.right.x, 1.0, epsilon = TOLERANCE);
        assert_orthonormal(&frame);
    }

    #[test]
    fn vertical_tangent_without_hint_is_finite() {
        let (frame, _) = build_frame(Float3::UP, 0.3, None, THRESHOLD);
        assert!(frame.is_finite());
        assert_orthonormal(&frame);
    }

    #[test]
    fn vertical_tangent_uses_hint_right() {
        let climbing = Float3::new(1.0, 2.0, 0.0).normalize();
        let (_, hint) = build_frame(climbing, 0.0, None, THRESHOLD);
        let (frame, _) = build_frame(Float3::UP, 0.0, Some(&hint), THRESHOLD);

        assert!(frame.is_finite());
        assert_relative_eq!(frame.right.z, 1.0, epsilon = TOLERANCE);
        assert_orthonormal(&frame);
    }

    #[test]
    fn zero_tangent_falls_back_to_hint() {
        let (_, hint) = build_frame(Float3::BACK, 0.0, None, THRESHOLD);
        let (frame, _) = build_frame(Float3::ZERO, 0.0, Some(&hint), THRESHOLD);
        assert_relative_eq!(frame.tangent.z, -1.0, epsilon = TOLERANCE);
        assert_orthonormal(&frame);
    }

    #[test]
    fn to_local_splits_gravity() {
        let (frame, _) = build_frame(Float3::new(1.0, -1.0, 0.0), 0.0, None, THRESHOLD);
        let local = frame.to_local(Float3::new(0.0, -10.0, 0.0));

        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(local.x, 10.0 * s, epsilon = 1e-4);
        assert_relative_eq!(local.y, -10.0 * s, epsilon = 1e-4);
        assert_relative_eq!(local.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_maps_axes_onto_frame() {
        let (frame, _) = build_frame(Float3::new(0.3, -0.4, -1.0), 0.5, None, THRESHOLD);
        let q = frame.rotation();

        let t = q.mul_vec(Float3::RIGHT);
        let u = q.mul_vec(Float3::UP);
        assert_relative_eq!(t.x, frame.tangent.x, epsilon = 1e-4);
        assert_relative_eq!(t.y, frame.tangent.y, epsilon = 1e-4);
        assert_relative_eq!(t.z, frame.tangent.z, epsilon = 1e-4);
        assert_relative_eq!(u.x, frame.up.x, epsilon = 1e-4);
        assert_relative_eq!(u.y, frame.up.y, epsilon = 1e-4);
        assert_relative_eq!(u.z, frame.up.z, epsilon = 1e-4);
    }

    #[test]
    fn pitch_and_yaw_readouts() {
        let (frame, _) = build_frame(Float3::new(0.0, 1.0, -1.0), 0.0, None, THRESHOLD);
        assert_relative_eq!(frame.pitch(), PI / 4.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.yaw(), PI / 2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_reorthonormalize_corrects_drift() {
        let drifted = Frame::new(
            Float3::new(1.0001, 0.0, 0.0),
            Float3::new(0.0001, 1.0, 0.0).normalize(),
            Float3::new(0.0, 0.0001, 1.0).normalize(),
        );
        assert_orthonormal(&drifted.reorthonormalize());
    }
}
