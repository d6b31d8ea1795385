pub const G: f32 = 9.80665;
pub const EPSILON: f32 = 1.192_093e-7;
pub const DEFAULT_MAX_SPEED: f32 = 40.0;
pub const ARC_SAMPLES: usize = 1000;
pub const CURVATURE_EPSILON: f32 = 0.001;
pub const STRAIGHT_THRESHOLD: f32 = 0.01;
pub const MAX_DT: f32 = 0.1;
pub const MS_TO_KMH: f32 = 3.6;

/// Rolling friction along the direction of travel.
///
/// Opposes motion with magnitude `coefficient * |normal|`. A cart at rest
/// gets no friction, so friction alone never starts it moving.
pub fn rolling_friction(velocity: f32, normal_component: f32, coefficient: f32) -> f32 {
    if velocity == 0.0 {
        return 0.0;
    }
    -coefficient * normal_component.abs()
}

/// Advance a signed velocity by one explicit step and clamp to `max_speed`.
///
/// When friction is strong enough to reverse a moving cart on its own
/// (gravity is not pulling it back), the cart stops at zero instead.
///
/// # Arguments
/// * `velocity` - Signed velocity along the track parametrization
/// * `acceleration` - Signed acceleration along the track parametrization
/// * `gravity_part` - Signed share of `acceleration` coming from gravity
/// * `dt` - Time step in seconds
/// * `max_speed` - Absolute speed limit
pub fn integrate_velocity(
    velocity: f32,
    acceleration: f32,
    gravity_part: f32,
    dt: f32,
    max_speed: f32,
) -> f32 {
    let next = velocity + acceleration * dt;
    let reversed = velocity != 0.0 && next * velocity < 0.0;
    if reversed && gravity_part * velocity >= 0.0 {
        return 0.0;
    }
    next.clamp(-max_speed, max_speed)
}

pub fn to_kmh(speed: f32) -> f32 {
    speed * MS_TO_KMH
}
