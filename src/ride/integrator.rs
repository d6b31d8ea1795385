use tracing::debug;

use super::state::{TickOutput, VehicleState};
use crate::sim::{
    build_frame, integrate_velocity, rolling_friction, Curvature, Float3, Forces, FrameHint,
    PhysicsConfig, RideParams,
};
use crate::track::{banking_at, parameter_for_distance, Curve};

/// +1 when moving along increasing `u` (or at rest), -1 when moving back.
fn travel_sign(velocity: f32) -> f32 {
    if velocity < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Position and orientation at `distance` without advancing anything.
///
/// The tangent points in the direction of travel. Banking is mirrored when
/// travelling backwards so the track tilt stays the same in world space.
pub fn pose_at(
    curve: &Curve,
    distance: f32,
    velocity: f32,
    hint: Option<&FrameHint>,
    config: &PhysicsConfig,
) -> (TickOutput, FrameHint) {
    let u = parameter_for_distance(distance.clamp(0.0, curve.total_length()), curve);
    let position = curve.point_at(u);
    let direction = travel_sign(velocity);
    let tangent = curve.tangent_at(u) * direction;
    let banking = banking_at(u, curve.control_points()) * direction;
    let (frame, next_hint) = build_frame(tangent, banking, hint, config.straight_threshold);

    (
        TickOutput {
            position,
            frame,
            u,
            at_boundary: false,
        },
        next_hint,
    )
}

/// Advances the cart by one time step.
///
/// Position moves first with the incoming velocity. Forces, the velocity
/// update and the G readouts are then all evaluated at the new position,
/// and the G readouts use the updated velocity. Hitting either end of the
/// track stops the cart there for this tick.
///
/// `hint` is the frame continuity memory from the previous tick; the
/// returned hint feeds the next one.
pub fn tick(
    state: &mut VehicleState,
    hint: Option<&FrameHint>,
    curve: &Curve,
    params: &RideParams,
    config: &PhysicsConfig,
    dt: f32,
) -> (TickOutput, FrameHint) {
    let total = curve.total_length();
    let advanced = state.distance + state.velocity * dt;
    let at_boundary = !(0.0..=total).contains(&advanced);
    state.distance = advanced.clamp(0.0, total);
    if at_boundary {
        debug!(
            distance = state.distance,
            velocity = state.velocity,
            "cart reached track end, stopping"
        );
        state.velocity = 0.0;
    }

    let (mut output, next_hint) = pose_at(curve, state.distance, state.velocity, hint, config);
    output.at_boundary = at_boundary;
    let frame = output.frame;
    let direction = travel_sign(state.velocity);

    // (tangential, normal, lateral) components of the weight.
    let mass = params.mass;
    let weight = frame.to_local(Float3::new(0.0, -config.gravity * mass, 0.0));
    let friction = rolling_friction(state.velocity, weight.y, params.friction);

    let travel_acceleration = (weight.x + friction) / mass;
    state.acceleration = travel_acceleration * direction;
    if !at_boundary {
        state.velocity = integrate_velocity(
            state.velocity,
            state.acceleration,
            weight.x / mass * direction,
            dt,
            config.max_speed,
        );
    }

    let eps = config.curvature_epsilon;
    let estimate = Curvature::from_samples(
        curve.point_at((output.u - eps).max(0.0)),
        output.position,
        curve.point_at((output.u + eps).min(1.0)),
    );
    if let Some(curvature) = estimate {
        state.curvature = curvature;
    }
    state.centripetal = state.curvature.centripetal(state.velocity);
    state.forces = Forces::compute(
        weight * (1.0 / mass),
        state.curvature,
        &frame,
        state.velocity,
        travel_acceleration,
        config.gravity,
    );

    (output, next_hint)
}
