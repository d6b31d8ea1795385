//! Pure physics/math primitives for the cart simulation.
//!
//! Nothing in here knows about curves or control points; the track and
//! ride layers feed it vectors and scalars.

mod config;
mod curvature;
mod forces;
mod frame;
mod math;
mod ride_params;

// Physics constants module
pub mod physics;

pub use config::PhysicsConfig;
pub use curvature::Curvature;
pub use forces::Forces;
pub use frame::{build_frame, Frame, FrameHint};
pub use math::{Float3, Matrix3, Quaternion};
pub use physics::{
    integrate_velocity, rolling_friction, to_kmh, ARC_SAMPLES, CURVATURE_EPSILON,
    DEFAULT_MAX_SPEED, EPSILON, G, MAX_DT, MS_TO_KMH, STRAIGHT_THRESHOLD,
};
pub use ride_params::{RideParams, FRICTION_RANGE, MASS_RANGE};
