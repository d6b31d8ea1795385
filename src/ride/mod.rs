//! Per-tick cart dynamics and the driver that owns them.
//!
//! [`tick`] is a pure step function over an explicit [`VehicleState`] and
//! frame hint. [`Simulation`] bundles both with a curve for callers that
//! just want to step a ride.

mod integrator;
mod simulation;
mod state;

pub use integrator::{pose_at, tick};
pub use simulation::Simulation;
pub use state::{TickOutput, VehicleState};
