//! Railcart - real-time physics for a single cart on a roller coaster track.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **sim**: Physics/math primitives (Float3, Frame, Curvature, Forces)
//! - **track**: Catmull-Rom curve, banking, arc-length lookup, layouts
//! - **ride**: Per-tick integrator and the Simulation driver
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use railcart::Simulation;
//!
//! let mut sim = Simulation::with_default_layout()?;
//! let output = sim.step(1.0 / 60.0);
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `railcart_*` FFI functions.

pub mod ride;
pub mod sim;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use ride::{Simulation, TickOutput, VehicleState};
pub use sim::{Float3, Forces, Frame, PhysicsConfig, Quaternion, RideParams};
pub use track::{ControlPoint, Curve, CurveError, CurveKind};
