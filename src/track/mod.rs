//! Track geometry: control points, the interpolating curve, and the
//! queries the ride layer makes against it each tick.

mod arc_length;
mod banking;
mod curve;
mod error;
mod layout;

pub use arc_length::parameter_for_distance;
pub use banking::banking_at;
pub use curve::{ControlPoint, Curve, CurveKind};
pub use error::{CurveError, LayoutError};
pub use layout::{default_layout, layout_from_json};
