use super::curve::ControlPoint;
use super::error::{CurveError, LayoutError};

/// The stock 19-point ride.
///
/// Starts on a downward slope at the station crest so a cart released from
/// rest rolls forward, then: first drop, camel-back hill, a right-hand
/// banked sweep, an S-bend back under the lift, and a low flat brake run.
/// Positions in metres, banking in radians.
pub fn default_layout() -> Vec<ControlPoint> {
    vec![
        ControlPoint::new(0.0, 30.0, 0.0, 0.0),
        ControlPoint::new(10.0, 28.0, 0.0, 0.0),
        ControlPoint::new(30.0, 5.0, 0.0, 0.0),
        ControlPoint::new(50.0, 3.0, 0.0, 0.0),
        ControlPoint::new(70.0, 18.0, 0.0, 0.0),
        ControlPoint::new(90.0, 4.0, 0.0, 0.0),
        ControlPoint::new(110.0, 4.0, 10.0, 0.4),
        ControlPoint::new(120.0, 6.0, 30.0, 0.7),
        ControlPoint::new(110.0, 8.0, 50.0, 0.7),
        ControlPoint::new(90.0, 10.0, 55.0, 0.4),
        ControlPoint::new(70.0, 12.0, 50.0, 0.0),
        ControlPoint::new(55.0, 9.0, 35.0, -0.5),
        ControlPoint::new(45.0, 7.0, 45.0, -0.7),
        ControlPoint::new(40.0, 6.0, 60.0, -0.5),
        ControlPoint::new(30.0, 5.0, 70.0, 0.0),
        ControlPoint::new(15.0, 4.0, 70.0, 0.3),
        ControlPoint::new(5.0, 3.0, 60.0, 0.2),
        ControlPoint::new(0.0, 2.0, 45.0, 0.0),
        ControlPoint::new(0.0, 2.0, 30.0, 0.0),
    ]
}

/// Parses a JSON array of control points (`{"x", "y", "z", "banking"}`).
pub fn layout_from_json(json: &str) -> Result<Vec<ControlPoint>, LayoutError> {
    let points: Vec<ControlPoint> = serde_json::from_str(json)?;
    if points.len() < 2 {
        return Err(CurveError::TooFewPoints {
            found: points.len(),
        }
        .into());
    }
    Ok(points)
}
