use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::CurveError;
use crate::sim::Float3;

/// Parameter offset for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// Knot spacings below this are replaced to avoid dividing by ~0.
const MIN_KNOT_SPACING: f32 = 1e-4;

/// Track control point: position plus signed banking angle in radians.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub banking: f32,
}

impl ControlPoint {
    pub const fn new(x: f32, y: f32, z: f32, banking: f32) -> Self {
        Self { x, y, z, banking }
    }

    pub fn position(&self) -> Float3 {
        Float3::new(self.x, self.y, self.z)
    }
}

/// Catmull-Rom variant used to interpolate the control points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Uniform knots, tension 0.5. Can overshoot on uneven spacing.
    Uniform,
    /// Knot spacing `|Δp|^0.5`. No cusps or self-intersections within a segment.
    #[default]
    Centripetal,
    /// Knot spacing `|Δp|`.
    Chordal,
}

impl CurveKind {
    fn alpha(self) -> Option<f32> {
        match self {
            CurveKind::Uniform => None,
            CurveKind::Centripetal => Some(0.5),
            CurveKind::Chordal => Some(1.0),
        }
    }
}

/// Smooth interpolating curve through an ordered list of control points.
///
/// Parametrized by `u` in [0, 1], split evenly between the `n - 1` segments.
/// The parametrization is not arc-length proportional; the cached
/// arc-length table maps between the two and is the single source of
/// length for the whole crate.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Vec<ControlPoint>,
    positions: Vec<Float3>,
    kind: CurveKind,
    arc_lengths: Vec<f32>,
}

impl Curve {
    /// Builds the curve and its arc-length table of `arc_samples + 1` entries.
    pub fn build(
        points: Vec<ControlPoint>,
        kind: CurveKind,
        arc_samples: usize,
    ) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                found: points.len(),
            });
        }

        let positions = points.iter().map(ControlPoint::position).collect();
        let mut curve = Self {
            points,
            positions,
            kind,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.sample_arc_lengths(arc_samples.max(1));

        info!(
            points = curve.points.len(),
            kind = ?curve.kind,
            total_length = curve.total_length(),
            "built track curve"
        );
        Ok(curve)
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Cumulative lengths at `u = i / samples`, starting at 0.
    pub fn arc_lengths(&self) -> &[f32] {
        &self.arc_lengths
    }

    pub fn total_length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Position at parameter `u`, clamped to [0, 1].
    ///
    /// Exact at control points, including both ends.
    pub fn point_at(&self, u: f32) -> Float3 {
        let last = self.positions.len() - 1;
        if u.is_nan() || u <= 0.0 {
            return self.positions[0];
        }
        if u >= 1.0 {
            return self.positions[last];
        }

        let segments = self.segment_count();
        let scaled = u * segments as f32;
        let mut index = scaled.floor() as usize;
        let mut weight = scaled - index as f32;
        if index >= segments {
            index = segments - 1;
            weight = 1.0;
        }

        self.evaluate_segment(index, weight)
    }

    /// Unit tangent at parameter `u` in the direction of increasing `u`.
    ///
    /// Central difference, one-sided at the ends.
    pub fn tangent_at(&self, u: f32) -> Float3 {
        let u = clamp_unit(u);
        let a = (u - TANGENT_DELTA).max(0.0);
        let b = (u + TANGENT_DELTA).min(1.0);
        (self.point_at(b) - self.point_at(a)).normalize()
    }

    /// Accumulated arc length from the start to parameter `u`.
    pub fn length_at(&self, u: f32) -> f32 {
        let u = clamp_unit(u);
        let samples = self.arc_lengths.len() - 1;
        if u <= 0.0 {
            return 0.0;
        }
        if u >= 1.0 {
            return self.total_length();
        }

        let scaled = u * samples as f32;
        let index = (scaled.floor() as usize).min(samples - 1);
        let frac = scaled - index as f32;
        self.arc_lengths[index] * (1.0 - frac) + self.arc_lengths[index + 1] * frac
    }

    fn sample_arc_lengths(&self, samples: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(samples + 1);
        lengths.push(0.0);

        let mut total = 0.0;
        let mut prev = self.point_at(0.0);
        for i in 1..=samples {
            let p = self.point_at(i as f32 / samples as f32);
            total += prev.distance(p);
            lengths.push(total);
            prev = p;
        }
        lengths
    }

    fn evaluate_segment(&self, index: usize, t: f32) -> Float3 {
        let n = self.positions.len();
        let p1 = self.positions[index];
        let p2 = self.positions[index + 1];
        // Reflected phantom points keep the curve passing through both ends.
        let p0 = if index > 0 {
            self.positions[index - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if index + 2 < n {
            self.positions[index + 2]
        } else {
            p2 * 2.0 - p1
        };

        let (m1, m2) = match self.kind.alpha() {
            None => ((p2 - p0) * 0.5, (p3 - p1) * 0.5),
            Some(alpha) => nonuniform_tangents(p0, p1, p2, p3, alpha),
        };

        hermite(p1, p2, m1, m2, t)
    }
}

fn clamp_unit(u: f32) -> f32 {
    if u > 0.0 {
        u.min(1.0)
    } else {
        0.0
    }
}

/// Segment end tangents for a non-uniform Catmull-Rom, rescaled to the
/// `[0, 1]` parametrization of the middle segment.
fn nonuniform_tangents(
    p0: Float3,
    p1: Float3,
    p2: Float3,
    p3: Float3,
    alpha: f32,
) -> (Float3, Float3) {
    let mut dt1 = p1.distance(p2).powf(alpha);
    if dt1 < MIN_KNOT_SPACING {
        dt1 = 1.0;
    }
    let mut dt0 = p0.distance(p1).powf(alpha);
    if dt0 < MIN_KNOT_SPACING {
        dt0 = dt1;
    }
    let mut dt2 = p2.distance(p3).powf(alpha);
    if dt2 < MIN_KNOT_SPACING {
        dt2 = dt1;
    }

    let m1 = (p1 - p0) * (1.0 / dt0) - (p2 - p0) * (1.0 / (dt0 + dt1)) + (p2 - p1) * (1.0 / dt1);
    let m2 = (p2 - p1) * (1.0 / dt1) - (p3 - p1) * (1.0 / (dt1 + dt2)) + (p3 - p2) * (1.0 / dt2);

    (m1 * dt1, m2 * dt1)
}

/// Cubic Hermite segment from `p1` (t = 0) to `p2` (t = 1).
fn hermite(p1: Float3, p2: Float3, m1: Float3, m2: Float3, t: f32) -> Float3 {
    let c2 = p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2;
    let c3 = p1 * 2.0 - p2 * 2.0 + m1 + m2;
    let t2 = t * t;
    let t3 = t2 * t;
    p1 + m1 * t + c2 * t2 + c3 * t3
}
