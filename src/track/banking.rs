use super::curve::ControlPoint;

/// Banking angle at curve parameter `u`.
///
/// `[0, 1]` is split into `points.len() - 1` equal segments. The banking of
/// the two bracketing points is interpolated linearly by the position inside
/// the segment. A `u` on a shared segment boundary resolves to the earlier
/// segment. A `u` past the final segment (rounding) returns the last point's
/// banking.
pub fn banking_at(u: f32, points: &[ControlPoint]) -> f32 {
    let Some(last) = points.last() else {
        return 0.0;
    };
    if points.len() == 1 || u <= 0.0 {
        return points[0].banking;
    }

    let segments = (points.len() - 1) as f32;
    for (j, pair) in points.windows(2).enumerate() {
        let start = j as f32 / segments;
        let end = (j + 1) as f32 / segments;
        if u >= start && u <= end {
            let local = (u - start) / (end - start);
            return pair[0].banking * (1.0 - local) + pair[1].banking * local;
        }
    }

    last.banking
}
