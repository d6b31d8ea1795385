use super::curve::Curve;

/// Curve parameter at which the accumulated arc length reaches `distance`.
///
/// Uses the curve's cached arc-length table, the same one that defines
/// [`Curve::total_length`]. Finds the first sample whose accumulated length
/// is `>= distance` and interpolates linearly inside the bracketing interval.
/// The caller clamps `distance` to `[0, total_length]`. At the two bounds
/// this returns exactly 0 and 1.
pub fn parameter_for_distance(distance: f32, curve: &Curve) -> f32 {
    let lengths = curve.arc_lengths();
    let samples = lengths.len() - 1;
    if distance <= 0.0 {
        return 0.0;
    }
    if distance >= curve.total_length() {
        return 1.0;
    }

    let hi = lengths.partition_point(|&l| l < distance).clamp(1, samples);
    let lo = hi - 1;
    let seg_len = lengths[hi] - lengths[lo];
    let t = if seg_len > 0.0 {
        (distance - lengths[lo]) / seg_len
    } else {
        0.0
    };

    ((lo as f32 + t) / samples as f32).min(1.0)
}
