//! Angle helpers shared by every layer.
//!
//! All longitudes handed out by this crate are degrees in [0, 360).

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_angle(degrees: f64) -> f64 {
    let n = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Shortest-arc distance between two longitudes, in [0, 180].
///
/// Taking the smaller of the two directed arcs keeps the result exactly
/// symmetric in its arguments.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).min(normalize_angle(b - a))
}

/// Signed difference `a - b` folded into [-180, 180).
pub fn signed_difference(a: f64, b: f64) -> f64 {
    normalize_angle(a - b + 180.0) - 180.0
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}
