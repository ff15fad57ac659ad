//! Geometry shared by whoever draws the wheel and whoever reads its result.
//!
//! Angles are in degrees, growing clockwise from the positive x-axis. Segment `i`
//! of a wheel rotated by `rotation` covers `[rotation + i * slice, rotation + (i + 1) * slice)`,
//! and the winner is the segment covering the pointer.
use super::{FULL_TURN, POINTER_ANGLE};

const LABEL_MAX_CHARS: usize = 18;
const LABEL_KEPT_CHARS: usize = 15;

pub fn slice_angle(count: usize) -> f64 {
    FULL_TURN / count as f64
}

/// Bring any angle back into `[0, 360)`.
pub fn normalize(degrees: f64) -> f64 {
    let angle = degrees % FULL_TURN;
    let angle = if angle < 0.0 { angle + FULL_TURN } else { angle };
    if angle >= FULL_TURN { 0.0 } else { angle }
}

/// Index of the segment sitting under a pointer placed at `pointer_angle`.
/// The pointer may be given in any turn, `-90` and `270` are the same position.
///
/// Returns `None` for an empty wheel. Floating point overshoot on the last
/// boundary is clamped back to the last segment.
pub fn segment_at(rotation: f64, count: usize, pointer_angle: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let slice = slice_angle(count);
    let effective = normalize(normalize(pointer_angle) - normalize(rotation));
    let index = (effective / slice).floor();
    if index <= 0.0 {
        Some(0)
    } else {
        Some((index as usize).min(count - 1))
    }
}

/// Winning index for a wheel stopped at `final_rotation` under the top pointer.
pub fn resolve_winner<S>(final_rotation: f64, segments: &[S]) -> Option<usize> {
    segment_at(final_rotation, segments.len(), POINTER_ANGLE)
}

/// Start and end angle of segment `index`, not normalized.
pub fn segment_span(index: usize, count: usize, rotation: f64) -> (f64, f64) {
    let slice = slice_angle(count);
    let start = rotation + index as f64 * slice;
    (start, start + slice)
}

pub fn segment_mid_angle(index: usize, count: usize, rotation: f64) -> f64 {
    let (start, end) = segment_span(index, count, rotation);
    (start + end) / 2.0
}

/// Text printed on a segment, shortened when the name does not fit.
pub fn segment_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let kept: String = name.chars().take(LABEL_KEPT_CHARS).collect();
        format!("{}...", kept)
    } else {
        name.to_owned()
    }
}
