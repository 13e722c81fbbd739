//! Angle and segment-selection math.
//!
//! Segment `i` of an n-slice wheel owns `[i * slice, (i + 1) * slice)` in the
//! wheel's own unrotated frame. Rotating the wheel by `rotation` and asking
//! which segment sits under the fixed pointer is the same as asking which
//! segment owns `POINTER_ANGLE - rotation` in the unrotated frame. This is
//! the only place that mapping exists; the renderer, the spin finalizer, and
//! the selection query all go through [`selected_index`].

use std::f64::consts::{FRAC_PI_2, TAU};

/// Screen-space "up", in the same coordinate convention the rotation is
/// applied in.
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

/// Nudge applied after snapping so the rotation never rests exactly on a
/// segment boundary where floating-point ties could flip the index.
pub const SNAP_EPSILON: f64 = 1e-6;

/// Normalize an angle into `[0, 2π)`. Handles negative input.
pub fn normalize(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Angular width of one segment on an n-slice wheel.
pub fn slice_angle(n: usize) -> f64 {
    TAU / n as f64
}

/// Index of the segment under the pointer for the given rotation, or `None`
/// for an empty wheel. `floor` makes boundaries inclusive-lower and
/// exclusive-upper, so every angle in `[0, 2π)` belongs to exactly one
/// segment.
pub fn selected_index(rotation: f64, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let relative = normalize(POINTER_ANGLE - normalize(rotation));
    Some((relative / slice_angle(n)).floor() as usize % n)
}

/// Rotation that puts segment `index`'s angular midpoint exactly under the
/// pointer, plus [`SNAP_EPSILON`] to stay off the boundary.
pub fn snap_rotation(index: usize, n: usize) -> f64 {
    normalize(POINTER_ANGLE - (index as f64 + 0.5) * slice_angle(n) + SNAP_EPSILON)
}
