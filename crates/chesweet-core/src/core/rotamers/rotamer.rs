/// Staggered side-chain positions present in the look-up tables, in degrees.
///
/// The order matters: it decides which rotamer wins when an angle sits exactly
/// between two of them.
pub const CANONICAL_ROTAMERS: [f64; 4] = [-180.0, -60.0, 60.0, 180.0];

/// Snaps a chi or omega angle to the closest canonical rotamer.
///
/// Distance is the plain absolute difference, the angle is not wrapped first.
/// On an exact tie the rotamer listed first in [`CANONICAL_ROTAMERS`] is kept.
pub fn nearest_rotamer(chi: f64) -> f64 {
    let mut best = CANONICAL_ROTAMERS[0];
    let mut best_distance = (best - chi).abs();
    for &candidate in &CANONICAL_ROTAMERS[1..] {
        let distance = (candidate - chi).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}
