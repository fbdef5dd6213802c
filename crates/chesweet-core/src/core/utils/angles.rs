use std::f64::consts::PI;

/// Spacing of the phi/psi grid the look-up tables were computed on, in degrees.
pub const GRID_STEP: f64 = 10.0;

/// Inclusive pair of grid-aligned bounds enclosing a torsional angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub down: f64,
    pub up: f64,
}

impl GridCell {
    /// Returns `true` when `value` lies in `[down, up]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.down && value <= self.up
    }
}

impl From<GridCell> for (f64, f64) {
    fn from(cell: GridCell) -> Self {
        (cell.down, cell.up)
    }
}

/// Wraps an angle in degrees into `[-180, 180]`.
///
/// Angles already inside the interval are returned untouched. Anything else goes
/// through `atan2(sin, cos)`, which gives the circular equivalent rather than a
/// plain modulo.
pub fn normalize_angle(angle: f64) -> f64 {
    if (-180.0..=180.0).contains(&angle) {
        return angle;
    }
    let radians = angle * PI / 180.0;
    radians.sin().atan2(radians.cos()) * 180.0 / PI
}

/// Computes the grid cell of width `step` that encloses `angle`.
///
/// The angle is normalized first. A cell whose upper bound would exceed 180 is
/// replaced by the last full cell below 180, so `grid_cell(180.0, 10.0)` is
/// `(170, 180)` and no cell ever reaches past the boundary.
pub fn grid_cell(angle: f64, step: f64) -> GridCell {
    let angle = normalize_angle(angle);
    let down = (angle / step).floor() * step;
    let up = down + step;
    if up > 180.0 {
        GridCell {
            down: 180.0 - step,
            up: 180.0,
        }
    } else {
        GridCell { down, up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(angle: f64) -> (f64, f64) {
        grid_cell(angle, GRID_STEP).into()
    }

    #[test]
    fn grid_cell_matches_reference_values() {
        assert_eq!(cell(-10.0), (-10.0, 0.0));
        assert_eq!(cell(10.0), (10.0, 20.0));
        assert_eq!(cell(180.0), (170.0, 180.0));
        assert_eq!(cell(-180.0), (-180.0, -170.0));
        assert_eq!(cell(60.0), (60.0, 70.0));
        assert_eq!(cell(75.0), (70.0, 80.0));
    }

    #[test]
    fn out_of_range_angles_wrap_around_the_circle() {
        assert_eq!(cell(-185.0), (170.0, 180.0));
        assert_eq!(cell(185.0), (-180.0, -170.0));
        assert_eq!(cell(365.0), (0.0, 10.0));
        assert_eq!(cell(-355.0), (0.0, 10.0));
    }

    #[test]
    fn grid_cell_of_wrapped_angle_equals_grid_cell_of_normalized_angle() {
        for angle in [181.5, 200.0, 275.0, 359.0, 725.0, -181.5, -200.0, -290.0, -725.0] {
            assert_eq!(
                grid_cell(angle, GRID_STEP),
                grid_cell(normalize_angle(angle), GRID_STEP),
                "mismatch for {angle}"
            );
        }
    }

    #[test]
    fn normalize_leaves_in_range_angles_untouched() {
        for angle in [-180.0, -97.25, 0.0, 42.0, 180.0] {
            assert_eq!(normalize_angle(angle), angle);
        }
    }

    #[test]
    fn normalize_brings_angles_into_range() {
        assert!((normalize_angle(270.0) - -90.0).abs() < 1e-9);
        assert!((normalize_angle(-270.0) - 90.0).abs() < 1e-9);
        assert!((normalize_angle(540.0).abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn upper_bound_never_exceeds_180_for_coarse_steps() {
        let c = grid_cell(179.0, 7.0);
        assert_eq!((c.down, c.up), (173.0, 180.0));
        let c = grid_cell(180.0, 30.0);
        assert_eq!((c.down, c.up), (150.0, 180.0));
    }

    #[test]
    fn cells_are_inclusive_on_both_ends() {
        let c = grid_cell(53.0, GRID_STEP);
        assert!(c.contains(50.0));
        assert!(c.contains(60.0));
        assert!(!c.contains(60.000001));
        assert!(!c.contains(49.999999));
    }
}
