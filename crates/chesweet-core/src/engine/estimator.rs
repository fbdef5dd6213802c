use super::error::EngineError;
use super::interpolation::{self, Sample};
use super::query::{ShiftPair, TorsionQuery};
use crate::core::models::table::{LookupTable, TableLayout, split_row};
use crate::core::rotamers::rotamer::nearest_rotamer;
use crate::core::utils::angles::{GRID_STEP, grid_cell, normalize_angle};
use nalgebra::Point2;
use tracing::{debug, warn};

/// Row count of a fully populated phi/psi cell: its four corners.
const CELL_CORNERS: usize = 4;

/// Side-chain columns a row must match exactly, as `(column, value)` pairs.
type RotamerFilter = Vec<(usize, f64)>;

/// Estimates chemical shifts from torsional angles against one look-up table.
#[derive(Debug, Clone, Copy)]
pub struct ShiftEstimator<'a> {
    table: &'a LookupTable,
}

impl<'a> ShiftEstimator<'a> {
    pub fn new(table: &'a LookupTable) -> Self {
        Self { table }
    }

    /// Chemical shifts of C1 and Cx at the queried conformation.
    ///
    /// Rows inside the phi/psi grid cell of the query (and on the snapped
    /// rotamers, for layouts that carry side-chain columns) are the candidates.
    /// With no candidate the result is [`ShiftPair::OUT_OF_RANGE`]; fewer than four
    /// are matched to the nearest one; four or more are linearly interpolated.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingTorsion` if the table layout needs a
    /// side-chain angle that `query` does not provide.
    pub fn estimate(&self, query: &TorsionQuery, ef_corr: f64) -> Result<ShiftPair, EngineError> {
        let phi_cell = grid_cell(query.phi, GRID_STEP);
        let psi_cell = grid_cell(query.psi, GRID_STEP);
        let rotamers = self.rotamer_filter(query)?;

        let candidates: Vec<Sample> = self
            .table
            .rows()
            .filter(|row| phi_cell.contains(row[0]) && psi_cell.contains(row[1]))
            .filter(|row| rotamers.iter().all(|&(column, value)| row[column] == value))
            .map(|row| {
                let (_, shielding) = split_row(row);
                Sample::new(row[0], row[1], shielding)
            })
            .collect();

        if candidates.is_empty() {
            return Ok(ShiftPair::OUT_OF_RANGE);
        }

        let at = Point2::new(normalize_angle(query.phi), normalize_angle(query.psi));
        let shielding = if candidates.len() < CELL_CORNERS {
            interpolation::nearest(&candidates, &at)
        } else {
            if candidates.len() > CELL_CORNERS {
                warn!(
                    "Data-density anomaly: {} rows in the cell phi {:?}, psi {:?} (expected at most {}). Interpolating over all of them.",
                    candidates.len(),
                    phi_cell,
                    psi_cell,
                    CELL_CORNERS
                );
            }
            interpolation::linear(&candidates, &at).or_else(|| {
                debug!(
                    "Linear interpolation undefined at ({}, {}) over {} rows, using the nearest row.",
                    at.x,
                    at.y,
                    candidates.len()
                );
                interpolation::nearest(&candidates, &at)
            })
        };

        Ok(shielding
            .map(|s| ShiftPair::from_shielding([s[0], s[1]], ef_corr))
            .unwrap_or(ShiftPair::OUT_OF_RANGE))
    }

    fn rotamer_filter(&self, query: &TorsionQuery) -> Result<RotamerFilter, EngineError> {
        let layout = self.table.layout();
        let required = |angle: Option<f64>, name: &'static str| {
            angle
                .map(nearest_rotamer)
                .ok_or(EngineError::MissingTorsion {
                    angle: name,
                    layout,
                })
        };

        Ok(match layout {
            TableLayout::Reduced2D => Vec::new(),
            TableLayout::Reduced3D => vec![(2, required(query.chi1, "omega")?)],
            TableLayout::Full4D => vec![
                (2, required(query.chi1, "chi1")?),
                (3, required(query.chi2, "chi2")?),
                (4, TableLayout::CHI3_SENTINEL),
            ],
            TableLayout::Full5D => vec![
                (2, required(query.chi1, "chi1")?),
                (3, required(query.chi2, "chi2")?),
                (4, required(query.chi3, "chi3")?),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EF_CORR: f64 = 183.4;
    const TOLERANCE: f64 = 1e-9;

    fn c1_plane(phi: f64, psi: f64) -> f64 {
        100.0 + 0.1 * phi + 0.2 * psi
    }

    fn cx_plane(phi: f64, psi: f64) -> f64 {
        90.0 + 0.3 * phi - 0.1 * psi
    }

    /// Reduced table on a 10° grid covering phi, psi in [0, 90], shielding linear in both.
    fn dense_reduced_table() -> LookupTable {
        let mut rows = Vec::new();
        for phi in (0..=90).step_by(10) {
            for psi in (0..=90).step_by(10) {
                let (phi, psi) = (phi as f64, psi as f64);
                rows.push([phi, psi, c1_plane(phi, psi), cx_plane(phi, psi)]);
            }
        }
        LookupTable::from_rows(TableLayout::Reduced2D, rows).unwrap()
    }

    fn assert_shifts(actual: ShiftPair, c1: f64, cx: f64) {
        assert!(
            (actual.c1 - c1).abs() < TOLERANCE && (actual.cx - cx).abs() < TOLERANCE,
            "expected ({c1}, {cx}), got {actual:?}"
        );
    }

    mod reduced_tests {
        use super::*;

        #[test]
        fn four_corner_cell_is_linearly_interpolated() {
            let table = dense_reduced_table();
            let shifts = ShiftEstimator::new(&table)
                .estimate(&TorsionQuery::new(53.0, 67.0), EF_CORR)
                .unwrap();
            assert_shifts(
                shifts,
                EF_CORR - c1_plane(53.0, 67.0),
                EF_CORR - cx_plane(53.0, 67.0),
            );
        }

        #[test]
        fn grid_point_query_returns_tabulated_value() {
            let table = dense_reduced_table();
            let shifts = ShiftEstimator::new(&table)
                .estimate(&TorsionQuery::new(50.0, 60.0), EF_CORR)
                .unwrap();
            assert_shifts(
                shifts,
                EF_CORR - c1_plane(50.0, 60.0),
                EF_CORR - cx_plane(50.0, 60.0),
            );
        }

        #[test]
        fn query_outside_the_computed_zone_is_out_of_range() {
            let table = dense_reduced_table();
            let shifts = ShiftEstimator::new(&table)
                .estimate(&TorsionQuery::new(-120.0, 150.0), EF_CORR)
                .unwrap();
            assert_eq!(shifts, ShiftPair::OUT_OF_RANGE);
            assert!(shifts.is_out_of_range());
        }

        #[test]
        fn border_cell_uses_the_nearest_row() {
            let table = LookupTable::from_rows(
                TableLayout::Reduced2D,
                [
                    [50.0, 60.0, 100.0, 80.0],
                    [60.0, 60.0, 101.0, 81.0],
                    [50.0, 70.0, 102.0, 82.0],
                ],
            )
            .unwrap();
            let shifts = ShiftEstimator::new(&table)
                .estimate(&TorsionQuery::new(58.0, 61.0), EF_CORR)
                .unwrap();
            assert_shifts(shifts, EF_CORR - 101.0, EF_CORR - 81.0);
        }

        #[test]
        fn wrapped_angles_select_the_same_cell() {
            let table = LookupTable::from_rows(
                TableLayout::Reduced2D,
                [
                    [170.0, -180.0, 100.0, 80.0],
                    [180.0, -180.0, 100.0, 80.0],
                    [170.0, -170.0, 100.0, 80.0],
                    [180.0, -170.0, 100.0, 80.0],
                ],
            )
            .unwrap();
            let estimator = ShiftEstimator::new(&table);
            let wrapped = estimator
                .estimate(&TorsionQuery::new(-185.0, 185.0), EF_CORR)
                .unwrap();
            let direct = estimator
                .estimate(&TorsionQuery::new(175.0, -175.0), EF_CORR)
                .unwrap();
            assert_shifts(wrapped, EF_CORR - 100.0, EF_CORR - 80.0);
            assert_shifts(direct, wrapped.c1, wrapped.cx);
        }

        #[test]
        fn omega_filters_reduced_one_six_tables() {
            let mut rows = Vec::new();
            for (omega, base) in [(60.0, 100.0), (180.0, 120.0)] {
                for (phi, psi) in [(50.0, 60.0), (60.0, 60.0), (50.0, 70.0), (60.0, 70.0)] {
                    rows.push([phi, psi, omega, base, base - 30.0]);
                }
            }
            let table = LookupTable::from_rows(TableLayout::Reduced3D, rows).unwrap();
            let estimator = ShiftEstimator::new(&table);

            let gauche = estimator
                .estimate(&TorsionQuery::new(55.0, 65.0).with_omega(64.0), EF_CORR)
                .unwrap();
            assert_shifts(gauche, EF_CORR - 100.0, EF_CORR - 70.0);

            let trans = estimator
                .estimate(&TorsionQuery::new(55.0, 65.0).with_omega(-175.0), EF_CORR)
                .unwrap();
            assert_eq!(trans, ShiftPair::OUT_OF_RANGE);

            let trans = estimator
                .estimate(&TorsionQuery::new(55.0, 65.0).with_omega(170.0), EF_CORR)
                .unwrap();
            assert_shifts(trans, EF_CORR - 120.0, EF_CORR - 90.0);
        }

        #[test]
        fn omega_is_required_for_one_six_tables() {
            let table =
                LookupTable::from_rows(TableLayout::Reduced3D, [[50.0, 60.0, 60.0, 1.0, 2.0]])
                    .unwrap();
            let result = ShiftEstimator::new(&table).estimate(&TorsionQuery::new(50.0, 60.0), EF_CORR);
            assert!(matches!(
                result,
                Err(EngineError::MissingTorsion { angle: "omega", .. })
            ));
        }

        #[test]
        fn estimate_is_idempotent() {
            let table = dense_reduced_table();
            let estimator = ShiftEstimator::new(&table);
            let query = TorsionQuery::new(43.7, 21.9);
            let first = estimator.estimate(&query, EF_CORR).unwrap();
            let second = estimator.estimate(&query, EF_CORR).unwrap();
            assert_eq!(first.c1.to_bits(), second.c1.to_bits());
            assert_eq!(first.cx.to_bits(), second.cx.to_bits());
        }

        #[test]
        fn over_populated_cell_is_still_interpolated() {
            let mut rows: Vec<[f64; 4]> = [(50.0, 60.0), (60.0, 60.0), (50.0, 70.0), (60.0, 70.0), (55.0, 60.0)]
                .iter()
                .map(|&(phi, psi)| [phi, psi, c1_plane(phi, psi), cx_plane(phi, psi)])
                .collect();
            rows.push([55.0, 70.0, c1_plane(55.0, 70.0), cx_plane(55.0, 70.0)]);
            let table = LookupTable::from_rows(TableLayout::Reduced2D, rows).unwrap();
            let shifts = ShiftEstimator::new(&table)
                .estimate(&TorsionQuery::new(52.0, 64.0), EF_CORR)
                .unwrap();
            assert_shifts(
                shifts,
                EF_CORR - c1_plane(52.0, 64.0),
                EF_CORR - cx_plane(52.0, 64.0),
            );
        }
    }

    mod full_tests {
        use super::*;

        fn full_row(phi: f64, psi: f64, chis: [f64; 3], shielding: [f64; 2]) -> [f64; 8] {
            [phi, psi, chis[0], chis[1], chis[2], 0.0, shielding[0], shielding[1]]
        }

        /// Four-corner cell on rotamer (60, -60, 180) plus decoys on other rotamers.
        fn full_table() -> LookupTable {
            let chis = [60.0, -60.0, 180.0];
            let rows = vec![
                full_row(50.0, 60.0, chis, [100.0, 90.0]),
                full_row(60.0, 60.0, chis, [104.0, 92.0]),
                full_row(50.0, 70.0, chis, [102.0, 96.0]),
                full_row(60.0, 70.0, chis, [110.0, 94.0]),
                full_row(50.0, 60.0, [60.0, -60.0, 60.0], [1.0, 1.0]),
                full_row(60.0, 70.0, [-60.0, -60.0, 180.0], [1.0, 1.0]),
                full_row(55.0, 65.0, [60.0, 60.0, 180.0], [1.0, 1.0]),
            ];
            LookupTable::from_rows(TableLayout::Full5D, rows).unwrap()
        }

        #[test]
        fn four_row_cell_matches_hand_computed_bilinear_value() {
            let table = full_table();
            let query = TorsionQuery::new(52.0, 65.0)
                .with_chi1(64.0)
                .with_chi2(-70.0)
                .with_chi3(-179.0 + 360.0);
            // t = 0.2, u = 0.5
            // C1: 100*0.4 + 104*0.1 + 102*0.4 + 110*0.1 = 102.2
            // Cx:  90*0.4 +  92*0.1 +  96*0.4 +  94*0.1 =  93.0
            let shifts = ShiftEstimator::new(&table).estimate(&query, EF_CORR).unwrap();
            assert_shifts(shifts, EF_CORR - 102.2, EF_CORR - 93.0);
        }

        #[test]
        fn rotamer_without_rows_is_out_of_range() {
            let table = full_table();
            let query = TorsionQuery::new(52.0, 65.0)
                .with_chi1(180.0)
                .with_chi2(180.0)
                .with_chi3(180.0);
            let shifts = ShiftEstimator::new(&table).estimate(&query, EF_CORR).unwrap();
            assert!(shifts.is_out_of_range());
        }

        #[test]
        fn chi3_is_required_for_general_full_tables() {
            let table = full_table();
            let query = TorsionQuery::new(52.0, 65.0).with_chi1(60.0).with_chi2(-60.0);
            let result = ShiftEstimator::new(&table).estimate(&query, EF_CORR);
            assert!(matches!(
                result,
                Err(EngineError::MissingTorsion { angle: "chi3", .. })
            ));
        }

        #[test]
        fn one_one_tables_match_the_chi3_sentinel() {
            let rows = vec![
                full_row(50.0, 60.0, [60.0, 180.0, 0.0], [100.0, 100.0]),
                full_row(50.0, 60.0, [60.0, 180.0, 60.0], [1.0, 1.0]),
            ];
            let table = LookupTable::from_rows(TableLayout::Full4D, rows).unwrap();
            let query = TorsionQuery::new(51.0, 61.0)
                .with_chi1(55.0)
                .with_chi2(170.0)
                .with_chi3(60.0);
            let shifts = ShiftEstimator::new(&table).estimate(&query, EF_CORR).unwrap();
            assert_shifts(shifts, EF_CORR - 100.0, EF_CORR - 100.0);
        }
    }

    mod logging_tests {
        use super::*;
        use std::fs::File;
        use tracing::Level;

        /// Runs `f` with a plain-text subscriber writing every level to a file,
        /// and returns what was logged.
        fn captured_log(f: impl FnOnce()) -> String {
            let temp_dir = tempfile::tempdir().unwrap();
            let log_path = temp_dir.path().join("estimator.log");
            let file = File::create(&log_path).unwrap();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file)
                .with_ansi(false)
                .with_max_level(Level::TRACE)
                .finish();
            tracing::subscriber::with_default(subscriber, f);
            std::fs::read_to_string(log_path).unwrap()
        }

        fn plane_rows(points: &[(f64, f64)]) -> LookupTable {
            let rows: Vec<[f64; 4]> = points
                .iter()
                .map(|&(phi, psi)| [phi, psi, c1_plane(phi, psi), cx_plane(phi, psi)])
                .collect();
            LookupTable::from_rows(TableLayout::Reduced2D, rows).unwrap()
        }

        #[test]
        fn over_populated_cell_logs_a_density_warning() {
            let table = plane_rows(&[
                (50.0, 60.0),
                (60.0, 60.0),
                (50.0, 70.0),
                (60.0, 70.0),
                (55.0, 60.0),
                (55.0, 70.0),
            ]);
            let log = captured_log(|| {
                ShiftEstimator::new(&table)
                    .estimate(&TorsionQuery::new(52.0, 64.0), EF_CORR)
                    .unwrap();
            });
            assert!(log.contains("WARN"));
            assert!(log.contains("Data-density anomaly: 6 rows"));
        }

        #[test]
        fn fully_populated_cell_logs_nothing() {
            let table = dense_reduced_table();
            let log = captured_log(|| {
                ShiftEstimator::new(&table)
                    .estimate(&TorsionQuery::new(52.0, 64.0), EF_CORR)
                    .unwrap();
            });
            assert!(log.is_empty(), "unexpected log output: {log}");
        }

        #[test]
        fn collinear_rows_fall_back_to_the_nearest_one_with_a_debug_record() {
            let table = plane_rows(&[(50.0, 60.0), (55.0, 60.0), (60.0, 60.0), (52.0, 60.0)]);
            let mut shifts = None;
            let log = captured_log(|| {
                shifts = Some(
                    ShiftEstimator::new(&table)
                        .estimate(&TorsionQuery::new(53.0, 61.0), EF_CORR)
                        .unwrap(),
                );
            });

            assert_shifts(
                shifts.unwrap(),
                EF_CORR - c1_plane(52.0, 60.0),
                EF_CORR - cx_plane(52.0, 60.0),
            );
            assert!(log.contains("DEBUG"));
            assert!(log.contains("Linear interpolation undefined at (53, 61) over 4 rows"));
            assert!(!log.contains("WARN"));
        }
    }
}
