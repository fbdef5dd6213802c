use super::error::EngineError;
use super::query::ShiftPair;
use crate::core::models::table::{LookupTable, split_row};
use tracing::debug;

/// Reverse look-up: torsional angles compatible with a pair of observed shifts.
#[derive(Debug, Clone, Copy)]
pub struct AngleRecoverer<'a> {
    table: &'a LookupTable,
}

impl<'a> AngleRecoverer<'a> {
    pub fn new(table: &'a LookupTable) -> Self {
        Self { table }
    }

    /// Angle columns of every row whose shielding lies strictly within `eps` of
    /// both targets, in table order.
    ///
    /// Shifts are turned back into shielding with `ef_corr` before comparing.
    /// No interpolation takes place, so only tabulated conformers are returned
    /// and an empty result is a valid answer.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTolerance` if `eps` is not positive and finite.
    pub fn recover(
        &self,
        shifts: ShiftPair,
        ef_corr: f64,
        eps: f64,
    ) -> Result<Vec<&'a [f64]>, EngineError> {
        if !(eps.is_finite() && eps > 0.0) {
            return Err(EngineError::InvalidTolerance(eps));
        }
        let [s0, s1] = shifts.to_shielding(ef_corr);
        let within = |value: f64, target: f64| target - eps < value && value < target + eps;

        let table: &'a LookupTable = self.table;
        let matches: Vec<&'a [f64]> = table
            .rows()
            .filter_map(|row| {
                let (angles, [c1, cx]) = split_row(row);
                (within(c1, s0) && within(cx, s1)).then_some(angles)
            })
            .collect();

        debug!(
            "Recovered {} of {} conformers for shielding ({}, {}) ± {}.",
            matches.len(),
            table.len(),
            s0,
            s1,
            eps
        );
        Ok(matches)
    }
}
