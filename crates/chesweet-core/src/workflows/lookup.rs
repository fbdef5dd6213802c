use crate::core::models::table::{LookupTable, TableMode};
use crate::core::tables::store::TableStore;
use crate::engine::config::LookupConfig;
use crate::engine::error::EngineError;
use crate::engine::estimator::ShiftEstimator;
use crate::engine::query::{ShiftPair, TorsionQuery};
use crate::engine::recoverer::AngleRecoverer;
use tracing::{info, instrument};

/// Entry point for chemical shift estimation and torsion recovery.
///
/// Tables are loaded once on construction; every query afterwards is a read-only
/// look-up, so a `CheSweet` can be shared across threads by reference.
#[derive(Debug, Clone)]
pub struct CheSweet {
    store: TableStore,
    ef_corr: f64,
    tolerance: f64,
}

impl CheSweet {
    /// Loads the tables described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::TableLoad` if the tables cannot be loaded, or if none
    /// of the requested disaccharides has a table file.
    #[instrument(skip_all, name = "lookup_setup")]
    pub fn new(config: &LookupConfig) -> Result<Self, EngineError> {
        info!(
            "Loading {:?} look-up tables from {:?}.",
            config.mode, config.lut_path
        );
        let store = TableStore::load(
            &config.lut_path,
            config.disaccharides.as_deref(),
            config.mode,
        )?;
        Ok(Self::from_store(store, config.ef_corr, config.tolerance))
    }

    /// Wraps an already populated store, using `ef_corr` and `tolerance` as the
    /// query defaults.
    pub fn from_store(store: TableStore, ef_corr: f64, tolerance: f64) -> Self {
        Self {
            store,
            ef_corr,
            tolerance,
        }
    }

    /// Chemical shifts of C1 and Cx for `disaccharide` at the queried angles.
    ///
    /// `correction` overrides the configured correction constant. Queries outside
    /// the computed conformational zone return [`ShiftPair::OUT_OF_RANGE`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownDisaccharide` if no table is loaded for the key,
    /// and `EngineError::MissingTorsion` if the table needs a side-chain angle the
    /// query lacks.
    pub fn estimate_shift(
        &self,
        disaccharide: &str,
        query: &TorsionQuery,
        correction: Option<f64>,
    ) -> Result<ShiftPair, EngineError> {
        let table = self.table_for(disaccharide)?;
        ShiftEstimator::new(table).estimate(query, correction.unwrap_or(self.ef_corr))
    }

    /// Tabulated torsional angles compatible with the observed shifts of C1
    /// (`shift0`) and Cx (`shift1`).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownDisaccharide` for an unloaded key and
    /// `EngineError::InvalidTolerance` for a tolerance that is not positive.
    pub fn recover_angles(
        &self,
        disaccharide: &str,
        shift0: f64,
        shift1: f64,
        correction: Option<f64>,
        tolerance: Option<f64>,
    ) -> Result<Vec<&[f64]>, EngineError> {
        let table = self.table_for(disaccharide)?;
        AngleRecoverer::new(table).recover(
            ShiftPair::new(shift0, shift1),
            correction.unwrap_or(self.ef_corr),
            tolerance.unwrap_or(self.tolerance),
        )
    }

    pub fn disaccharides(&self) -> Vec<&str> {
        self.store.disaccharides()
    }

    pub fn table(&self, disaccharide: &str) -> Option<&LookupTable> {
        self.store.get(disaccharide)
    }

    pub fn mode(&self) -> TableMode {
        self.store.mode()
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn ef_corr(&self) -> f64 {
        self.ef_corr
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn table_for(&self, disaccharide: &str) -> Result<&LookupTable, EngineError> {
        self.store
            .get(disaccharide)
            .ok_or_else(|| EngineError::UnknownDisaccharide(disaccharide.to_string()))
    }
}
