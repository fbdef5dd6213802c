use crate::core::models::table::TableMode;
use std::path::PathBuf;
use thiserror::Error;

/// Default constant turning shielding into chemical shift (`shift = ef_corr - shielding`), in ppm.
pub const DEFAULT_EF_CORR: f64 = 183.4;
/// Default half-width of the shielding band used when recovering torsions, in ppm.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Where the tables live, which of them to load, and the query defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    pub lut_path: PathBuf,
    pub mode: TableMode,
    /// Restricts loading to these keys; `None` loads every table found in `lut_path`.
    pub disaccharides: Option<Vec<String>>,
    pub ef_corr: f64,
    pub tolerance: f64,
}

#[derive(Default)]
pub struct LookupConfigBuilder {
    lut_path: Option<PathBuf>,
    mode: Option<TableMode>,
    disaccharides: Option<Vec<String>>,
    ef_corr: Option<f64>,
    tolerance: Option<f64>,
}

impl LookupConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lut_path(mut self, path: PathBuf) -> Self {
        self.lut_path = Some(path);
        self
    }
    pub fn mode(mut self, mode: TableMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn full(self, full: bool) -> Self {
        self.mode(if full {
            TableMode::Full
        } else {
            TableMode::Reduced
        })
    }
    pub fn disaccharides(mut self, keys: Vec<String>) -> Self {
        self.disaccharides = Some(keys);
        self
    }
    pub fn ef_corr(mut self, ef_corr: f64) -> Self {
        self.ef_corr = Some(ef_corr);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<LookupConfig, ConfigError> {
        let ef_corr = self.ef_corr.unwrap_or(DEFAULT_EF_CORR);
        if !ef_corr.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "ef_corr",
                value: ef_corr,
                reason: "must be finite",
            });
        }
        let tolerance = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "tolerance",
                value: tolerance,
                reason: "must be a positive, finite number",
            });
        }
        Ok(LookupConfig {
            lut_path: self
                .lut_path
                .ok_or(ConfigError::MissingParameter("lut_path"))?,
            mode: self.mode.unwrap_or_default(),
            disaccharides: self.disaccharides,
            ef_corr,
            tolerance,
        })
    }
}
