use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::table::TableLayout;
use crate::core::tables::store::TableLoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown disaccharide '{0}': no look-up table is loaded for it")]
    UnknownDisaccharide(String),

    #[error("Torsion '{angle}' is required to query a {layout:?} table")]
    MissingTorsion {
        angle: &'static str,
        layout: TableLayout,
    },

    #[error("Invalid tolerance {0}: must be a positive, finite number")]
    InvalidTolerance(f64),

    #[error(transparent)]
    TableLoad(#[from] TableLoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_with_context() {
        let error = EngineError::from(ConfigError::MissingParameter("lut_path"));
        assert!(matches!(
            error,
            EngineError::Config(ConfigError::MissingParameter("lut_path"))
        ));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required parameter: lut_path"
        );
    }

    #[test]
    fn table_load_errors_are_transparent() {
        let source = TableLoadError::LookupTableUnavailable {
            path: "lut".into(),
        };
        let expected = source.to_string();
        assert_eq!(EngineError::from(source).to_string(), expected);
    }
}
