use crate::cli::LookupArgs;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use chesweet::engine::config as core_config;
use chesweet::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLookupConfig {
    #[serde(rename = "lut-path")]
    lut_path: Option<PathBuf>,
    full: Option<bool>,
    disaccharides: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialQueryConfig {
    correction: Option<f64>,
    tolerance: Option<f64>,
}

/// Values given on the command line of a single subcommand.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryOverrides {
    pub correction: Option<f64>,
    pub tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    lookup: Option<PartialLookupConfig>,
    query: Option<PartialQueryConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the `--config` file when one is given, otherwise starts empty.
    pub fn load(args: &LookupArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final look-up configuration.
    ///
    /// Command-line flags win over `--set` values, which win over the config
    /// file, which wins over the built-in defaults.
    pub fn merge_with_cli(
        mut self,
        args: &LookupArgs,
        overrides: QueryOverrides,
        data_manager: &DataManager,
    ) -> Result<core_config::LookupConfig> {
        self.apply_set_values(&args.set_values)?;

        let lookup = self.lookup.take().unwrap_or_default();
        let query = self.query.take().unwrap_or_default();

        let lut_path = args
            .lut_path
            .clone()
            .or(lookup.lut_path)
            .unwrap_or_else(|| data_manager.lut_dir());
        debug!("Using look-up tables from {:?}", &lut_path);

        let mut builder = core_config::LookupConfigBuilder::new()
            .lut_path(lut_path)
            .full(args.mode.full().or(lookup.full).unwrap_or(false));
        if let Some(keys) = lookup.disaccharides {
            builder = builder.disaccharides(keys);
        }
        if let Some(correction) = overrides.correction.or(query.correction) {
            builder = builder.ef_corr(correction);
        }
        if let Some(tolerance) = overrides.tolerance.or(query.tolerance) {
            builder = builder.tolerance(tolerance);
        }

        Ok(builder.build().map_err(EngineError::from)?)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        if set_values.is_empty() {
            return Ok(());
        }
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "lookup.lut-path" => {
                    self.lookup.get_or_insert_with(Default::default).lut_path =
                        Some(PathBuf::from(value_str));
                }
                "lookup.full" => {
                    self.lookup.get_or_insert_with(Default::default).full =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                "lookup.disaccharides" => {
                    let keys = value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect();
                    self.lookup.get_or_insert_with(Default::default).disaccharides = Some(keys);
                }
                "query.correction" => {
                    self.query.get_or_insert_with(Default::default).correction =
                        Some(parse_value(key, value_str, "float")?);
                }
                "query.tolerance" => {
                    self.query.get_or_insert_with(Default::default).tolerance =
                        Some(parse_value(key, value_str, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use chesweet::core::models::table::TableMode;
    use chesweet::engine::config::{DEFAULT_EF_CORR, DEFAULT_TOLERANCE};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn manager() -> DataManager {
        DataManager::with_custom_path(TEST_DIR.path().join("mock_data"))
    }

    fn lookup_args(extra: &[&str]) -> LookupArgs {
        let mut args = vec!["chesweet", "list"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::List(list_args) => list_args.lookup,
            _ => panic!("Expected 'list' subcommand"),
        }
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let args = lookup_args(&[]);
        let config = PartialConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args, QueryOverrides::default(), &manager())
            .unwrap();

        assert_eq!(config.lut_path, manager().lut_dir());
        assert_eq!(config.mode, TableMode::Reduced);
        assert_eq!(config.ef_corr, DEFAULT_EF_CORR);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert!(config.disaccharides.is_none());
    }

    #[test]
    fn file_values_are_loaded() {
        let config_path = write_config_file(
            "config_file_values.toml",
            r#"
        [lookup]
        lut-path = "/data/lut"
        full = true
        disaccharides = ["a-D-Glcp-1-4-a-D-Glcp", "b-D-Galp-1-3-b-D-Glcp"]

        [query]
        correction = 180.0
        tolerance = 0.25
        "#,
        );
        let args = lookup_args(&["-c", config_path.to_str().unwrap()]);
        let config = PartialConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args, QueryOverrides::default(), &manager())
            .unwrap();

        assert_eq!(config.lut_path, PathBuf::from("/data/lut"));
        assert_eq!(config.mode, TableMode::Full);
        assert_eq!(config.ef_corr, 180.0);
        assert_eq!(config.tolerance, 0.25);
        assert_eq!(config.disaccharides.map(|keys| keys.len()), Some(2));
    }

    #[test]
    fn cli_args_override_set_values_and_file() {
        let config_path = write_config_file(
            "config_override.toml",
            r#"
        [lookup]
        lut-path = "/from/file"
        full = true

        [query]
        correction = 180.0 # Will be overridden by --set
        tolerance = 0.25 # Will be overridden by the flag
        "#,
        );
        let args = lookup_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "--lut",
            "/from/flag",
            "--reduced",
            "-S",
            "query.correction=181.5",
            "-S",
            "query.tolerance=0.75",
        ]);
        let overrides = QueryOverrides {
            correction: None,
            tolerance: Some(1.0),
        };
        let config = PartialConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args, overrides, &manager())
            .unwrap();

        assert_eq!(config.lut_path, PathBuf::from("/from/flag"));
        assert_eq!(config.mode, TableMode::Reduced);
        assert_eq!(config.ef_corr, 181.5);
        assert_eq!(config.tolerance, 1.0);
    }

    #[test]
    fn set_values_fill_lookup_section() {
        let args = lookup_args(&[
            "-S",
            "lookup.lut-path=/set/lut",
            "-S",
            "lookup.full=true",
            "-S",
            "lookup.disaccharides=a-D-Glcp-1-4-a-D-Glcp, a-D-Glcp-1-6-a-D-Glcp",
        ]);
        let config = PartialConfig::default()
            .merge_with_cli(&args, QueryOverrides::default(), &manager())
            .unwrap();

        assert_eq!(config.lut_path, PathBuf::from("/set/lut"));
        assert_eq!(config.mode, TableMode::Full);
        assert_eq!(
            config.disaccharides,
            Some(vec![
                "a-D-Glcp-1-4-a-D-Glcp".to_string(),
                "a-D-Glcp-1-6-a-D-Glcp".to_string()
            ])
        );
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let config_path = write_config_file(
            "config_unknown.toml",
            r#"
        [lookup]
        lut-dir = "/typo"
        "#,
        );
        let result = PartialConfig::from_file(&config_path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["query.tolerance", "query.tolerance=abc", "optimization.steps=3"] {
            let args = lookup_args(&["-S", bad]);
            let result =
                PartialConfig::default().merge_with_cli(&args, QueryOverrides::default(), &manager());
            assert!(matches!(result, Err(CliError::Config(_))), "accepted '{bad}'");
        }
    }

    #[test]
    fn invalid_tolerance_is_a_config_error() {
        let args = lookup_args(&[]);
        let overrides = QueryOverrides {
            correction: None,
            tolerance: Some(-1.0),
        };
        let result = PartialConfig::default().merge_with_cli(&args, overrides, &manager());
        match result {
            Err(CliError::Core(EngineError::Config(
                core_config::ConfigError::InvalidParameter { name, value, .. },
            ))) => {
                assert_eq!(name, "tolerance");
                assert_eq!(value, -1.0);
            }
            other => panic!("Expected a configuration error, got {:?}", other),
        }
    }
}
