pub mod batch;
pub mod data;
pub mod estimate;
pub mod list;
pub mod recover;

use crate::cli::LookupArgs;
use crate::config::{PartialConfig, QueryOverrides};
use crate::data::DataManager;
use crate::error::Result;
use chesweet::engine::config::LookupConfig;
use chesweet::workflows::lookup::CheSweet;
use tracing::info;

/// Resolves the look-up configuration of a command.
///
/// `keys` restricts loading to the given disaccharides unless the configuration
/// already names its own set.
fn resolve_config(
    lookup: &LookupArgs,
    overrides: QueryOverrides,
    keys: Option<Vec<String>>,
    data_manager: &DataManager,
) -> Result<LookupConfig> {
    let partial_config = PartialConfig::load(lookup)?;
    info!("Merging configuration from file and CLI arguments...");
    let mut config = partial_config.merge_with_cli(lookup, overrides, data_manager)?;
    if config.disaccharides.is_none() {
        config.disaccharides = keys;
    }
    Ok(config)
}

/// Resolves the configuration and loads the tables a command needs.
fn open_lookup(
    lookup: &LookupArgs,
    overrides: QueryOverrides,
    keys: Option<Vec<String>>,
) -> Result<CheSweet> {
    let data_manager = DataManager::new()?;
    let config = resolve_config(lookup, overrides, keys, &data_manager)?;
    Ok(CheSweet::new(&config)?)
}
