use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

pub fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    println!("Look-up tables are read from: {}", manager.lut_dir().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    DataManager::set_custom_path(&path)?;
    info!("Data path set to {:?}", &path);
    println!("Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    info!("Data path reset to default.");
    println!("Data path reset to the default location.");
    Ok(())
}
