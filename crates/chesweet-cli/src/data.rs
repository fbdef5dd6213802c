use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::fs::{self};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LUT_DIR_NAME: &str = "lut";
const PATH_CONFIG_FILE: &str = "path.conf";

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    /// Default location of the look-up table files.
    pub fn lut_dir(&self) -> PathBuf {
        self.base_path.join(LUT_DIR_NAME)
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        Self::write_custom_path(&Self::get_path_config_file()?, path)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn write_custom_path(config_path: &Path, path: &Path) -> Result<()> {
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Data path is not valid UTF-8: {:?}", path))
        })?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Persisting custom data path {:?} to {:?}", path, config_path);
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    /// Custom data path stored in `config_path`, if the file exists and is not empty.
    fn read_custom_path(config_path: &Path) -> Result<Option<PathBuf>> {
        if !config_path.exists() {
            return Ok(None);
        }
        let custom_path_str = fs::read_to_string(config_path)?.trim().to_string();
        if custom_path_str.is_empty() {
            warn!("Custom path config file is empty, falling back to default path.");
            return Ok(None);
        }
        Ok(Some(PathBuf::from(custom_path_str)))
    }

    fn determine_data_path() -> Result<PathBuf> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if let Some(custom) = Self::read_custom_path(&config_path)? {
                return Ok(custom);
            }
        }
        Self::get_default_data_path()
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "bios-imasl", "chesweet")
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
