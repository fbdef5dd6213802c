use crate::core::io::lut::{LutFile, LutReadError, REDUCED_SUFFIX};
use crate::core::models::table::{LookupTable, TableLayout, TableMode};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Read-only collection of look-up tables keyed by disaccharide name.
///
/// The store is filled once, either from a directory of table files with
/// [`TableStore::load`] or from tables built in memory with
/// [`TableStore::from_tables`], and never changes afterwards. It is `Sync`, so a
/// shared reference can serve queries from several threads at once.
#[derive(Debug, Clone)]
pub struct TableStore {
    mode: TableMode,
    tables: HashMap<String, LookupTable>,
    skipped: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("Failed to read look-up table '{path}': {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: LutReadError,
    },
    #[error("Failed to list look-up table directory '{path}': {source}", path = path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "No look-up table could be built from '{path}': no disaccharide table was found",
        path = path.display()
    )]
    LookupTableUnavailable { path: PathBuf },
    #[error("Table for '{disaccharide}' has a {found:?} layout, expected a {mode:?} table")]
    ModeMismatch {
        disaccharide: String,
        found: TableLayout,
        mode: TableMode,
    },
}

impl TableStore {
    /// Loads the tables of `disaccharides` from `base_path`.
    ///
    /// When `disaccharides` is `None`, keys are discovered from the directory (see
    /// [`discover_disaccharides`]). A key whose file does not exist is logged and
    /// skipped; the remaining keys are still loaded.
    ///
    /// # Errors
    ///
    /// Returns `TableLoadError::Read` if a table file exists but cannot be read or
    /// reshaped, `TableLoadError::Discovery` if the directory cannot be listed,
    /// and `TableLoadError::LookupTableUnavailable` if no table was loaded at all.
    pub fn load(
        base_path: &Path,
        disaccharides: Option<&[String]>,
        mode: TableMode,
    ) -> Result<Self, TableLoadError> {
        let keys = match disaccharides {
            Some(keys) => keys.to_vec(),
            None => discover_disaccharides(base_path, mode)?,
        };

        let mut tables = HashMap::with_capacity(keys.len());
        let mut skipped = Vec::new();

        for key in keys {
            let layout = TableLayout::for_key(&key, mode);
            let path = LutFile::path_for(base_path, &key, mode);
            match LutFile::read_from_path(&path, layout) {
                Ok(table) => {
                    debug!(
                        "Loaded {} rows ({:?}) for '{}' from {:?}",
                        table.len(),
                        layout,
                        key,
                        path
                    );
                    tables.insert(key, table);
                }
                Err(e) if e.is_missing_file() => {
                    warn!(
                        "The disaccharide '{}' is not calculated, or the path {:?} is wrong. Skipping it.",
                        key, base_path
                    );
                    skipped.push(key);
                }
                Err(e) => return Err(TableLoadError::Read { path, source: e }),
            }
        }

        if tables.is_empty() {
            return Err(TableLoadError::LookupTableUnavailable {
                path: base_path.to_path_buf(),
            });
        }

        info!(
            "Loaded {} look-up table(s) in {:?} mode from {:?} ({} skipped).",
            tables.len(),
            mode,
            base_path,
            skipped.len()
        );

        Ok(Self {
            mode,
            tables,
            skipped,
        })
    }

    /// A store holding no table. Every query against it reports an unknown disaccharide.
    pub fn empty(mode: TableMode) -> Self {
        Self {
            mode,
            tables: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Builds a store from tables that are already in memory.
    ///
    /// # Errors
    ///
    /// Returns `TableLoadError::ModeMismatch` if a table's layout belongs to the
    /// other mode.
    pub fn from_tables(
        mode: TableMode,
        tables: impl IntoIterator<Item = (String, LookupTable)>,
    ) -> Result<Self, TableLoadError> {
        let mut map = HashMap::new();
        for (disaccharide, table) in tables {
            if table.layout().mode() != mode {
                return Err(TableLoadError::ModeMismatch {
                    disaccharide,
                    found: table.layout(),
                    mode,
                });
            }
            map.insert(disaccharide, table);
        }
        Ok(Self {
            mode,
            tables: map,
            skipped: Vec::new(),
        })
    }

    pub fn get(&self, disaccharide: &str) -> Option<&LookupTable> {
        self.tables.get(disaccharide)
    }

    pub fn contains(&self, disaccharide: &str) -> bool {
        self.tables.contains_key(disaccharide)
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Names of the loaded disaccharides, sorted.
    pub fn disaccharides(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Keys that were requested but had no table file.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Lists the disaccharide keys available in a table directory.
///
/// Full mode picks every regular, non-hidden file not ending in `_red`; reduced
/// mode picks the `_red` files with the suffix stripped. Keys come back sorted.
pub fn discover_disaccharides(
    base_path: &Path,
    mode: TableMode,
) -> Result<Vec<String>, TableLoadError> {
    let discovery_err = |source| TableLoadError::Discovery {
        path: base_path.to_path_buf(),
        source,
    };

    let mut keys = Vec::new();
    for entry in std::fs::read_dir(base_path).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        if !entry.file_type().map_err(discovery_err)?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let key = match mode {
            TableMode::Reduced => match name.strip_suffix(REDUCED_SUFFIX) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => continue,
            },
            TableMode::Full if !name.ends_with(REDUCED_SUFFIX) => name,
            TableMode::Full => continue,
        };
        keys.push(key);
    }
    keys.sort();
    debug!("Discovered {} disaccharide(s) in {:?}", keys.len(), base_path);
    Ok(keys)
}
