use crate::core::models::table::{LookupTable, TableLayout, TableMode, TableShapeError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name suffix of reduced-mode tables.
pub const REDUCED_SUFFIX: &str = "_red";

#[derive(Debug, Error)]
pub enum LutReadError {
    #[error("Look-up table file not found: '{path}'")]
    MissingFile { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid numeric value '{token}' on line {line}")]
    InvalidValue { line: usize, token: String },
    #[error("Malformed table: {0}")]
    Shape(#[from] TableShapeError),
}

impl LutReadError {
    pub fn is_missing_file(&self) -> bool {
        matches!(self, LutReadError::MissingFile { .. })
    }
}

/// Reader for the flat, whitespace-separated look-up table files.
///
/// A file is just a stream of numbers; line breaks carry no meaning; the values
/// are reshaped into rows of the layout's column count.
pub struct LutFile;

impl LutFile {
    /// Location of a disaccharide's table file under `base` for the given mode.
    pub fn path_for(base: &Path, disaccharide: &str, mode: TableMode) -> PathBuf {
        match mode {
            TableMode::Full => base.join(disaccharide),
            TableMode::Reduced => base.join(format!("{}{}", disaccharide, REDUCED_SUFFIX)),
        }
    }

    pub fn read_from(
        reader: &mut impl BufRead,
        layout: TableLayout,
    ) -> Result<LookupTable, LutReadError> {
        let mut values = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            for token in line.split_whitespace() {
                let value: f64 = token.parse().map_err(|_| LutReadError::InvalidValue {
                    line: line_num + 1,
                    token: token.to_string(),
                })?;
                values.push(value);
            }
        }
        Ok(LookupTable::new(layout, values)?)
    }

    /// Opens and parses a table file.
    ///
    /// A file that does not exist is reported as [`LutReadError::MissingFile`] so
    /// callers can tell it apart from unreadable or malformed files.
    pub fn read_from_path(path: &Path, layout: TableLayout) -> Result<LookupTable, LutReadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LutReadError::MissingFile {
                path: path.to_path_buf(),
            },
            _ => LutReadError::Io(e),
        })?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, layout)
    }
}
