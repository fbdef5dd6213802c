use super::disaccharide::BondType;
use std::slice::ChunksExact;
use thiserror::Error;

/// Which family of tables to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableMode {
    /// phi/psi only, plus omega for 1-6 linkages. Files carry the `_red` suffix.
    #[default]
    Reduced,
    /// phi/psi and every side-chain torsion of the linkage.
    Full,
}

/// Column layout of a look-up table.
///
/// The variant names count the angular dimensions used for matching. Full tables
/// are always eight columns wide and carry a sixth angle column (`aux`) that is
/// returned with recovered rows but never filtered on. Every layout ends with two
/// shielding columns (C1 then Cx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLayout {
    /// `phi, psi, σC1, σCx`
    Reduced2D,
    /// `phi, psi, omega, σC1, σCx` (reduced 1-6 linkages)
    Reduced3D,
    /// `phi, psi, chi1, chi2, 0, aux, σC1, σCx`. The chi3 column holds
    /// [`TableLayout::CHI3_SENTINEL`] (full 1-1 linkages)
    Full4D,
    /// `phi, psi, chi1, chi2, chi3, aux, σC1, σCx`
    Full5D,
}

impl TableLayout {
    /// Value stored in the chi3 column of [`TableLayout::Full4D`] tables.
    pub const CHI3_SENTINEL: f64 = 0.0;

    /// Picks the layout for a disaccharide's bond type under the given mode.
    pub fn for_bond(bond: BondType, mode: TableMode) -> Self {
        match (mode, bond) {
            (TableMode::Reduced, BondType::OneSix) => TableLayout::Reduced3D,
            (TableMode::Reduced, _) => TableLayout::Reduced2D,
            (TableMode::Full, BondType::OneOne) => TableLayout::Full4D,
            (TableMode::Full, _) => TableLayout::Full5D,
        }
    }

    pub fn for_key(disaccharide: &str, mode: TableMode) -> Self {
        Self::for_bond(BondType::from_key(disaccharide), mode)
    }

    /// Number of values in one row of the table file.
    pub fn columns(self) -> usize {
        match self {
            TableLayout::Reduced2D => 4,
            TableLayout::Reduced3D => 5,
            TableLayout::Full4D | TableLayout::Full5D => 8,
        }
    }

    /// Number of leading angle columns (everything but the two shielding columns).
    pub fn angle_columns(self) -> usize {
        self.columns() - 2
    }

    pub fn mode(self) -> TableMode {
        match self {
            TableLayout::Reduced2D | TableLayout::Reduced3D => TableMode::Reduced,
            TableLayout::Full4D | TableLayout::Full5D => TableMode::Full,
        }
    }

    /// Column headers for the angle part of a row.
    pub fn angle_names(self) -> &'static [&'static str] {
        match self {
            TableLayout::Reduced2D => &["phi", "psi"],
            TableLayout::Reduced3D => &["phi", "psi", "omega"],
            TableLayout::Full4D | TableLayout::Full5D => {
                &["phi", "psi", "chi1", "chi2", "chi3", "aux"]
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{values} values cannot be reshaped into rows of {columns} columns")]
pub struct TableShapeError {
    pub values: usize,
    pub columns: usize,
}

/// Immutable, row-ordered table of precomputed conformers for one disaccharide.
///
/// Values are kept flat in row-major order. Each row starts with the angle
/// columns of its [`TableLayout`] and ends with the shielding of C1 and Cx.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    layout: TableLayout,
    values: Vec<f64>,
}

impl LookupTable {
    /// Builds a table from flat row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`TableShapeError`] if the number of values is not a multiple of
    /// the layout's column count.
    pub fn new(layout: TableLayout, values: Vec<f64>) -> Result<Self, TableShapeError> {
        let columns = layout.columns();
        if values.len() % columns != 0 {
            return Err(TableShapeError {
                values: values.len(),
                columns,
            });
        }
        Ok(Self { layout, values })
    }

    /// Builds a table from explicit rows, checking every row width.
    pub fn from_rows<R: AsRef<[f64]>>(
        layout: TableLayout,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, TableShapeError> {
        let columns = layout.columns();
        let mut values = Vec::new();
        for row in rows {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(TableShapeError {
                    values: row.len(),
                    columns,
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self { layout, values })
    }

    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    pub fn rows(&self) -> ChunksExact<'_, f64> {
        self.values.chunks_exact(self.layout.columns())
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let columns = self.layout.columns();
        self.values.get(index * columns..(index + 1) * columns)
    }

    pub fn len(&self) -> usize {
        self.values.len() / self.layout.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits a table row into its angle columns and its `(σC1, σCx)` shielding pair.
#[inline]
pub fn split_row(row: &[f64]) -> (&[f64], [f64; 2]) {
    let (angles, shielding) = row.split_at(row.len() - 2);
    (angles, [shielding[0], shielding[1]])
}
