//! Reading of the look-up table files.
//!
//! Tables are produced offline and shipped as plain whitespace-separated numbers,
//! one file per disaccharide. [`lut::LutFile`] turns such a file into a
//! [`crate::core::models::table::LookupTable`] with the right column layout.

pub mod lut;
