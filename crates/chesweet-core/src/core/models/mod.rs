//! # Core Models Module
//!
//! Data structures describing what a look-up table is and which disaccharide it
//! belongs to.
//!
//! ## Key Components
//!
//! - [`disaccharide`] - Bond-type classification and linkage parsing of disaccharide keys
//! - [`table`] - The immutable [`table::LookupTable`] and its [`table::TableLayout`]
//!
//! A key such as `"b-D-Galp-1-6-b-D-Galp"` decides, together with the
//! [`table::TableMode`], how many columns its table file has and which of them
//! are matched during a query.
//!
//! ```ignore
//! use chesweet::core::models::table::{LookupTable, TableLayout, TableMode};
//!
//! let layout = TableLayout::for_key("b-D-Galp-1-6-b-D-Galp", TableMode::Reduced);
//! let table = LookupTable::new(layout, values)?;
//! ```

pub mod disaccharide;
pub mod table;
