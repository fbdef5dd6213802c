//! # Tables Module
//!
//! Owns the loaded look-up tables. [`store::TableStore`] maps every available
//! disaccharide to its immutable [`crate::core::models::table::LookupTable`];
//! estimators and recoverers only ever borrow from it.
//!
//! ```ignore
//! use chesweet::core::tables::store::TableStore;
//! use chesweet::core::models::table::TableMode;
//!
//! let store = TableStore::load(Path::new("lut"), None, TableMode::Reduced)?;
//! let maltose = store.get("a-D-Glcp-1-4-a-D-Glcp");
//! ```

pub mod store;
