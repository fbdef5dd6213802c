//! # CheSweet Core Library
//!
//! Estimation of the ¹³C chemical shifts of the glycosidic carbons of disaccharides
//! from their torsional angles, using precomputed quantum-chemical look-up tables,
//! together with the inverse recovery of torsional angles from observed shifts.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture to keep concerns separate.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`LookupTable`, `TableLayout`),
//!   angle normalization and rotamer snapping, the table file reader, and the
//!   `TableStore` mapping disaccharide keys to their tables.
//!
//! - **[`engine`]: The Logic Core.** Query logic over one borrowed table: the
//!   `ShiftEstimator` with its grid-cell interpolation and the `AngleRecoverer`
//!   reverse look-up, plus the configuration and error types they share.
//!
//! - **[`workflows`]: The Public API.** The `CheSweet` facade loads the tables once
//!   and answers queries by disaccharide key, applying the configured defaults.

pub mod core;
pub mod engine;
pub mod workflows;
