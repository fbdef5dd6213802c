//! # Core Module
//!
//! Stateless building blocks shared by the query engine.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Disaccharide keys, table layouts and the immutable look-up table
//! - **File I/O** ([`io`]) - Parsing of the flat numeric table files
//! - **Table Storage** ([`tables`]) - The read-only disaccharide → table mapping
//! - **Side-Chain Rotamers** ([`rotamers`]) - Snapping chi/omega angles onto the tabulated positions
//! - **Angle Utilities** ([`utils`]) - Wraparound and grid-cell arithmetic for phi/psi
//!
//! ## Scientific Foundation
//!
//! Each table row is one conformer of a disaccharide whose glycosidic carbons
//! were shielded by a quantum-chemical calculation. phi and psi were sampled on
//! a 10° grid and side-chain torsions on the staggered rotamers, so every query
//! reduces to picking the right grid cell and rotamer before interpolating.

pub mod io;
pub mod models;
pub mod rotamers;
pub mod tables;
pub mod utils;
