//! # Engine Module
//!
//! This module implements the two query directions of CheSweet against a single
//! look-up table: estimating chemical shifts from torsional angles, and recovering
//! the torsional angles compatible with a pair of observed shifts.
//!
//! ## Overview
//!
//! Both directions borrow a [`LookupTable`](crate::core::models::table::LookupTable)
//! for the duration of one query and never mutate it, so any number of queries can
//! run concurrently over the same loaded tables.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Table location, mode, and the query defaults
//!   (correction constant and recovery tolerance)
//! - **Queries** ([`query`]) - Torsion query points and the resulting shift pairs
//! - **Estimation** ([`estimator`]) - Grid-cell selection, rotamer filtering, and the
//!   choice between nearest-row matching and linear interpolation
//! - **Interpolation** ([`interpolation`]) - Nearest and linear interpolation over the
//!   rows of one grid cell
//! - **Recovery** ([`recoverer`]) - Tolerance-banded reverse look-up on shielding values
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod estimator;
pub mod interpolation;
pub mod query;
pub mod recoverer;
