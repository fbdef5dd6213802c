//! # Workflows Module
//!
//! High-level entry points for users of CheSweet.
//!
//! ## Overview
//!
//! The [`lookup::CheSweet`] facade owns the loaded tables together with the query
//! defaults, and answers both shift estimation and torsion recovery by
//! disaccharide key. It resolves the key to its table and hands that table to the
//! matching engine component.

pub mod lookup;
