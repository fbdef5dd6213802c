//! # Rotamers Module
//!
//! Side-chain torsions (chi1, chi2, chi3 and the omega angle of 1-6 linkages) are
//! not sampled on the 10° phi/psi grid. The look-up tables only hold the staggered
//! positions listed in [`rotamer::CANONICAL_ROTAMERS`], so any continuous angle
//! has to be snapped onto that set before it can be matched against a table row.
//!
//! ```ignore
//! use chesweet::core::rotamers::rotamer::nearest_rotamer;
//!
//! assert_eq!(nearest_rotamer(64.0), 60.0);
//! ```

pub mod rotamer;
