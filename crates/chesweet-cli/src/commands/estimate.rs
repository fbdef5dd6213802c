use crate::cli::EstimateArgs;
use crate::config::QueryOverrides;
use crate::error::Result;
use chesweet::core::models::disaccharide::acceptor_carbon_label;
use chesweet::engine::query::{ShiftPair, TorsionQuery};
use tracing::{info, warn};

pub fn run(args: EstimateArgs) -> Result<()> {
    let overrides = QueryOverrides {
        correction: args.correction,
        tolerance: None,
    };
    let chesweet = super::open_lookup(
        &args.lookup,
        overrides,
        Some(vec![args.disaccharide.clone()]),
    )?;

    let query = TorsionQuery {
        phi: args.phi,
        psi: args.psi,
        chi1: args.chi1,
        chi2: args.chi2,
        chi3: args.chi3,
    };
    info!("Estimating shifts for '{}' at {:?}", args.disaccharide, query);
    let shifts = chesweet.estimate_shift(&args.disaccharide, &query, None)?;

    if shifts.is_out_of_range() {
        warn!("Query lies outside the computed conformational zone.");
        println!("The requested torsions lie outside the computed zone of the look-up table.");
    }
    println!("{}", format_shifts(&args.disaccharide, shifts));
    Ok(())
}

fn format_shifts(disaccharide: &str, shifts: ShiftPair) -> String {
    format!(
        "C1: {:.2} ppm\n{}: {:.2} ppm",
        shifts.c1,
        acceptor_carbon_label(disaccharide),
        shifts.cx
    )
}
