use crate::cli::BatchArgs;
use crate::config::QueryOverrides;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use chesweet::core::tables::store::{TableLoadError, TableStore};
use chesweet::engine::error::EngineError;
use chesweet::engine::query::TorsionQuery;
use chesweet::workflows::lookup::CheSweet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use tracing::{info, warn};

const STATUS_OK: &str = "ok";
const STATUS_OUT_OF_RANGE: &str = "out-of-range";
const OUTPUT_HEADER: [&str; 9] = [
    "disaccharide",
    "phi",
    "psi",
    "chi1",
    "chi2",
    "chi3",
    "shift_c1",
    "shift_cx",
    "status",
];

/// One input row: a disaccharide and the torsions to evaluate it at.
#[derive(Debug, Clone, Deserialize)]
struct BatchRecord {
    disaccharide: String,
    phi: f64,
    psi: f64,
    #[serde(default)]
    chi1: Option<f64>,
    #[serde(default)]
    chi2: Option<f64>,
    #[serde(default)]
    chi3: Option<f64>,
}

impl BatchRecord {
    fn query(&self) -> TorsionQuery {
        TorsionQuery {
            phi: self.phi,
            psi: self.psi,
            chi1: self.chi1,
            chi2: self.chi2,
            chi3: self.chi3,
        }
    }
}

/// One output row. The shifts are empty when `status` carries an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct BatchResult {
    disaccharide: String,
    phi: f64,
    psi: f64,
    chi1: Option<f64>,
    chi2: Option<f64>,
    chi3: Option<f64>,
    shift_c1: Option<f64>,
    shift_cx: Option<f64>,
    status: String,
}

pub fn run(args: BatchArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    execute(&args, &data_manager)
}

fn execute(args: &BatchArgs, data_manager: &DataManager) -> Result<()> {
    let records = read_records_from_path(&args.input)?;
    info!("Read {} conformation(s) from {:?}", records.len(), &args.input);

    if records.is_empty() {
        warn!("No conformation in {:?}, writing an empty result file.", &args.input);
        write_results(std::fs::File::create(&args.output)?, &[])?;
        println!("0 row(s) written to: {}", args.output.display());
        return Ok(());
    }

    let keys: BTreeSet<String> = records.iter().map(|r| r.disaccharide.clone()).collect();
    let overrides = QueryOverrides {
        correction: args.correction,
        tolerance: None,
    };
    let config = super::resolve_config(
        &args.lookup,
        overrides,
        Some(keys.into_iter().collect()),
        data_manager,
    )?;
    let chesweet = match CheSweet::new(&config) {
        Ok(chesweet) => chesweet,
        Err(EngineError::TableLoad(TableLoadError::LookupTableUnavailable { path })) => {
            warn!(
                "No look-up table in {:?} for any input disaccharide. Every row will be reported as unknown.",
                path
            );
            CheSweet::from_store(TableStore::empty(config.mode), config.ef_corr, config.tolerance)
        }
        Err(e) => return Err(e.into()),
    };

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})",
        )
        .map_err(|e| CliError::Other(e.into()))?
        .progress_chars("#>-"),
    );
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr_with_hz(2));

    let results = estimate_records(&chesweet, &records, &pb);
    pb.finish_with_message("✓ Batch complete.");

    let failed = results
        .iter()
        .filter(|r| r.status != STATUS_OK && r.status != STATUS_OUT_OF_RANGE)
        .count();
    if failed > 0 {
        warn!("{} of {} row(s) could not be estimated.", failed, results.len());
    }

    let file = std::fs::File::create(&args.output)?;
    write_results(file, &results)?;
    println!(
        "{} row(s) written to: {} ({} failed)",
        results.len(),
        args.output.display(),
        failed
    );
    Ok(())
}

fn read_records_from_path(path: &Path) -> Result<Vec<BatchRecord>> {
    let file = std::fs::File::open(path)?;
    read_records(file).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn read_records<R: io::Read>(reader: R) -> std::result::Result<Vec<BatchRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Estimates every record in parallel. Failures are kept per row in `status`.
fn estimate_records(
    chesweet: &CheSweet,
    records: &[BatchRecord],
    pb: &ProgressBar,
) -> Vec<BatchResult> {
    records
        .par_iter()
        .map(|record| {
            let outcome = chesweet.estimate_shift(&record.disaccharide, &record.query(), None);
            pb.inc(1);
            let (shift_c1, shift_cx, status) = match outcome {
                Ok(shifts) if shifts.is_out_of_range() => {
                    (Some(shifts.c1), Some(shifts.cx), STATUS_OUT_OF_RANGE.to_string())
                }
                Ok(shifts) => (Some(shifts.c1), Some(shifts.cx), STATUS_OK.to_string()),
                Err(e) => (None, None, e.to_string()),
            };
            BatchResult {
                disaccharide: record.disaccharide.clone(),
                phi: record.phi,
                psi: record.psi,
                chi1: record.chi1,
                chi2: record.chi2,
                chi3: record.chi3,
                shift_c1,
                shift_cx,
                status,
            }
        })
        .collect()
}

/// Writes `results` below a header row. The header is present even without results.
fn write_results<W: io::Write>(writer: W, results: &[BatchResult]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(OUTPUT_HEADER)?;
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;
    Ok(())
}
