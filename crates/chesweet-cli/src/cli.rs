use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Pablo Garay, Osvaldo Martin",
    version,
    about = "CheSweet CLI - Estimate 13C chemical shifts of disaccharides from their glycosidic torsions, and recover the torsions from observed shifts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the chemical shifts of C1 and Cx for one conformation.
    Estimate(EstimateArgs),
    /// Recover the tabulated torsions compatible with a pair of observed shifts.
    Recover(RecoverArgs),
    /// Estimate chemical shifts for every conformation listed in a CSV file.
    Batch(BatchArgs),
    /// List the disaccharides with a loadable look-up table.
    List(ListArgs),
    /// Manage the local directory holding the look-up tables.
    Data(DataArgs),
}

/// Where the look-up tables come from and how they are read. Shared by every
/// command that queries tables.
#[derive(Args, Debug, Clone, Default)]
pub struct LookupArgs {
    /// Directory containing the look-up table files.
    /// Defaults to the `lut` folder of the local data directory.
    #[arg(long = "lut", value_name = "DIR")]
    pub lut_path: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Choose between full (all chi angles) and reduced tables.
    #[command(flatten)]
    pub mode: TableModeFlags,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S query.tolerance=0.25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive flags selecting the table mode.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct TableModeFlags {
    /// Use the full tables, which include the chi1, chi2 and chi3 columns.
    #[arg(long)]
    pub full: bool,
    /// Use the reduced tables (phi, psi, and omega for 1-6 linkages).
    #[arg(long)]
    pub reduced: bool,
}

impl TableModeFlags {
    /// `Some(true)` for `--full`, `Some(false)` for `--reduced`, `None` when neither is given.
    pub fn full(self) -> Option<bool> {
        match (self.full, self.reduced) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Disaccharide key, e.g. 'a-D-Glcp-1-4-a-D-Glcp'.
    #[arg(short, long, required = true, value_name = "KEY")]
    pub disaccharide: String,

    /// Phi torsion, in degrees.
    #[arg(long, required = true, allow_negative_numbers = true, value_name = "DEG")]
    pub phi: f64,

    /// Psi torsion, in degrees.
    #[arg(long, required = true, allow_negative_numbers = true, value_name = "DEG")]
    pub psi: f64,

    /// Chi1 torsion, in degrees. Read as omega for reduced 1-6 tables.
    #[arg(long, alias = "omega", allow_negative_numbers = true, value_name = "DEG")]
    pub chi1: Option<f64>,

    /// Chi2 torsion, in degrees (full tables only).
    #[arg(long, allow_negative_numbers = true, value_name = "DEG")]
    pub chi2: Option<f64>,

    /// Chi3 torsion, in degrees (full tables only).
    #[arg(long, allow_negative_numbers = true, value_name = "DEG")]
    pub chi3: Option<f64>,

    /// Override the correction constant (shift = correction - shielding).
    #[arg(long, value_name = "PPM")]
    pub correction: Option<f64>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Arguments for the `recover` subcommand.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Disaccharide key, e.g. 'a-D-Glcp-1-4-a-D-Glcp'.
    #[arg(short, long, required = true, value_name = "KEY")]
    pub disaccharide: String,

    /// Observed chemical shift of C1, in ppm.
    #[arg(long = "shift-c1", required = true, allow_negative_numbers = true, value_name = "PPM")]
    pub shift_c1: f64,

    /// Observed chemical shift of Cx, in ppm.
    #[arg(long = "shift-cx", required = true, allow_negative_numbers = true, value_name = "PPM")]
    pub shift_cx: f64,

    /// Override the correction constant (shift = correction - shielding).
    #[arg(long, value_name = "PPM")]
    pub correction: Option<f64>,

    /// Override the half-width of the accepted shielding band, in ppm.
    #[arg(long, value_name = "PPM")]
    pub tolerance: Option<f64>,

    /// Write the recovered torsions to a CSV file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input CSV with the columns disaccharide, phi, psi and optionally chi1, chi2, chi3.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV receiving the estimated shifts.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the correction constant (shift = correction - shielding).
    #[arg(long, value_name = "PPM")]
    pub correction: Option<f64>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing data files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}
