use crate::cli::RecoverArgs;
use crate::config::QueryOverrides;
use crate::error::{CliError, Result};
use std::io;
use tracing::info;

pub fn run(args: RecoverArgs) -> Result<()> {
    let overrides = QueryOverrides {
        correction: args.correction,
        tolerance: args.tolerance,
    };
    let chesweet = super::open_lookup(
        &args.lookup,
        overrides,
        Some(vec![args.disaccharide.clone()]),
    )?;

    let rows = chesweet.recover_angles(
        &args.disaccharide,
        args.shift_c1,
        args.shift_cx,
        None,
        None,
    )?;
    info!(
        "Recovered {} conformer(s) for '{}' (tolerance {} ppm).",
        rows.len(),
        args.disaccharide,
        chesweet.tolerance()
    );

    let names = chesweet
        .table(&args.disaccharide)
        .map(|table| table.layout().angle_names())
        .unwrap_or(&[]);

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?;
            write_angles(file, names, &rows)?;
            println!("{} conformer(s) written to: {}", rows.len(), path.display());
        }
        None => {
            if rows.is_empty() {
                println!("No tabulated conformer matches the observed shifts.");
            } else {
                write_angles(io::stdout().lock(), names, &rows)?;
            }
        }
    }
    Ok(())
}

/// Writes recovered angle rows as CSV, headed by the layout's angle names.
fn write_angles<W: io::Write>(writer: W, names: &[&str], rows: &[&[f64]]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(names)?;
    for row in rows {
        csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_are_written_under_their_names() {
        let mut buffer = Vec::new();
        let rows = vec![&[50.0, 60.0][..], &[-60.5, 180.0][..]];
        write_angles(&mut buffer, &["phi", "psi"], &rows).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "phi,psi\n50,60\n-60.5,180\n");
    }

    #[test]
    fn empty_result_still_has_a_header() {
        let mut buffer = Vec::new();
        write_angles(&mut buffer, &["phi", "psi", "omega"], &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "phi,psi,omega\n");
    }
}
