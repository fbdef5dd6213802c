use crate::cli::ListArgs;
use crate::config::QueryOverrides;
use crate::error::Result;
use chesweet::workflows::lookup::CheSweet;

pub fn run(args: ListArgs) -> Result<()> {
    let chesweet = super::open_lookup(&args.lookup, QueryOverrides::default(), None)?;
    print!("{}", render(&chesweet));
    Ok(())
}

fn render(chesweet: &CheSweet) -> String {
    let mut out = format!(
        "{} disaccharide(s) available in {:?} mode:\n",
        chesweet.disaccharides().len(),
        chesweet.mode()
    );
    for key in chesweet.disaccharides() {
        if let Some(table) = chesweet.table(key) {
            out.push_str(&format!(
                "  {:<40} {:?}, {} rows\n",
                key,
                table.layout(),
                table.len()
            ));
        }
    }
    let skipped = chesweet.store().skipped();
    if !skipped.is_empty() {
        out.push_str(&format!("Skipped (no table file): {}\n", skipped.join(", ")));
    }
    out
}
