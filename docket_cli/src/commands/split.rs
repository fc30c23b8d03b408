use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use docket_lib::search::leaf_ranges;
use docket_lib::DateRange;

use crate::output::{print_json, print_ranges_csv, print_ranges_table, OutputFormat};

#[derive(Args)]
pub struct SplitArgs {
    /// First day of the range (YYYY-MM-DD)
    pub after: NaiveDate,

    /// Last day of the range (YYYY-MM-DD)
    pub before: NaiveDate,

    /// Split all the way down to single days
    #[arg(long)]
    pub leaves: bool,
}

pub fn run(args: &SplitArgs, format: &OutputFormat) -> Result<()> {
    let range = DateRange::new(args.after, args.before)?;
    let ranges = if args.leaves {
        leaf_ranges(range)
    } else {
        let (first, second) = range.split()?;
        vec![first, second]
    };

    match format {
        OutputFormat::Table => print_ranges_table(&ranges),
        OutputFormat::Json => print_json(&ranges),
        OutputFormat::Csv => print_ranges_csv(&ranges)?,
    }
    Ok(())
}
