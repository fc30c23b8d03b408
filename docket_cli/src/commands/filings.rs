use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docket_lib::scraper::Html;
use docket_lib::parse_filing_search;

use super::read_page;
use crate::output::{print_filings_csv, print_filings_table, print_json, OutputFormat};

#[derive(Args)]
pub struct FilingsArgs {
    /// Saved filing search result pages
    #[arg(required = true)]
    pub pages: Vec<PathBuf>,
}

pub fn run(args: &FilingsArgs, format: &OutputFormat) -> Result<()> {
    let mut case_numbers = Vec::new();
    for path in &args.pages {
        let doc = Html::parse_document(&read_page(path)?);
        let page = parse_filing_search(&doc)?;
        if page.capped {
            eprintln!(
                "warning: {} hit the result cap; search a narrower date range",
                path.display()
            );
        }
        case_numbers.extend(page.case_numbers);
    }

    match format {
        OutputFormat::Table => print_filings_table(&case_numbers),
        OutputFormat::Json => print_json(&case_numbers),
        OutputFormat::Csv => print_filings_csv(&case_numbers)?,
    }
    Ok(())
}
