use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use docket_lib::{DateRange, ExtractorConfig, FilingQuery, Query, SettingsQuery};

use crate::output::{print_json, print_queries_csv, print_queries_table, OutputFormat, QueryRow};

#[derive(Args)]
pub struct QueriesArgs {
    /// First day of the range (YYYY-MM-DD)
    pub after: NaiveDate,

    /// Last day of the range (YYYY-MM-DD)
    pub before: NaiveDate,

    /// Calendar searches (one per day) instead of filing searches
    #[arg(long)]
    pub settings: bool,
}

fn row<Q: Query>(kind: &str, query: &Q) -> QueryRow {
    QueryRow::new(kind, query.range(), query.search_value(), query.form_fields())
}

pub fn run(args: &QueriesArgs, config: &ExtractorConfig, format: &OutputFormat) -> Result<()> {
    let range = DateRange::new(args.after, args.before)?;
    let rows: Vec<QueryRow> = if args.settings {
        SettingsQuery::daily(range)
            .iter()
            .map(|query| row("settings", query))
            .collect()
    } else {
        FilingQuery::for_county(config.county, range)
            .iter()
            .map(|query| row("filings", query))
            .collect()
    };

    match format {
        OutputFormat::Table => print_queries_table(&rows),
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_queries_csv(&rows)?,
    }
    Ok(())
}
