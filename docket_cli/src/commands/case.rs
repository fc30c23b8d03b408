use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use docket_lib::{CaseSummary, Extractor, ExtractorConfig, RecordingNotify, StatusTable};

use super::{read_page, report_notices};
use crate::output::{print_case_table, print_cases_csv, print_json, OutputFormat};

#[derive(Args)]
pub struct CaseArgs {
    /// Saved register-of-actions page
    pub register: PathBuf,

    /// Saved case lookup page (supplies status, case type and register link)
    #[arg(long)]
    pub search: Option<PathBuf>,

    /// Substatus to classify with, e.g. "Final Status"
    #[arg(long)]
    pub status: Option<String>,

    /// Case type, e.g. "Eviction"
    #[arg(long)]
    pub case_type: Option<String>,
}

pub fn run(args: &CaseArgs, config: &ExtractorConfig, format: &OutputFormat) -> Result<()> {
    let notify = Arc::new(RecordingNotify::new());
    let extractor = Extractor::new(config, StatusTable::load_default()?, notify.clone())?;

    let mut summary = match &args.search {
        Some(path) => extractor.summarize(&read_page(path)?),
        None => CaseSummary::default(),
    };
    if let Some(status) = &args.status {
        summary.status = Some(status.clone());
    }
    if let Some(case_type) = &args.case_type {
        summary.case_type = Some(case_type.clone());
    }

    let case = extractor.extract(&read_page(&args.register)?, &summary)?;

    match format {
        OutputFormat::Table => print_case_table(&case),
        OutputFormat::Json => print_json(&case),
        OutputFormat::Csv => print_cases_csv(std::slice::from_ref(&case))?,
    }

    report_notices(&notify);
    Ok(())
}
