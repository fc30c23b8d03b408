use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docket_lib::{parse_settings, ExtractorConfig};
use docket_lib::scraper::Html;

use super::read_page;
use crate::output::{print_json, print_settings_csv, print_settings_table, OutputFormat};

#[derive(Args)]
pub struct SettingsArgs {
    /// Saved court calendar pages
    #[arg(required = true)]
    pub pages: Vec<PathBuf>,
}

pub fn run(args: &SettingsArgs, config: &ExtractorConfig, format: &OutputFormat) -> Result<()> {
    let base = config.base_url()?;
    let mut settings = Vec::new();
    for path in &args.pages {
        let doc = Html::parse_document(&read_page(path)?);
        settings.extend(parse_settings(&doc, &base)?);
    }

    if settings.is_empty() {
        eprintln!("No settings found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_settings_table(&settings),
        OutputFormat::Json => print_json(&settings),
        OutputFormat::Csv => print_settings_csv(&settings)?,
    }
    Ok(())
}
