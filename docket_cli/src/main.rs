mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docket_lib::ExtractorConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Extract county court case records from saved portal pages")]
struct Cli {
    /// Output format: table, json or csv
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Portal layout: travis, hays or williamson (defaults to $DOCKET_COUNTY)
    #[arg(long, global = true)]
    county: Option<String>,

    /// Extractor settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one case from a saved register-of-actions page
    Case(commands::case::CaseArgs),
    /// List the hearings on a saved court calendar page
    Settings(commands::settings::SettingsArgs),
    /// List the case numbers on saved filing search pages
    Filings(commands::filings::FilingsArgs),
    /// Show how a date range is halved when a search is capped
    Split(commands::split::SplitArgs),
    /// Show the searches that enumerate a county's filings
    Queries(commands::queries::QueriesArgs),
}

/// Config file first, then `DOCKET_COUNTY`; `--county` wins over both.
fn load_config(cli: &Cli) -> Result<ExtractorConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractorConfig::load(path)?,
        None => match std::env::var("DOCKET_COUNTY") {
            Ok(county) => ExtractorConfig::for_county(county.parse()?),
            Err(_) => ExtractorConfig::default(),
        },
    };
    if let Some(county) = &cli.county {
        config.county = county.parse()?;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docket=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        _ => OutputFormat::Table,
    };

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Case(args) => commands::case::run(args, &config, &format)?,
        Commands::Settings(args) => commands::settings::run(args, &config, &format)?,
        Commands::Filings(args) => commands::filings::run(args, &format)?,
        Commands::Split(args) => commands::split::run(args, &format)?,
        Commands::Queries(args) => commands::queries::run(args, &config, &format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "docket", "case", "page.html", "--status", "Final Status", "--county", "hays",
            "--output", "json",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        assert_eq!(cli.county.as_deref(), Some("hays"));
        match cli.command {
            Commands::Case(args) => {
                assert_eq!(args.register, PathBuf::from("page.html"));
                assert_eq!(args.status.as_deref(), Some("Final Status"));
                assert!(args.search.is_none());
            }
            _ => panic!("expected case subcommand"),
        }
    }

    #[test]
    fn county_flag_overrides_default() {
        let cli = Cli::try_parse_from(["docket", "--county", "wilco", "split", "2020-01-01", "2020-01-20"])
            .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.county, docket_lib::types::County::Williamson);
    }

    #[test]
    fn unknown_county_is_an_error() {
        let cli = Cli::try_parse_from(["docket", "--county", "dallas", "split", "2020-01-01", "2020-01-20"])
            .unwrap();
        assert!(load_config(&cli).is_err());
    }
}
