//! CLI subcommand implementations.

pub mod case;
pub mod filings;
pub mod queries;
pub mod settings;
pub mod split;

use std::path::Path;

use anyhow::{Context, Result};
use docket_lib::RecordingNotify;

/// Reads a saved portal page.
pub fn read_page(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Prints collected operator notices to stderr.
pub fn report_notices(notify: &RecordingNotify) {
    for notice in notify.take() {
        eprintln!("warning: {}", notice);
    }
}
