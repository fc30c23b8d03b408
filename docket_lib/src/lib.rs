//! Extraction engine for county court case records.
//!
//! Turns already-fetched portal pages (register of actions, case lookup,
//! filing search, court calendar) into `docket_types` records. Nothing here
//! performs I/O; fetching and persistence belong to the caller.

pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
mod html;
pub mod judgment;
pub mod locate;
pub mod notify;
pub mod parse;
pub mod search;
pub mod status;

pub use docket_types;
pub use scraper;
pub use docket_types::types;
pub use docket_types::{split_date_range, DateRange, FilingQuery, Query, SettingsQuery};

pub use calendar::parse_settings;
pub use config::{ConfigError, ExtractorConfig};
pub use error::{DocketError, ExtractError};
pub use extract::{layout_for, CaseExtractor, ExtractContext, Extractor};
pub use html::normalize;
pub use judgment::{DispositionText, Resolver};
pub use notify::{Notice, Notify, RecordingNotify, TracingNotify};
pub use search::{
    collect_all, collect_case_numbers, parse_case_search, parse_filing_search, CaseSummary,
    FilingSearchPage,
};
pub use status::{Classification, StatusCategory, StatusError, StatusTable, StatusTableError};
