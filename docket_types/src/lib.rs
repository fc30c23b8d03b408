//! Value types and search queries for county court case records.
//!
//! Everything here is plain data: the extraction engine in `docket_lib`
//! produces these records, and the fetch/persist layers consume them.

mod errors;
mod query;
pub mod types;
pub use self::errors::Error;
pub use self::query::{split_date_range, DateRange, FilingQuery, Query, SettingsQuery};
