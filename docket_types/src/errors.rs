//! Error types for the value and query layer.

use chrono::NaiveDate;

/// Errors raised while building queries or parsing identifiers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The date range is empty, inverted, or a single day that cannot be split.
    #[error("invalid date range {after} to {before}")]
    InvalidRange { after: NaiveDate, before: NaiveDate },
    /// The county identifier does not name a supported portal.
    #[error("unknown county '{0}'")]
    UnknownCounty(String),
}
