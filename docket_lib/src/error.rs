//! Error types for the extraction layer.

use std::fmt;

use crate::config::ConfigError;
use crate::status::{StatusError, StatusTableError};

/// Document-level extraction failures. Field-level misses are `None`
/// values on the record, never errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("case number not found on register page")]
    MissingCaseNumber,
}

/// Aggregate error for callers that drive the whole engine, wrapping the
/// per-concern errors and failures from the caller's own fetch layer.
#[derive(Debug)]
pub enum DocketError {
    /// Invalid value passed to the query layer (e.g. an inverted range).
    Query(docket_types::Error),
    Extract(ExtractError),
    Status(StatusError),
    StatusTable(StatusTableError),
    Config(ConfigError),
    /// Failure reported by the caller-supplied fetch step.
    Fetch(Box<dyn std::error::Error + Send + Sync>),
}

impl DocketError {
    pub fn fetch<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Fetch(err.into())
    }
}

impl fmt::Display for DocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(e) => write!(f, "Query error: {}", e),
            Self::Extract(e) => write!(f, "Extraction error: {}", e),
            Self::Status(e) => write!(f, "Status error: {}", e),
            Self::StatusTable(e) => write!(f, "Status table error: {}", e),
            Self::Config(e) => write!(f, "Config error: {}", e),
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
        }
    }
}

impl std::error::Error for DocketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Status(e) => Some(e),
            Self::StatusTable(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Fetch(e) => Some(e.as_ref()),
        }
    }
}

impl From<docket_types::Error> for DocketError {
    fn from(e: docket_types::Error) -> Self {
        Self::Query(e)
    }
}

impl From<ExtractError> for DocketError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

impl From<StatusError> for DocketError {
    fn from(e: StatusError) -> Self {
        Self::Status(e)
    }
}

impl From<StatusTableError> for DocketError {
    fn from(e: StatusTableError) -> Self {
        Self::StatusTable(e)
    }
}

impl From<ConfigError> for DocketError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
