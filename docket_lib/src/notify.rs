//! Operator notification seam.
//!
//! The engine never decides how an operator hears about a condition that
//! needs a human (an unknown substatus, a query that could not be narrowed
//! below the portal's result cap). It reports a [`Notice`] and the caller
//! chooses the channel.

use std::fmt;
use std::sync::Mutex;

use docket_types::DateRange;

/// Something an operator should look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A substatus missing from the lookup table. Extend the table.
    UnknownSubstatus {
        case_number: String,
        substatus: String,
    },
    /// A single-day query still hit the result cap; results are incomplete.
    TruncatedQuery {
        range: DateRange,
        case_pattern: Option<String>,
        returned: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnknownSubstatus {
                case_number,
                substatus,
            } => write!(
                f,
                "case {} has substatus '{}', which is not in the status table",
                case_number, substatus
            ),
            Notice::TruncatedQuery {
                range,
                case_pattern,
                returned,
            } => match case_pattern {
                Some(pattern) => write!(
                    f,
                    "query {} for {} is capped at {} results and cannot be split further",
                    pattern, range, returned
                ),
                None => write!(
                    f,
                    "query for {} is capped at {} results and cannot be split further",
                    range, returned
                ),
            },
        }
    }
}

pub trait Notify: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Logs every notice at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotify;

impl Notify for TracingNotify {
    fn notify(&self, notice: Notice) {
        tracing::warn!(%notice, "operator attention needed");
    }
}

/// Keeps notices in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotify {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the recorded notices.
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notify for RecordingNotify {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
