//! Case outcome as recorded in the register's disposition row.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Disposition sub-record of a [`Case`](super::Case).
///
/// `Default` is the sentinel used when the page has no disposition row.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Disposition {
    /// e.g. "Default Judgment", "Dismissed".
    pub disposition_type: Option<String>,
    pub date: Option<NaiveDate>,
    /// Exact amount parsed from text such as "$5,163.35".
    pub amount: Option<Decimal>,
    pub awarded_to: Option<String>,
    pub awarded_against: Option<String>,
    pub comments: Option<String>,
    /// Inferred winner; `None` when no rule or match applies.
    pub judgment: Option<Resolution>,
}

/// Party a judgment was resolved in favor of.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Plaintiff,
    Defendant,
    #[serde(rename = "No Judgement")]
    NoJudgement,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Plaintiff => write!(f, "Plaintiff"),
            Winner::Defendant => write!(f, "Defendant"),
            Winner::NoJudgement => write!(f, "No Judgement"),
        }
    }
}

/// Winner plus the score that decided it (100 for rule-based outcomes,
/// the summed fuzzy score otherwise).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub confidence: u32,
    pub winner: Winner,
}

impl Resolution {
    pub fn new(confidence: u32, winner: Winner) -> Self {
        Resolution { confidence, winner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_serializes_with_legacy_label() {
        let json = serde_json::to_string(&Winner::NoJudgement).unwrap();
        assert_eq!(json, "\"No Judgement\"");
        assert_eq!(Winner::NoJudgement.to_string(), "No Judgement");
    }

    #[test]
    fn amount_serializes_exactly() {
        let disposition = Disposition {
            amount: Some(Decimal::new(516335, 2)),
            ..Default::default()
        };
        let value = serde_json::to_value(&disposition).unwrap();
        assert_eq!(value["amount"], "5163.35");
    }
}
