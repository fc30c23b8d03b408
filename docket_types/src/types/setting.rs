use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A hearing listed on a court calendar, as opposed to one recorded in a
/// case's own register.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub case_number: String,
    pub case_link: Option<String>,
    pub setting_type: Option<String>,
    pub setting_style: Option<String>,
    pub judicial_officer: Option<String>,
    pub setting_date: Option<NaiveDate>,
    pub setting_time: Option<String>,
    pub hearing_type: Option<String>,
}
