use docket_types::types::County;

use super::CaseExtractor;

/// Williamson County: the style table sits one position earlier, and
/// family-style captions name petitioners and respondents.
#[derive(Debug, Default, Clone, Copy)]
pub struct WilliamsonExtractor;

impl CaseExtractor for WilliamsonExtractor {
    fn county(&self) -> County {
        County::Williamson
    }

    fn style_table_index(&self) -> usize {
        3
    }

    fn is_plaintiff_label(&self, label: &str) -> bool {
        label == "Plaintiff" || label.starts_with("Petitioner")
    }

    fn is_defendant_label(&self, label: &str) -> bool {
        label.starts_with("Defendant") || label.starts_with("Respondent")
    }
}
