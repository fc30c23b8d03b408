//! Court calendar pages: one [`Setting`] per listed hearing.

use docket_types::types::Setting;
use scraper::{ElementRef, Html};
use url::Url;

use crate::error::ExtractError;
use crate::html::{child_tags, non_empty_text, text_of, ANCHOR, TD};
use crate::parse::parse_date;
use crate::search::rows_after_heading;

const SETTINGS_HEADER: &str = "Judicial Officer";

// Column positions in a settings row.
const CASE_NUMBER: usize = 1;
const SETTING_TYPE: usize = 2;
const STYLE: usize = 3;
const OFFICER: usize = 4;
const DATE: usize = 8;
const TIME: usize = 9;
const HEARING_TYPE: usize = 10;

/// Parses one settings row, resolving the case link against `base`.
/// Rows with fewer than two cells are skipped; a blank case-number cell is
/// kept as an empty case number.
pub fn parse_setting(row: ElementRef<'_>, base: &Url) -> Option<Setting> {
    let cells: Vec<ElementRef> = child_tags(row, "td").collect();
    let case_cell = cells.get(CASE_NUMBER).copied()?;
    let case_number = text_of(case_cell);
    let cell = |index: usize| cells.get(index).copied().and_then(non_empty_text);

    Some(Setting {
        case_number,
        case_link: case_cell
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| base.join(href.trim()).ok())
            .map(String::from),
        setting_type: cell(SETTING_TYPE),
        setting_style: cell(STYLE),
        judicial_officer: cell(OFFICER),
        setting_date: cell(DATE).as_deref().and_then(parse_date),
        setting_time: cell(TIME),
        hearing_type: cell(HEARING_TYPE),
    })
}

/// Every setting on a calendar page, in listing order.
pub fn parse_settings(doc: &Html, base: &Url) -> Result<Vec<Setting>, ExtractError> {
    let rows = rows_after_heading(doc, &TD, SETTINGS_HEADER).ok_or_else(|| {
        ExtractError::MalformedDocument(format!("no table with a '{}' column", SETTINGS_HEADER))
    })?;
    Ok(rows
        .into_iter()
        .filter_map(|row| parse_setting(row, base))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::TR;

    fn base() -> Url {
        Url::parse("https://odysseypa.traviscountytx.gov/JPPublicAccess/").unwrap()
    }

    fn first_row(doc: &Html) -> ElementRef<'_> {
        doc.select(&TR).next().unwrap()
    }

    #[test]
    fn short_row_keeps_leading_columns() {
        let doc = Html::parse_document(
            "<table><tr><td></td><td>J2-CV-21-000100</td><td>Trial</td></tr></table>",
        );
        let setting = parse_setting(first_row(&doc), &base()).unwrap();
        assert_eq!(setting.case_number, "J2-CV-21-000100");
        assert_eq!(setting.case_link, None);
        assert_eq!(setting.setting_type.as_deref(), Some("Trial"));
        assert_eq!(setting.setting_date, None);
    }

    #[test]
    fn case_link_is_absolute() {
        let doc = Html::parse_document(
            r#"<table><tr><td>1</td><td><a href=" CaseDetail.aspx?CaseID=42 ">J3-EV-21-000007</a></td></tr></table>"#,
        );
        let setting = parse_setting(first_row(&doc), &base()).unwrap();
        assert_eq!(
            setting.case_link.as_deref(),
            Some("https://odysseypa.traviscountytx.gov/JPPublicAccess/CaseDetail.aspx?CaseID=42")
        );
    }

    #[test]
    fn blank_case_number_row_is_kept() {
        let doc = Html::parse_document(
            "<table><tr><td>3</td><td> </td><td>Trial/Hearing</td></tr></table>",
        );
        let setting = parse_setting(first_row(&doc), &base()).unwrap();
        assert_eq!(setting.case_number, "");
        assert_eq!(setting.case_link, None);
        assert_eq!(setting.setting_type.as_deref(), Some("Trial/Hearing"));
    }

    #[test]
    fn row_without_case_cell_is_skipped() {
        let doc = Html::parse_document("<table><tr><td>Page 1 of 3</td></tr></table>");
        assert!(parse_setting(first_row(&doc), &base()).is_none());
    }
}
