//! Search-result pages: the single-case lookup and the filing-date listing,
//! plus the orchestration that narrows capped filing queries.

use std::sync::LazyLock;

use docket_types::{DateRange, Query};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{DocketError, ExtractError};
use crate::html::{
    ancestor_elements, child_tags, find_labeled, non_empty_text, spaced_text_of, tag_name,
    text_of, DIV, TD, TH,
};
use crate::notify::{Notice, Notify};

static STYLED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[style][href]").expect("invalid selector: styled link"));

const FILINGS_HEADER: &str = "Filed/Location";
const CAPPED_MARKER: &str = "too many matches to display";
const NO_MATCHES: &str = "No cases matched";

/// What the case lookup page says about one case.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseSummary {
    pub status: Option<String>,
    pub case_type: Option<String>,
    pub register_url: Option<String>,
}

/// Case type and status sit in the last cell of the result row, type first.
pub fn status_and_type(doc: &Html) -> (Option<String>, Option<String>) {
    let Some(last_cell) = doc.select(&TD).last() else {
        return (None, None);
    };
    let divs: Vec<ElementRef> = last_cell.select(&DIV).collect();
    let status = divs.get(1).copied().and_then(non_empty_text);
    let case_type = divs.first().copied().and_then(non_empty_text);
    (status, case_type)
}

fn is_blue(style: &str) -> bool {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.trim_end_matches(';') == "color:blue"
}

/// Register link of the result row, resolved against `base`.
pub fn register_url(doc: &Html, base: &Url) -> Option<String> {
    let link = doc
        .select(&STYLED)
        .find(|el| el.value().attr("style").is_some_and(is_blue))?;
    let href = link.value().attr("href")?;
    base.join(href.trim()).ok().map(String::from)
}

pub fn parse_case_search(doc: &Html, base: &Url) -> CaseSummary {
    let (status, case_type) = status_and_type(doc);
    CaseSummary {
        status,
        case_type,
        register_url: register_url(doc, base),
    }
}

/// Case numbers listed on one filing search page.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingSearchPage {
    pub case_numbers: Vec<String>,
    /// The portal hit its result cap; the listing is incomplete.
    pub capped: bool,
}

/// Header row of the table whose heading is `label`, and the rows after it.
pub(crate) fn rows_after_heading<'a>(
    doc: &'a Html,
    selector: &Selector,
    label: &str,
) -> Option<Vec<ElementRef<'a>>> {
    let heading = find_labeled(doc.root_element(), selector, label)?;
    let header_row = ancestor_elements(heading).find(|el| tag_name(*el) == "tr")?;
    Some(
        header_row
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|el| tag_name(*el) == "tr")
            .collect(),
    )
}

pub fn parse_filing_search(doc: &Html) -> Result<FilingSearchPage, ExtractError> {
    let rows = rows_after_heading(doc, &TH, FILINGS_HEADER).ok_or_else(|| {
        ExtractError::MalformedDocument(format!("no table with a '{}' heading", FILINGS_HEADER))
    })?;

    let mut page = FilingSearchPage::default();
    for row in rows {
        if spaced_text_of(row).contains(CAPPED_MARKER) {
            debug!("filing search hit the result cap");
            page.capped = true;
            break;
        }
        match child_tags(row, "td").next().map(text_of) {
            Some(case_number) if !case_number.is_empty() => page.case_numbers.push(case_number),
            _ => debug!("skipping filing row without a case number"),
        }
    }

    if page.case_numbers.len() == 1 && page.case_numbers[0].contains(NO_MATCHES) {
        page.case_numbers.clear();
    }
    Ok(page)
}

/// Runs `query` through `fetch`, splitting its date range and re-running
/// both halves whenever the page comes back capped.
///
/// A single-day query cannot be split; its capped listing is accepted as
/// final and the operator is notified.
pub fn collect_case_numbers<Q, F>(
    query: Q,
    fetch: &mut F,
    notify: &dyn Notify,
) -> Result<Vec<String>, DocketError>
where
    Q: Query + Clone,
    F: FnMut(&Q) -> Result<FilingSearchPage, DocketError>,
{
    let page = fetch(&query)?;
    if !page.capped {
        return Ok(page.case_numbers);
    }

    match query.split() {
        Ok((first, second)) => {
            info!(range = %query.range(), "result cap hit, splitting query");
            let mut case_numbers = collect_case_numbers(first, fetch, notify)?;
            case_numbers.extend(collect_case_numbers(second, fetch, notify)?);
            Ok(case_numbers)
        }
        Err(_) => {
            notify.notify(Notice::TruncatedQuery {
                range: query.range(),
                case_pattern: query.search_value().map(str::to_string),
                returned: page.case_numbers.len(),
            });
            Ok(page.case_numbers)
        }
    }
}

/// Runs every query and concatenates the results in order.
pub fn collect_all<Q, F>(
    queries: Vec<Q>,
    fetch: &mut F,
    notify: &dyn Notify,
) -> Result<Vec<String>, DocketError>
where
    Q: Query + Clone,
    F: FnMut(&Q) -> Result<FilingSearchPage, DocketError>,
{
    let mut all = Vec::new();
    for query in queries {
        all.extend(collect_case_numbers(query, fetch, notify)?);
    }
    Ok(all)
}

/// Single-day ranges the split protocol would visit for `range` if every
/// query came back capped.
pub fn leaf_ranges(range: DateRange) -> Vec<DateRange> {
    match range.split() {
        Ok((first, second)) => {
            let mut leaves = leaf_ranges(first);
            leaves.extend(leaf_ranges(second));
            leaves
        }
        Err(_) => vec![range],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_is_blue() {
        assert!(is_blue("color: blue"));
        assert!(is_blue("COLOR:BLUE;"));
        assert!(!is_blue("color: red"));
    }

    #[test]
    fn test_no_matches_row_gives_empty_page() {
        let doc = Html::parse_document(
            "<table><tr><th>Case Number</th><th>Filed/Location</th></tr><tr><td>No cases matched your search criteria.</td></tr></table>",
        );
        let page = parse_filing_search(&doc).unwrap();
        assert!(page.case_numbers.is_empty());
        assert!(!page.capped);
    }

    #[test]
    fn test_missing_table_is_malformed() {
        let doc = Html::parse_document("<p>Server busy</p>");
        assert!(matches!(
            parse_filing_search(&doc),
            Err(ExtractError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_leaf_ranges_cover_every_day() {
        let range = DateRange::new(d(2020, 1, 1), d(2020, 1, 5)).unwrap();
        let leaves = leaf_ranges(range);
        assert_eq!(leaves.len(), 5);
        assert!(leaves.iter().all(DateRange::is_single_day));
    }
}
