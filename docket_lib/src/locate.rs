//! Field locators for register-of-actions pages.
//!
//! Each locator finds one node (or one piece of text) and returns `None`
//! rather than a plausible-looking neighbour when the layout does not
//! match. Extractors compose these; a county variant replaces a single
//! locator by overriding the matching [`CaseExtractor`] method.
//!
//! [`CaseExtractor`]: crate::extract::CaseExtractor

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::html::{
    ancestor_elements, child_tags, elements_after, find_labeled, next_sibling_tag, parent_element,
    prev_sibling_tag, tag_name, text_of, texts_after, B, NOBR, TD, TH, TR,
};
use crate::parse::parse_zip;

static CASE_NUMBER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".ssCaseDetailCaseNbr span").expect("invalid selector: case number")
});
static SECTION_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.ssCaseDetailSectionTitle").expect("invalid selector: section title")
});
static DATE_HEADER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("th.ssTableHeaderLabel").expect("invalid selector: date header")
});
static HEADERS_TD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td[headers]").expect("invalid selector: td[headers]"));
static ID_TH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th[id]").expect("invalid selector: th[id]"));

pub const EVENTS_SECTION_TITLE: &str = "Events & Orders of the Court";
pub const HEARING_ROW_PREFIX: &str = "RCDHR";
pub const EVENT_ROW_PREFIX: &str = "RCD";
pub const DISPOSITION_DATE_ID: &str = "RDISPDATE";

/// The `span` inside the case-number banner.
pub fn case_number(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&CASE_NUMBER).next()
}

/// The document's `index`-th table, counting nested tables in document order.
pub fn nth_table(doc: &Html, index: usize) -> Option<ElementRef<'_>> {
    doc.select(&crate::html::TABLE).nth(index)
}

/// First cell of the first row of `table`.
pub fn first_cell(table: ElementRef<'_>) -> Option<ElementRef<'_>> {
    table.select(&TR).next()?.select(&TD).next()
}

/// The `th` in `scope` whose text is exactly `label`.
pub fn heading<'a>(scope: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    find_labeled(scope, &TH, label)
}

/// First `b` after the `Date Filed:` heading inside `table`.
pub fn date_filed<'a>(doc: &'a Html, table: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let label = heading(table, "Date Filed:")?;
    elements_after(doc, label).find(|el| tag_name(*el) == "b")
}

/// The cell next to the `Location:` heading.
pub fn location(doc: &Html) -> Option<ElementRef<'_>> {
    let label = heading(doc.root_element(), "Location:")?;
    next_sibling_tag(label, "td")
}

/// Every `th` whose normalized text satisfies `is_heading`, in document order.
pub fn party_headings<'a>(doc: &'a Html, is_heading: &dyn Fn(&str) -> bool) -> Vec<ElementRef<'a>> {
    doc.select(&TH)
        .filter(|th| is_heading(&text_of(*th)))
        .collect()
}

/// The party name cell beside a party heading.
pub fn party_name(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    next_sibling_tag(heading, "th")
}

/// First Texas zip code after `heading`, stopping at the next element for
/// which `is_boundary` holds.
pub fn zip_after<'a>(
    doc: &'a Html,
    heading: ElementRef<'a>,
    is_boundary: &'a dyn Fn(ElementRef<'a>) -> bool,
) -> Option<String> {
    texts_after(doc, heading, is_boundary).find_map(parse_zip)
}

/// Attorney cell for the party heading with id `party_id`: the `td` whose
/// `headers` names both the `Attorneys` column and the party row.
pub fn attorney_cell<'a>(doc: &'a Html, party_id: &str) -> Option<ElementRef<'a>> {
    let column = heading(doc.root_element(), "Attorneys")?;
    let column_id = column.value().id()?;
    doc.select(&HEADERS_TD).find(|td| {
        let headers = td.value().attr("headers").unwrap_or_default();
        let has = |id: &str| headers.split_whitespace().any(|h| h == id);
        has(column_id) && has(party_id)
    })
}

/// Attorney name: the first bold text in the attorney cell.
pub fn attorney_name(cell: ElementRef<'_>) -> Option<String> {
    cell.select(&B)
        .map(text_of)
        .find(|name| !name.is_empty())
}

/// The table holding the "Events & Orders of the Court" section.
pub fn events_root(doc: &Html) -> Option<ElementRef<'_>> {
    let title = doc
        .select(&SECTION_TITLE)
        .find(|div| text_of(*div) == EVENTS_SECTION_TITLE)?;
    ancestor_elements(title).find(|el| tag_name(*el) == "table")
}

/// Rows of `root` whose `th` id starts with `prefix`, in document order.
pub fn rows_with_id_prefix<'a>(root: ElementRef<'a>, prefix: &str) -> Vec<ElementRef<'a>> {
    let mut rows: Vec<ElementRef<'a>> = Vec::new();
    for th in root.select(&ID_TH) {
        let Some(id) = th.value().id() else { continue };
        if !id.starts_with(prefix) {
            continue;
        }
        if let Some(row) = parent_element(th).filter(|p| tag_name(*p) == "tr") {
            if !rows.iter().any(|seen| seen.id() == row.id()) {
                rows.push(row);
            }
        }
    }
    rows
}

/// The row holding the disposition: parent of the first `th` whose id
/// contains `RDISPDATE`.
pub fn disposition_row(doc: &Html) -> Option<ElementRef<'_>> {
    let th = doc.select(&ID_TH).find(|th| {
        th.value()
            .id()
            .is_some_and(|id| id.contains(DISPOSITION_DATE_ID))
    })?;
    parent_element(th).filter(|row| tag_name(*row) == "tr")
}

/// The date heading of an event row.
pub fn row_date_header(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    child_tags(row, "th").next()
}

/// Date heading for `row`, falling back to the nearest preceding row that
/// has one.
pub fn nearest_date_header(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if let Some(th) = row_date_header(row).filter(|th| !text_of(*th).is_empty()) {
        return Some(th);
    }
    row.prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| tag_name(*sibling) == "tr")
        .find_map(|sibling| row_date_header(sibling).filter(|th| !text_of(*th).is_empty()))
}

/// Text of the element that follows the text node containing `label`, e.g.
/// the party after "Awarded To:".
pub fn labeled_value(row: ElementRef<'_>, label: &str) -> Option<String> {
    let text_node = row.descendants().find(|node| {
        node.value()
            .as_text()
            .is_some_and(|text| text.contains(label))
    })?;
    let value = text_node.next_siblings().find_map(ElementRef::wrap)?;
    let text = text_of(value);
    (!text.is_empty()).then_some(text)
}

/// `nobr` fragments of the row, in order.
pub fn nobr_texts(row: ElementRef<'_>) -> Vec<String> {
    row.select(&NOBR).map(text_of).collect()
}

/// The bold label with exact text `name` inside `root`.
pub fn event_label<'a>(root: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    find_labeled(root, &B, name)
}

/// Every element in `scope` whose text is exactly `label`. Nested matches
/// (an outer element wrapping only the label) are collapsed to the innermost.
pub fn labeled_elements<'a>(scope: ElementRef<'a>, label: &str) -> Vec<ElementRef<'a>> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| text_of(*el) == label)
        .filter(|el| {
            !el.children()
                .filter_map(ElementRef::wrap)
                .any(|child| text_of(child) == label)
        })
        .collect()
}

/// The event row enclosing `element`: nearest ancestor `tr` with a
/// `th.ssTableHeaderLabel` date.
pub fn enclosing_event_row(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    ancestor_elements(element).find(|el| {
        tag_name(*el) == "tr" && child_tags(*el, "th").any(|th| DATE_HEADER.matches(&th))
    })
}

/// `td` cells inside `scope` whose text is exactly `label` ("Served",
/// "Returned").
pub fn status_cells<'a>(scope: ElementRef<'a>, label: &str) -> Vec<ElementRef<'a>> {
    scope
        .select(&TD)
        .filter(|td| text_of(*td) == label)
        .collect()
}

/// The date cell beside a "Served"/"Returned" cell.
pub fn status_date_cell(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    next_sibling_tag(cell, "td")
}

/// Party a service record refers to: the cell before the nearest enclosing
/// cell that has a non-empty previous `td` sibling.
pub fn service_subject(cell: ElementRef<'_>) -> Option<String> {
    ancestor_elements(cell)
        .filter(|el| tag_name(*el) == "td")
        .find_map(|td| prev_sibling_tag(td, "td").and_then(crate::html::non_empty_text))
}

/// The `n`-th `td` after `anchor` in document order (0-based).
pub fn nth_cell_after<'a>(doc: &'a Html, anchor: ElementRef<'a>, n: usize) -> Option<ElementRef<'a>> {
    elements_after(doc, anchor)
        .filter(|el| tag_name(*el) == "td")
        .nth(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTY_TABLE: &str = r#"
        <table>
          <tr><th id="PIr01">Party</th><th></th><th id="PIr02">Attorneys</th></tr>
          <tr>
            <th id="PIr11" class="ssTableHeaderLabel">Plaintiff</th>
            <th id="PIc12">Acme Apartments LLC</th>
            <td headers="PIr02 PIr11"><b>Jane Lawyer</b><br>Retained</td>
          </tr>
          <tr><td colspan="2">100 Main St<br>Austin, TX 78701</td></tr>
          <tr>
            <th id="PIr21" class="ssTableHeaderLabel">Defendant</th>
            <th id="PIc22">Doe, John</th>
          </tr>
          <tr><td colspan="2">No address</td></tr>
        </table>"#;

    #[test]
    fn finds_party_headings_and_names() {
        let doc = Html::parse_document(PARTY_TABLE);
        let plaintiffs = party_headings(&doc, &|t: &str| t == "Plaintiff");
        assert_eq!(plaintiffs.len(), 1);
        assert_eq!(
            party_name(plaintiffs[0]).map(text_of).as_deref(),
            Some("Acme Apartments LLC")
        );
        let defendants = party_headings(&doc, &|t: &str| t.starts_with("Defendant"));
        assert_eq!(party_name(defendants[0]).map(text_of).as_deref(), Some("Doe, John"));
    }

    #[test]
    fn zip_search_stops_at_next_party() {
        let doc = Html::parse_document(PARTY_TABLE);
        let plaintiffs = party_headings(&doc, &|t: &str| t == "Plaintiff");
        let defendants = party_headings(&doc, &|t: &str| t.starts_with("Defendant"));
        let boundary = |el: ElementRef| {
            tag_name(el) == "th" && matches!(text_of(el).as_str(), "Plaintiff" | "Defendant")
        };
        assert_eq!(
            zip_after(&doc, plaintiffs[0], &boundary).as_deref(),
            Some("78701")
        );
        assert_eq!(zip_after(&doc, defendants[0], &boundary), None);
    }

    #[test]
    fn attorney_cell_matches_both_headers() {
        let doc = Html::parse_document(PARTY_TABLE);
        let cell = attorney_cell(&doc, "PIr11").unwrap();
        assert_eq!(attorney_name(cell).as_deref(), Some("Jane Lawyer"));
        assert!(attorney_cell(&doc, "PIr21").is_none());
    }

    #[test]
    fn labeled_value_reads_following_element() {
        let doc = Html::parse_document(
            "<table><tr><th id='RDISPDATE1'>06/01/2020</th><td><nobr>Awarded To: <b>Acme LLC</b></nobr></td></tr></table>",
        );
        let row = disposition_row(&doc).unwrap();
        assert_eq!(labeled_value(row, "Awarded To:").as_deref(), Some("Acme LLC"));
        assert_eq!(labeled_value(row, "Awarded Against:"), None);
    }

    #[test]
    fn rows_are_deduplicated() {
        let doc = Html::parse_document(
            "<table><tr><th id='RCDHR1'>05/14/2020</th><th id='RCDHR1b'></th></tr><tr><th id='RCDE2'>05/15/2020</th></tr></table>",
        );
        let table = nth_table(&doc, 0).unwrap();
        assert_eq!(rows_with_id_prefix(table, "RCDHR").len(), 1);
        assert_eq!(rows_with_id_prefix(table, "RCD").len(), 2);
    }
}
