//! Derivations over the "Events & Orders of the Court" section: hearings,
//! the disposition row, writ lifecycle events and service records.

use chrono::NaiveDate;
use docket_types::types::{CaseEvent, CaseEvents, Disposition, Hearing, Service};
use scraper::{ElementRef, Html};

use crate::html::{non_empty_text, normalize, spaced_text_of, text_of, B, TD};
use crate::locate;
use crate::parse::{parse_amount, parse_date, parse_officer, parse_time};

pub const WRIT: &str = "Writ";
pub const WRIT_OF_POSSESSION_SERVICE: &str = "Writ of Possession Service";
pub const WRIT_OF_POSSESSION_REQUESTED: &str = "Writ of Possession Requested";
pub const WRIT_OF_POSSESSION_SENT_TO_CONSTABLE: &str =
    "Writ of Possession Sent to Constable's Office";
pub const WRIT_RETURNED_TO_COURT: &str = "Writ Returned to Court";
pub const ALTERNATIVE_SERVICE: &str = "Order Granting Alternative Service";
const SERVED: &str = "Served";
const RETURNED: &str = "Returned";

fn date_of(element: ElementRef<'_>) -> Option<NaiveDate> {
    parse_date(&text_of(element))
}

/// Text nodes directly after the row's bold label, up to the next element.
/// This is where the portal puts "(11:00 AM) (Judicial Officer ...)".
fn text_after_label(label: ElementRef<'_>) -> String {
    let parts: Vec<&str> = label
        .next_siblings()
        .map_while(|node| node.value().as_text().map(|text| &**text))
        .collect();
    normalize(&parts.join(" "))
}

/// Cell texts of the row joined in order, skipping fragments already
/// contained in the text collected so far.
fn row_text(row: ElementRef<'_>) -> String {
    let mut all = String::new();
    for cell in row.select(&TD) {
        let text = spaced_text_of(cell);
        if text.chars().count() <= 1 || all.contains(&text) {
            continue;
        }
        if !all.is_empty() {
            all.push(' ');
        }
        all.push_str(&text);
    }
    all
}

/// Builds a [`Hearing`] from one hearing row. Each field is derived on its
/// own; a miss leaves only that field empty.
pub fn parse_hearing_row(row: ElementRef<'_>) -> Hearing {
    let label = row.select(&B).next();
    let all_text = row_text(row);
    let detail = label.map(text_after_label).unwrap_or_default();
    let detail = if detail.is_empty() { all_text.as_str() } else { detail.as_str() };

    Hearing {
        date: locate::nearest_date_header(row).and_then(date_of),
        time: parse_time(detail),
        officer: parse_officer(detail),
        appeared: spaced_text_of(row).to_lowercase().contains("appeared"),
        hearing_type: label.and_then(non_empty_text),
        all_text,
    }
}

/// The disposition record, or the empty sentinel when the page has no
/// disposition row. The judgment is resolved later.
pub fn parse_disposition(doc: &Html) -> Disposition {
    let Some(row) = locate::disposition_row(doc) else {
        return Disposition::default();
    };
    let fragments = locate::nobr_texts(row);
    Disposition {
        disposition_type: row.select(&B).next().and_then(non_empty_text),
        date: locate::row_date_header(row).and_then(date_of),
        amount: fragments
            .iter()
            .find(|text| text.contains('$'))
            .and_then(|text| parse_amount(text)),
        awarded_to: locate::labeled_value(row, "Awarded To:"),
        awarded_against: locate::labeled_value(row, "Awarded Against:"),
        comments: fragments
            .into_iter()
            .find(|text| text.starts_with("Comment:")),
        judgment: None,
    }
}

/// An event known only by its label: the date of the row holding it.
pub fn dated_event(root: ElementRef<'_>, name: &str) -> Option<CaseEvent> {
    let label = locate::event_label(root, name)?;
    let row = locate::enclosing_event_row(label)?;
    let date = locate::row_date_header(row).and_then(date_of)?;
    Some(CaseEvent::on(date))
}

/// The "Writ" event with its served and returned sub-records.
pub fn writ(root: ElementRef<'_>) -> Option<CaseEvent> {
    let label = locate::event_label(root, WRIT)?;
    let row = locate::enclosing_event_row(label)?;
    let mut event = CaseEvent::on(locate::row_date_header(row).and_then(date_of)?);

    if let Some(served) = locate::status_cells(row, SERVED).into_iter().next() {
        event.served_date = locate::status_date_cell(served).and_then(date_of);
        event.served_subject = locate::service_subject(served);
    }
    if let Some(returned) = locate::status_cells(row, RETURNED).into_iter().next() {
        event.returned_date = locate::status_date_cell(returned).and_then(date_of);
    }
    Some(event)
}

pub fn case_events(root: ElementRef<'_>) -> CaseEvents {
    CaseEvents {
        writ: writ(root),
        writ_of_possession_service: dated_event(root, WRIT_OF_POSSESSION_SERVICE),
        writ_of_possession_requested: dated_event(root, WRIT_OF_POSSESSION_REQUESTED),
        writ_of_possession_sent_to_constable: dated_event(
            root,
            WRIT_OF_POSSESSION_SENT_TO_CONSTABLE,
        ),
        writ_returned_to_court: dated_event(root, WRIT_RETURNED_TO_COURT),
    }
}

/// Every "Served" record under `scope`, in document order. Records whose
/// party cannot be found are skipped.
pub fn services(scope: ElementRef<'_>) -> Vec<Service> {
    locate::status_cells(scope, SERVED)
        .into_iter()
        .filter_map(|cell| {
            Some(Service {
                subject: locate::service_subject(cell)?,
                served_date: locate::status_date_cell(cell).and_then(date_of),
            })
        })
        .collect()
}

/// Dates of every "Order Granting Alternative Service" event.
pub fn alternative_service_dates(root: ElementRef<'_>) -> Vec<NaiveDate> {
    locate::labeled_elements(root, ALTERNATIVE_SERVICE)
        .into_iter()
        .filter_map(locate::enclosing_event_row)
        .filter_map(|row| locate::row_date_header(row).and_then(date_of))
        .collect()
}
