use docket_types::types::{County, Demographics, Precinct};
use scraper::{ElementRef, Html};

use super::CaseExtractor;
use crate::html::{non_empty_text, spaced_text_of, text_of};
use crate::locate;
use crate::parse::{parse_precinct_with_place, precinct_from_case_number};

const GENDER_CELL: usize = 0;
const RACE_CELL: usize = 1;
const ADDRESS_CELL: usize = 2;

/// Hays County: precincts are split into places, and the first defendant's
/// gender, race and address follow the party heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaysExtractor;

impl CaseExtractor for HaysExtractor {
    fn county(&self) -> County {
        County::Hays
    }

    /// Location text first ("Pct 1, Place 1"); the `J<pct><place>` suffix of
    /// the case number fills in a missing place.
    fn precinct(&self, doc: &Html, case_number: &str) -> Option<Precinct> {
        let located = locate::location(doc).and_then(|cell| parse_precinct_with_place(&text_of(cell)));
        match located {
            Some(precinct) if precinct.place.is_some() => Some(precinct),
            _ => precinct_from_case_number(case_number).or(located),
        }
    }

    fn demographics(&self, doc: &Html, defendants: &[ElementRef<'_>]) -> Demographics {
        let Some(heading) = defendants.first().copied() else {
            return Demographics::default();
        };
        let cell = |n: usize| locate::nth_cell_after(doc, heading, n);
        Demographics {
            gender: cell(GENDER_CELL).and_then(non_empty_text),
            race: cell(RACE_CELL).and_then(non_empty_text),
            address: cell(ADDRESS_CELL)
                .map(spaced_text_of)
                .filter(|address| !address.is_empty()),
        }
    }
}
