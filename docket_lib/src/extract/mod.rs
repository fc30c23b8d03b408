//! Register-of-actions extraction.
//!
//! [`CaseExtractor`] carries one method per field, each with the reference
//! (Travis) behaviour as its default. County layouts implement the trait
//! and override only what differs on their portal. [`Extractor`] pairs a
//! layout with the resolver, status table and notification channel and is
//! what callers use.

use std::sync::Arc;

use chrono::NaiveDate;
use docket_types::types::{
    AttorneyMap, Case, CaseEvents, County, Demographics, Disposition, Hearing, Precinct, Service,
};
use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ConfigError, ExtractorConfig};
use crate::error::ExtractError;
use crate::html::{non_empty_text, tag_name, text_of};
use crate::judgment::{DispositionText, Resolver};
use crate::locate;
use crate::notify::{Notice, Notify};
use crate::parse::{parse_date, parse_precinct_number};
use crate::search::{parse_case_search, CaseSummary};
use crate::status::{StatusError, StatusTable};

pub mod events;
mod hays;
mod travis;
mod williamson;

pub use self::hays::HaysExtractor;
pub use self::travis::TravisExtractor;
pub use self::williamson::WilliamsonExtractor;

/// Everything an extraction needs besides the page layout.
pub struct ExtractContext {
    pub resolver: Resolver,
    pub statuses: StatusTable,
    pub moratorium_cutoff: NaiveDate,
    pub notify: Arc<dyn Notify>,
}

pub trait CaseExtractor: Send + Sync {
    fn county(&self) -> County;

    fn case_number(&self, doc: &Html) -> Option<String> {
        locate::case_number(doc).and_then(non_empty_text)
    }

    /// Index of the table holding the case style and filing date.
    fn style_table_index(&self) -> usize {
        4
    }

    fn style(&self, doc: &Html) -> Option<String> {
        let table = locate::nth_table(doc, self.style_table_index())?;
        locate::first_cell(table).and_then(non_empty_text)
    }

    fn date_filed(&self, doc: &Html) -> Option<NaiveDate> {
        let table = locate::nth_table(doc, self.style_table_index())?;
        locate::date_filed(doc, table).and_then(|b| parse_date(&text_of(b)))
    }

    fn precinct(&self, doc: &Html, _case_number: &str) -> Option<Precinct> {
        let cell = locate::location(doc)?;
        parse_precinct_number(&text_of(cell)).map(Precinct::new)
    }

    fn is_plaintiff_label(&self, label: &str) -> bool {
        label == "Plaintiff"
    }

    fn is_defendant_label(&self, label: &str) -> bool {
        label.starts_with("Defendant")
    }

    fn is_party_heading(&self, element: ElementRef<'_>) -> bool {
        if tag_name(element) != "th" {
            return false;
        }
        let label = text_of(element);
        self.is_plaintiff_label(&label) || self.is_defendant_label(&label)
    }

    fn plaintiff_headings<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        locate::party_headings(doc, &|label: &str| self.is_plaintiff_label(label))
    }

    fn defendant_headings<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        locate::party_headings(doc, &|label: &str| self.is_defendant_label(label))
    }

    fn party_names(&self, headings: &[ElementRef<'_>]) -> Vec<String> {
        headings
            .iter()
            .filter_map(|heading| locate::party_name(*heading))
            .filter_map(non_empty_text)
            .collect()
    }

    fn zip<'a>(&self, doc: &'a Html, heading: ElementRef<'a>) -> Option<String> {
        let boundary = |element: ElementRef<'_>| self.is_party_heading(element);
        locate::zip_after(doc, heading, &boundary)
    }

    fn attorneys(&self, doc: &Html, headings: &[ElementRef<'_>]) -> AttorneyMap {
        let mut attorneys = AttorneyMap::new();
        for heading in headings {
            let Some(party) = locate::party_name(*heading).and_then(non_empty_text) else {
                continue;
            };
            let Some(party_id) = heading.value().id() else {
                continue;
            };
            let Some(attorney) = locate::attorney_cell(doc, party_id).and_then(locate::attorney_name)
            else {
                continue;
            };
            attorneys.entry(attorney).or_default().push(party);
        }
        attorneys
    }

    fn demographics(&self, _doc: &Html, _defendants: &[ElementRef<'_>]) -> Demographics {
        Demographics::default()
    }

    fn events_root<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        locate::events_root(doc)
    }

    fn hearing_row_prefix(&self) -> &'static str {
        locate::HEARING_ROW_PREFIX
    }

    fn hearings(&self, root: ElementRef<'_>) -> Vec<Hearing> {
        locate::rows_with_id_prefix(root, self.hearing_row_prefix())
            .into_iter()
            .map(events::parse_hearing_row)
            .collect()
    }

    fn disposition(&self, doc: &Html) -> Disposition {
        events::parse_disposition(doc)
    }

    fn case_events(&self, root: ElementRef<'_>) -> CaseEvents {
        events::case_events(root)
    }

    fn services(&self, doc: &Html) -> Vec<Service> {
        events::services(doc.root_element())
    }

    fn alternative_service_dates(&self, root: ElementRef<'_>) -> Vec<NaiveDate> {
        events::alternative_service_dates(root)
    }

    /// Assembles a [`Case`] from a register page.
    ///
    /// Fails only when the page is not a register page at all (no case
    /// number, no events section). Every other field degrades to `None` or
    /// empty on its own.
    fn extract(
        &self,
        doc: &Html,
        summary: &CaseSummary,
        ctx: &ExtractContext,
    ) -> Result<Case, ExtractError> {
        let case_number = self
            .case_number(doc)
            .ok_or(ExtractError::MissingCaseNumber)?;
        let root = self.events_root(doc).ok_or_else(|| {
            ExtractError::MalformedDocument(format!(
                "case {}: no '{}' section",
                case_number,
                locate::EVENTS_SECTION_TITLE
            ))
        })?;
        let plaintiffs = self.plaintiff_headings(doc);
        let defendants = self.defendant_headings(doc);

        let mut case = Case::new(case_number, self.county());
        case.style = self.style(doc);
        case.date_filed = self.date_filed(doc);
        case.precinct = self.precinct(doc, &case.case_number);
        case.plaintiff = self.party_names(&plaintiffs).into_iter().next();
        case.defendants = self.party_names(&defendants);
        case.plaintiff_zip = plaintiffs.first().and_then(|h| self.zip(doc, *h));
        case.defendant_zip = defendants.first().and_then(|h| self.zip(doc, *h));
        case.attorneys_for_plaintiffs = self.attorneys(doc, &plaintiffs);
        case.attorneys_for_defendants = self.attorneys(doc, &defendants);
        case.defendant_demographics = self.demographics(doc, &defendants);
        case.hearings = self.hearings(root);
        case.events = self.case_events(root);
        case.services = self.services(doc);
        case.alternative_service_dates = self.alternative_service_dates(root);
        case.status = summary.status.clone();
        case.case_type = summary.case_type.clone();
        case.register_url = summary.register_url.clone();
        case.disposition = self.disposition(doc);

        let defendant = case.defendants.join(" ");
        let judgment = ctx.resolver.resolve(&DispositionText {
            awarded_against: case.disposition.awarded_against.as_deref(),
            awarded_to: case.disposition.awarded_to.as_deref(),
            plaintiff: case.plaintiff.as_deref(),
            defendant: Some(defendant.as_str()),
            disposition_type: case.disposition.disposition_type.as_deref(),
            status: case.status.as_deref(),
        });
        case.disposition.judgment = judgment;

        if let Some(status) = case.status.as_deref() {
            match ctx.statuses.classify(status) {
                Ok(classification) => {
                    case.activity = Some(classification.activity);
                    case.judgment_after_moratorium = case
                        .disposition
                        .date
                        .map(|date| classification.judgment_after(date, ctx.moratorium_cutoff));
                }
                Err(StatusError::UnknownSubstatus(substatus)) => {
                    warn!(case_number = %case.case_number, %substatus, "unknown substatus");
                    ctx.notify.notify(Notice::UnknownSubstatus {
                        case_number: case.case_number.clone(),
                        substatus,
                    });
                }
            }
        }

        debug!(
            case_number = %case.case_number,
            hearings = case.hearings.len(),
            "extracted case"
        );
        Ok(case)
    }
}

/// The layout for `county`.
pub fn layout_for(county: County) -> Box<dyn CaseExtractor> {
    match county {
        County::Travis => Box::new(TravisExtractor),
        County::Hays => Box::new(HaysExtractor),
        County::Williamson => Box::new(WilliamsonExtractor),
    }
}

/// A county layout bound to its resolution context.
pub struct Extractor {
    layout: Box<dyn CaseExtractor>,
    context: ExtractContext,
    base_url: Url,
}

impl Extractor {
    pub fn new(
        config: &ExtractorConfig,
        statuses: StatusTable,
        notify: Arc<dyn Notify>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Extractor {
            layout: layout_for(config.county),
            context: ExtractContext {
                resolver: Resolver::new(config.fuzzy_threshold),
                statuses,
                moratorium_cutoff: config.moratorium_cutoff,
                notify,
            },
            base_url: config.base_url()?,
        })
    }

    pub fn county(&self) -> County {
        self.layout.county()
    }

    pub fn layout(&self) -> &dyn CaseExtractor {
        self.layout.as_ref()
    }

    /// Reads status, type and register link from a case lookup page.
    pub fn summarize(&self, search_html: &str) -> CaseSummary {
        parse_case_search(&Html::parse_document(search_html), &self.base_url)
    }

    pub fn extract_document(&self, doc: &Html, summary: &CaseSummary) -> Result<Case, ExtractError> {
        self.layout.extract(doc, summary, &self.context)
    }

    /// Extracts a case from register-page HTML.
    pub fn extract(&self, register_html: &str, summary: &CaseSummary) -> Result<Case, ExtractError> {
        self.extract_document(&Html::parse_document(register_html), summary)
    }

    /// Extracts a case from its lookup page and register page together.
    pub fn extract_with_search(
        &self,
        search_html: &str,
        register_html: &str,
    ) -> Result<Case, ExtractError> {
        let summary = self.summarize(search_html);
        self.extract(register_html, &summary)
    }
}
