use std::path::Path;

use chrono::NaiveDate;
use docket_lib::scraper::Html;
use docket_lib::{
    collect_all, collect_case_numbers, parse_filing_search, parse_settings, DateRange,
    DocketError, ExtractorConfig, FilingQuery, FilingSearchPage, Notice, Query, RecordingNotify,
    SettingsQuery,
};
use docket_lib::types::County;

fn fixture(name: &str) -> Html {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let html = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e));
    Html::parse_document(&html)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn range(after: NaiveDate, before: NaiveDate) -> DateRange {
    DateRange::new(after, before).unwrap()
}

/// One case per filing day, capped whenever the range is wider than
/// `cap_days`.
fn fake_page(query: &FilingQuery, cap_days: u64) -> FilingSearchPage {
    let range = query.range();
    let case_numbers = range
        .iter_days()
        .take(cap_days as usize)
        .map(|day| format!("J1-CV-20-{}", day.format("%m%d")))
        .collect();
    FilingSearchPage {
        case_numbers,
        capped: range.days() > cap_days,
    }
}

#[test]
fn test_filing_search_lists_case_numbers() {
    let page = parse_filing_search(&fixture("filing_search.html")).unwrap();
    assert_eq!(
        page.case_numbers,
        vec!["J1-CV-20-001590", "J1-CV-20-001591", "J1-CV-20-001592"]
    );
    assert!(!page.capped);
}

#[test]
fn test_capped_filing_search_stops_at_marker() {
    let page = parse_filing_search(&fixture("filing_search_capped.html")).unwrap();
    assert_eq!(page.case_numbers, vec!["J1-CV-20-001590"]);
    assert!(page.capped);
}

#[test]
fn test_capped_query_is_split_until_complete() {
    let notify = RecordingNotify::new();
    let mut visited = Vec::new();
    let mut fetch = |query: &FilingQuery| -> Result<FilingSearchPage, DocketError> {
        visited.push(query.range());
        Ok(fake_page(query, 2))
    };

    let query = FilingQuery::new(range(d(2020, 1, 1), d(2020, 1, 5)), "J1-CV-2020*");
    let case_numbers = collect_case_numbers(query, &mut fetch, &notify).unwrap();

    assert_eq!(
        case_numbers,
        vec!["J1-CV-20-0101", "J1-CV-20-0102", "J1-CV-20-0103", "J1-CV-20-0104", "J1-CV-20-0105"]
    );
    assert_eq!(
        visited,
        vec![
            range(d(2020, 1, 1), d(2020, 1, 5)),
            range(d(2020, 1, 1), d(2020, 1, 2)),
            range(d(2020, 1, 3), d(2020, 1, 5)),
            range(d(2020, 1, 3), d(2020, 1, 3)),
            range(d(2020, 1, 4), d(2020, 1, 5)),
        ]
    );
    assert!(notify.is_empty());
}

#[test]
fn test_single_day_cap_is_reported() {
    let notify = RecordingNotify::new();
    let mut fetch = |_: &FilingQuery| -> Result<FilingSearchPage, DocketError> {
        Ok(FilingSearchPage {
            case_numbers: vec!["J1-CV-20-000001".to_string()],
            capped: true,
        })
    };

    let query = FilingQuery::new(range(d(2020, 3, 2), d(2020, 3, 3)), "J1-CV-2020*");
    let case_numbers = collect_case_numbers(query, &mut fetch, &notify).unwrap();

    assert_eq!(case_numbers.len(), 2);
    assert_eq!(
        notify.take(),
        vec![
            Notice::TruncatedQuery {
                range: DateRange::single_day(d(2020, 3, 2)),
                case_pattern: Some("J1-CV-2020*".to_string()),
                returned: 1,
            },
            Notice::TruncatedQuery {
                range: DateRange::single_day(d(2020, 3, 3)),
                case_pattern: Some("J1-CV-2020*".to_string()),
                returned: 1,
            },
        ]
    );
}

#[test]
fn test_fetch_error_propagates() {
    let notify = RecordingNotify::new();
    let mut fetch = |_: &FilingQuery| -> Result<FilingSearchPage, DocketError> {
        Err(DocketError::fetch("portal returned 503"))
    };
    let query = FilingQuery::new(range(d(2020, 3, 2), d(2020, 3, 9)), "F20*");
    let err = collect_case_numbers(query, &mut fetch, &notify).unwrap_err();
    assert!(matches!(err, DocketError::Fetch(_)));
    assert_eq!(err.to_string(), "Fetch error: portal returned 503");
}

#[test]
fn test_collect_all_runs_every_county_query() {
    let notify = RecordingNotify::new();
    let mut patterns = Vec::new();
    let mut fetch = |query: &FilingQuery| -> Result<FilingSearchPage, DocketError> {
        patterns.push(query.case_pattern.clone());
        Ok(FilingSearchPage::default())
    };

    let queries = FilingQuery::for_county(County::Hays, range(d(2020, 12, 30), d(2021, 1, 2)));
    let case_numbers = collect_all(queries, &mut fetch, &notify).unwrap();

    assert!(case_numbers.is_empty());
    assert_eq!(patterns, vec!["F20*", "F21*"]);
}

#[test]
fn test_notice_display_names_the_pattern() {
    let notice = Notice::TruncatedQuery {
        range: DateRange::single_day(d(2020, 3, 2)),
        case_pattern: Some("J1-CV-2020*".to_string()),
        returned: 200,
    };
    let text = notice.to_string();
    assert!(text.contains("J1-CV-2020*"));
    assert!(text.contains("200"));
}

#[test]
fn test_calendar_settings() {
    let base = ExtractorConfig::for_county(County::Travis).base_url().unwrap();
    let settings = parse_settings(&fixture("calendar.html"), &base).unwrap();
    assert_eq!(settings.len(), 3);

    let first = &settings[0];
    assert_eq!(first.case_number, "J1-CV-20-001590");
    assert_eq!(
        first.case_link.as_deref(),
        Some("https://odysseypa.traviscountytx.gov/JPPublicAccess/CaseDetail.aspx?CaseID=2207114")
    );
    assert_eq!(first.setting_type.as_deref(), Some("Trial/Hearing"));
    assert_eq!(
        first.setting_style.as_deref(),
        Some("Acme Property Management LLC vs. John Doe, Jane Roe")
    );
    assert_eq!(first.judicial_officer.as_deref(), Some("Williams, Yvonne M."));
    assert_eq!(first.setting_date, Some(d(2020, 5, 14)));
    assert_eq!(first.setting_time.as_deref(), Some("11:00 AM"));
    assert_eq!(first.hearing_type.as_deref(), Some("Eviction Hearing"));

    assert_eq!(settings[1].judicial_officer, None);
    assert_eq!(settings[1].hearing_type.as_deref(), Some("Bench Trial"));

    assert_eq!(settings[2].case_number, "");
    assert_eq!(settings[2].case_link, None);
    assert_eq!(settings[2].setting_time.as_deref(), Some("2:00 PM"));
}

#[test]
fn test_calendar_without_table_is_malformed() {
    let doc = Html::parse_document("<html><body><p>No settings</p></body></html>");
    let base = ExtractorConfig::for_county(County::Travis).base_url().unwrap();
    assert!(parse_settings(&doc, &base).is_err());
}

#[test]
fn test_daily_settings_queries() {
    let queries = SettingsQuery::daily(range(d(2020, 5, 14), d(2020, 5, 16)));
    assert_eq!(queries.len(), 3);
    assert!(queries.iter().all(|q| q.range().is_single_day()));
    assert_eq!(
        queries[0].form_fields(),
        vec![
            ("DateSettingOnAfter", "5/14/2020".to_string()),
            ("DateSettingOnBefore", "5/14/2020".to_string()),
        ]
    );
}
