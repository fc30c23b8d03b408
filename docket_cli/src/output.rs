use anyhow::Result;
use docket_lib::types::{Case, Hearing, Setting};
use docket_lib::DateRange;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Tabled, Serialize)]
struct CaseRow {
    #[tabled(rename = "Case")]
    #[serde(rename = "Case")]
    case_number: String,
    #[tabled(rename = "County")]
    #[serde(rename = "County")]
    county: String,
    #[tabled(rename = "Precinct")]
    #[serde(rename = "Precinct")]
    precinct: String,
    #[tabled(rename = "Filed")]
    #[serde(rename = "Filed")]
    date_filed: String,
    #[tabled(rename = "Plaintiff")]
    #[serde(rename = "Plaintiff")]
    plaintiff: String,
    #[tabled(rename = "Defendants")]
    #[serde(rename = "Defendants")]
    defendants: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Disposition")]
    #[serde(rename = "Disposition")]
    disposition: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Winner")]
    #[serde(rename = "Winner")]
    winner: String,
    #[tabled(rename = "Confidence")]
    #[serde(rename = "Confidence")]
    confidence: String,
}

#[derive(Tabled, Serialize)]
struct HearingRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    hearing_type: String,
    #[tabled(rename = "Officer")]
    #[serde(rename = "Officer")]
    officer: String,
    #[tabled(rename = "Appeared")]
    #[serde(rename = "Appeared")]
    appeared: bool,
}

#[derive(Tabled, Serialize)]
struct SettingRow {
    #[tabled(rename = "Case")]
    #[serde(rename = "Case")]
    case_number: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    hearing_type: String,
    #[tabled(rename = "Officer")]
    #[serde(rename = "Officer")]
    officer: String,
    #[tabled(rename = "Style")]
    #[serde(rename = "Style")]
    style: String,
}

#[derive(Tabled, Serialize)]
struct FilingRow {
    #[tabled(rename = "Case")]
    #[serde(rename = "Case")]
    case_number: String,
}

#[derive(Tabled, Serialize)]
struct RangeRow {
    #[tabled(rename = "After")]
    #[serde(rename = "After")]
    after: String,
    #[tabled(rename = "Before")]
    #[serde(rename = "Before")]
    before: String,
    #[tabled(rename = "Days")]
    #[serde(rename = "Days")]
    days: u64,
}

/// One search the fetch layer would submit.
#[derive(Tabled, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    #[tabled(rename = "Kind")]
    #[serde(rename = "Kind")]
    kind: String,
    #[tabled(rename = "After")]
    #[serde(rename = "After")]
    after: String,
    #[tabled(rename = "Before")]
    #[serde(rename = "Before")]
    before: String,
    #[tabled(rename = "Search")]
    #[serde(rename = "Search")]
    search: String,
    #[tabled(rename = "Form")]
    #[serde(rename = "Form")]
    form: String,
}

impl QueryRow {
    pub fn new(
        kind: &str,
        range: DateRange,
        search: Option<&str>,
        form_fields: Vec<(&'static str, String)>,
    ) -> Self {
        QueryRow {
            kind: kind.to_string(),
            after: range.after.to_string(),
            before: range.before.to_string(),
            search: search.unwrap_or_default().to_string(),
            form: form_fields
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}

fn or_blank<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// -- Row builders --

fn build_case_rows(cases: &[Case]) -> Vec<CaseRow> {
    cases
        .iter()
        .map(|c| CaseRow {
            case_number: c.case_number.clone(),
            county: c.county.to_string(),
            precinct: or_blank(c.precinct),
            date_filed: or_blank(c.date_filed),
            plaintiff: c.plaintiff.clone().unwrap_or_default(),
            defendants: c.defendants_joined(),
            status: c.status.clone().unwrap_or_default(),
            disposition: c.disposition.disposition_type.clone().unwrap_or_default(),
            amount: c
                .disposition
                .amount
                .map(|amount| format!("${}", amount))
                .unwrap_or_default(),
            winner: or_blank(c.disposition.judgment.map(|j| j.winner)),
            confidence: or_blank(c.disposition.judgment.map(|j| j.confidence)),
        })
        .collect()
}

fn build_hearing_rows(hearings: &[Hearing]) -> Vec<HearingRow> {
    hearings
        .iter()
        .map(|h| HearingRow {
            date: or_blank(h.date),
            time: h.time.clone().unwrap_or_default(),
            hearing_type: h.hearing_type.clone().unwrap_or_default(),
            officer: h.officer.clone().unwrap_or_default(),
            appeared: h.appeared,
        })
        .collect()
}

fn build_setting_rows(settings: &[Setting]) -> Vec<SettingRow> {
    settings
        .iter()
        .map(|s| SettingRow {
            case_number: s.case_number.clone(),
            date: or_blank(s.setting_date),
            time: s.setting_time.clone().unwrap_or_default(),
            hearing_type: s.hearing_type.clone().unwrap_or_default(),
            officer: s.judicial_officer.clone().unwrap_or_default(),
            style: s.setting_style.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_filing_rows(case_numbers: &[String]) -> Vec<FilingRow> {
    case_numbers
        .iter()
        .map(|case_number| FilingRow {
            case_number: case_number.clone(),
        })
        .collect()
}

fn build_range_rows(ranges: &[DateRange]) -> Vec<RangeRow> {
    ranges
        .iter()
        .map(|r| RangeRow {
            after: r.after.to_string(),
            before: r.before.to_string(),
            days: r.days(),
        })
        .collect()
}

// -- Table output --

pub fn print_case_table(case: &Case) {
    println!("{}", Table::new(build_case_rows(std::slice::from_ref(case))));
    if !case.hearings.is_empty() {
        println!("{}", Table::new(build_hearing_rows(&case.hearings)));
    }
}

pub fn print_settings_table(settings: &[Setting]) {
    println!("{}", Table::new(build_setting_rows(settings)));
}

pub fn print_filings_table(case_numbers: &[String]) {
    println!("{}", Table::new(build_filing_rows(case_numbers)));
}

pub fn print_ranges_table(ranges: &[DateRange]) {
    println!("{}", Table::new(build_range_rows(ranges)));
}

pub fn print_queries_table(rows: &[QueryRow]) {
    println!("{}", Table::new(rows));
}

// -- CSV output --

fn write_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_cases_csv(cases: &[Case]) -> Result<()> {
    write_csv(build_case_rows(cases))
}

pub fn print_settings_csv(settings: &[Setting]) -> Result<()> {
    write_csv(build_setting_rows(settings))
}

pub fn print_filings_csv(case_numbers: &[String]) -> Result<()> {
    write_csv(build_filing_rows(case_numbers))
}

pub fn print_ranges_csv(ranges: &[DateRange]) -> Result<()> {
    write_csv(build_range_rows(ranges))
}

pub fn print_queries_csv(rows: &[QueryRow]) -> Result<()> {
    write_csv(rows)
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docket_lib::types::{County, Precinct, Resolution, Winner};
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_case() -> Case {
        let mut case = Case::new("F21-006J11", County::Hays);
        case.precinct = Some(Precinct::with_place(1, 1));
        case.date_filed = Some(d(2021, 1, 19));
        case.plaintiff = Some("CastleRock at San Marcos".to_string());
        case.defendants = vec!["Name2, Name1".to_string(), "Doe, Jane".to_string()];
        case.disposition.disposition_type = Some("Default Judgment".to_string());
        case.disposition.amount = Some(Decimal::new(516335, 2));
        case.disposition.judgment = Some(Resolution::new(100, Winner::Plaintiff));
        case
    }

    #[test]
    fn test_case_row_formats_fields() {
        let rows = build_case_rows(&[sample_case()]);
        let row = &rows[0];
        assert_eq!(row.county, "hays");
        assert_eq!(row.precinct, "1.1");
        assert_eq!(row.date_filed, "2021-01-19");
        assert_eq!(row.defendants, "Name2, Name1; Doe, Jane");
        assert_eq!(row.amount, "$5163.35");
        assert_eq!(row.winner, "Plaintiff");
        assert_eq!(row.confidence, "100");
        assert_eq!(row.status, "");
    }

    #[test]
    fn test_unresolved_case_has_blank_winner() {
        let rows = build_case_rows(&[Case::new("J1-CV-20-000001", County::Travis)]);
        assert_eq!(rows[0].winner, "");
        assert_eq!(rows[0].confidence, "");
        assert_eq!(rows[0].amount, "");
    }

    #[test]
    fn test_case_row_json_uses_display_names() {
        let rows = build_case_rows(&[sample_case()]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["Case"], "F21-006J11");
        assert_eq!(json["Winner"], "Plaintiff");
    }

    #[test]
    fn test_range_rows_count_days() {
        let range = DateRange::new(d(2020, 1, 1), d(2020, 1, 20)).unwrap();
        let (first, second) = range.split().unwrap();
        let rows = build_range_rows(&[first, second]);
        assert_eq!(rows[0].before, "2020-01-10");
        assert_eq!(rows[1].after, "2020-01-11");
        assert_eq!(rows[0].days + rows[1].days, 20);
    }

    #[test]
    fn test_query_row_joins_form_fields() {
        let range = DateRange::single_day(d(2020, 5, 14));
        let row = QueryRow::new(
            "filings",
            range,
            Some("J1-CV-2020*"),
            vec![
                ("DateFiledOnAfter", "5/14/2020".to_string()),
                ("CaseSearchValue", "J1-CV-2020*".to_string()),
            ],
        );
        assert_eq!(row.search, "J1-CV-2020*");
        assert_eq!(row.form, "DateFiledOnAfter=5/14/2020&CaseSearchValue=J1-CV-2020*");
    }

    #[test]
    fn test_setting_rows() {
        let setting = Setting {
            case_number: "J1-CV-20-001590".to_string(),
            case_link: None,
            setting_type: Some("Trial/Hearing".to_string()),
            setting_style: None,
            judicial_officer: Some("Williams, Yvonne M.".to_string()),
            setting_date: Some(d(2020, 5, 14)),
            setting_time: Some("11:00 AM".to_string()),
            hearing_type: Some("Eviction Hearing".to_string()),
        };
        let rows = build_setting_rows(&[setting]);
        assert_eq!(rows[0].date, "2020-05-14");
        assert_eq!(rows[0].style, "");
    }
}
