//! End-to-end ingest check against a realistically shaped export: preamble
//! junk above the headers, a divider row, sparse return cells, and a mix of
//! recognized and unrecognized attribute columns.

use chrono::NaiveDate;
use ingest::{normalize, read_raw_table, NormalizerOptions};

const EXPORT: &str = "\
Generated by Export Tool,,,,,\n\
As of 31 March 2024,,,,,\n\
,,,,,\n\
,,,31/01/2024,29/02/2024,31/03/2024\n\
Group/Investment,Firm Name,Base Currency,,,\n\
Local Funds,,,,,\n\
Alpha Equity Fund,Alpha Asset Mgmt,ZAR,1.50,-0.30,0.80\n\
Beta Income Fund,Beta Capital,ZAR,,0.40,0.55\n\
Local Funds,,,,,\n\
Gamma Balanced Fund,Gamma Invest,ZAR,0.20,,\n";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn normalizes_a_full_export() {
    let table = read_raw_table(EXPORT.as_bytes(), 3).unwrap();
    let (funds, observations) = normalize(&table, &NormalizerOptions::default()).unwrap();

    // Two divider rows dropped, ids dense over the three real funds.
    let names: Vec<&str> = funds.iter().map(|f| f.fund_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Alpha Equity Fund", "Beta Income Fund", "Gamma Balanced Fund"]
    );
    let ids: Vec<u32> = funds.iter().map(|f| f.fund_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert_eq!(funds[0].firm_name.as_deref(), Some("Alpha Asset Mgmt"));
    assert!(funds[0].extra.contains_key("Base Currency"));

    // 3 + 2 + 1 non-blank cells.
    assert_eq!(observations.len(), 6);

    // Sorted by (fund_id, date); gaps are simply absent, not zero-filled.
    let beta: Vec<_> = observations
        .iter()
        .filter(|o| o.fund_id == 2)
        .map(|o| (o.date, o.monthly_return))
        .collect();
    assert_eq!(
        beta,
        vec![(date(2024, 2, 29), 0.40), (date(2024, 3, 31), 0.55)]
    );
}

#[test]
fn preamble_offset_must_line_up_with_headers() {
    // Skipping too few rows leaves preamble text where a date header should
    // be, which the normalizer rejects as a schema defect.
    let table = read_raw_table(EXPORT.as_bytes(), 0).unwrap();
    let err = normalize(&table, &NormalizerOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ingest::IngestError::InvalidDateHeader { column: 0, .. }
    ));
}
