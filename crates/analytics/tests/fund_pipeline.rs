//! Pipeline check: a normalized source feeds the calculators directly.

use analytics::{period_returns, risk_metrics, total_return};
use core_types::ReturnSeries;
use ingest::{normalize, read_raw_table, NormalizerOptions};

const SOURCE: &str = "\
,,31/01/2024,29/02/2024,31/03/2024\n\
Group/Investment,Morningstar Category,,,\n\
Local Funds,,,,\n\
Alpha Fund,ZA Equity,5.0,-3.0,2.0\n";

#[test]
fn normalized_returns_flow_into_the_calculators() {
    let table = read_raw_table(SOURCE.as_bytes(), 0).unwrap();
    let (funds, observations) = normalize(&table, &NormalizerOptions::default()).unwrap();
    assert_eq!(funds.len(), 1);

    let series = ReturnSeries::from_observations(
        observations.iter().filter(|o| o.fund_id == funds[0].fund_id),
    );
    assert_eq!(series.len(), 3);

    // (1.05 * 0.97 * 1.02 - 1) * 100 ~= 3.937%
    let total = total_return(&series.values());
    assert!((total - 3.937).abs() < 1e-3);

    let bundle = period_returns(&series);
    assert!(bundle.one_month.is_some());
    assert_eq!(bundle.one_year, None);

    let metrics = risk_metrics(&series, 0.0);
    assert_eq!(metrics.positive_months, 2);
    assert_eq!(metrics.negative_months, 1);
    assert!(metrics.drawdown.max_drawdown < 0.0);
}
