//! Compounding and period-return calculations.
//!
//! All returns are percentages in and percentages out. Annualization assumes a
//! monthly cadence (12 periods/year) and never verifies it; a series with gaps
//! silently stretches the effective lookback of count-based windows.

use crate::report::{sanitize, CumulativePoint, PeriodReturns, RollingPoint};
use chrono::{Datelike, Months, NaiveDate};
use core_types::ReturnSeries;
use std::collections::BTreeMap;

/// Observations per year assumed by every annualization in the system.
pub const PERIODS_PER_YEAR: u32 = 12;

/// The standard reporting windows, as `(months, annualized)` pairs. Short
/// windows report cumulative return; windows of a year and up report CAGR.
const WINDOWS: [(u32, bool); 7] = [
    (1, false),
    (3, false),
    (6, false),
    (12, true),
    (36, true),
    (60, true),
    (120, true),
];

/// Compounds a sequence of monthly returns into the total return over the
/// whole span, in percent. An empty slice compounds to 0.0 by definition.
pub fn total_return(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let factor: f64 = values.iter().map(|r| 1.0 + r / 100.0).product();
    (factor - 1.0) * 100.0
}

/// Converts a compounded multi-period return into an equivalent constant
/// annual rate (CAGR), in percent. `n == 0` yields 0.0.
pub fn annualized_return(values: &[f64], periods_per_year: u32) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let total = total_return(values);
    let exponent = f64::from(periods_per_year) / n as f64;
    ((1.0 + total / 100.0).powf(exponent) - 1.0) * 100.0
}

/// Computes the standard period-return bundle for a sorted series.
///
/// Each window takes the observations dated strictly after
/// `latest_date - window_months` and reports `None` unless that slice holds at
/// least `window_months` observations. The threshold is a strict count against
/// the window length, not a calendar-exact check, so gaps inflate the
/// effective lookback rather than voiding the window.
///
/// `ITD` is always the annualized return over the full history, whatever its
/// length. `YTD` is left for the caller to fill via [`ytd_return`].
pub fn period_returns(series: &ReturnSeries) -> PeriodReturns {
    let mut bundle = PeriodReturns {
        inception_to_date: sanitize(annualized_return(&series.values(), PERIODS_PER_YEAR)),
        ..Default::default()
    };

    let Some(latest) = series.latest_date() else {
        return bundle;
    };

    for (months, annualized) in WINDOWS {
        let value = window_return(series, latest, months, annualized);
        match months {
            1 => bundle.one_month = value,
            3 => bundle.three_months = value,
            6 => bundle.six_months = value,
            12 => bundle.one_year = value,
            36 => bundle.three_years = value,
            60 => bundle.five_years = value,
            120 => bundle.ten_years = value,
            _ => unreachable!("window not in WINDOWS table"),
        }
    }

    bundle
}

/// One trailing window: observations with `date > latest - months`, reported
/// only when the slice count reaches the window length.
fn window_return(
    series: &ReturnSeries,
    latest: NaiveDate,
    months: u32,
    annualized: bool,
) -> Option<f64> {
    let cutoff = latest.checked_sub_months(Months::new(months))?;
    let window: Vec<f64> = series
        .points()
        .iter()
        .filter(|p| p.date > cutoff)
        .map(|p| p.value)
        .collect();

    if (window.len() as u32) < months {
        return None;
    }

    let value = if annualized {
        annualized_return(&window, PERIODS_PER_YEAR)
    } else {
        total_return(&window)
    };
    sanitize(value)
}

/// Total return per calendar year, partial first/last years unadjusted,
/// ascending by year.
pub fn calendar_year_returns(series: &ReturnSeries) -> BTreeMap<i32, f64> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for point in series.points() {
        by_year.entry(point.date.year()).or_default().push(point.value);
    }

    by_year
        .into_iter()
        .map(|(year, values)| (year, total_return(&values)))
        .collect()
}

/// The running compounded return relative to inception, one point per
/// observation date, ascending.
pub fn cumulative_returns(series: &ReturnSeries) -> Vec<CumulativePoint> {
    let mut factor = 1.0;
    series
        .points()
        .iter()
        .map(|point| {
            factor *= 1.0 + point.value / 100.0;
            CumulativePoint {
                date: point.date,
                cumulative_return: (factor - 1.0) * 100.0,
            }
        })
        .collect()
}

/// Total return since 1 January of the latest observed year, or `None` when
/// no observation falls in that year (including the empty series).
pub fn ytd_return(series: &ReturnSeries) -> Option<f64> {
    let latest = series.latest_date()?;
    let year_start = NaiveDate::from_ymd_opt(latest.year(), 1, 1)?;

    let ytd: Vec<f64> = series
        .points()
        .iter()
        .filter(|p| p.date >= year_start)
        .map(|p| p.value)
        .collect();

    if ytd.is_empty() {
        return None;
    }
    sanitize(total_return(&ytd))
}

/// Annualized return over every trailing window of `window_months`
/// observations, labeled with the window's end date. A series shorter than the
/// window yields an empty result.
pub fn rolling_returns(series: &ReturnSeries, window_months: usize) -> Vec<RollingPoint> {
    let points = series.points();
    if window_months == 0 || points.len() < window_months {
        return Vec::new();
    }

    points
        .windows(window_months)
        .map(|window| {
            let values: Vec<f64> = window.iter().map(|p| p.value).collect();
            RollingPoint {
                date: window[window_months - 1].date,
                rolling_return: sanitize(annualized_return(&values, PERIODS_PER_YEAR)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ReturnPoint;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Consecutive month-end observations ending at `end`, one value each,
    /// oldest first.
    fn monthly_series(end: NaiveDate, values: &[f64]) -> ReturnSeries {
        let points = values
            .iter()
            .rev()
            .enumerate()
            .map(|(offset, value)| {
                let date = end
                    .checked_sub_months(Months::new(offset as u32))
                    .unwrap();
                ReturnPoint { date, value: *value }
            })
            .collect();
        ReturnSeries::from_points(points)
    }

    #[test]
    fn total_return_of_empty_series_is_zero() {
        assert_eq!(total_return(&[]), 0.0);
        assert_eq!(annualized_return(&[], PERIODS_PER_YEAR), 0.0);
    }

    #[test]
    fn total_return_compounds_percentages() {
        // (1.05 * 0.97 * 1.02 - 1) * 100
        let total = total_return(&[5.0, -3.0, 2.0]);
        assert!((total - 3.937).abs() < 1e-3, "got {total}");
    }

    #[test]
    fn annualized_return_matches_cagr() {
        // 12 months of +1% compounds to ~12.6825%, and annualizing 12 monthly
        // observations must return exactly that total.
        let values = vec![1.0; 12];
        let annualized = annualized_return(&values, PERIODS_PER_YEAR);
        let total = total_return(&values);
        assert!((annualized - total).abs() < 1e-9);
    }

    #[test]
    fn eleven_observations_leave_one_year_window_null() {
        let series = monthly_series(date(2024, 12, 31), &[1.0; 11]);
        let bundle = period_returns(&series);
        assert_eq!(bundle.one_year, None);
        assert!(bundle.six_months.is_some());
        assert!(bundle.inception_to_date.is_some());
    }

    #[test]
    fn twelve_observations_fill_the_one_year_window() {
        let series = monthly_series(date(2024, 12, 31), &[1.0; 12]);
        let bundle = period_returns(&series);
        let one_year = bundle.one_year.expect("1Y should be present");
        assert!((one_year - total_return(&[1.0; 12])).abs() < 1e-9);
    }

    #[test]
    fn short_windows_are_cumulative_not_annualized() {
        let series = monthly_series(date(2024, 12, 31), &[2.0; 24]);
        let bundle = period_returns(&series);
        let three_months = bundle.three_months.unwrap();
        assert!((three_months - total_return(&[2.0; 3])).abs() < 1e-9);
    }

    #[test]
    fn period_returns_is_idempotent() {
        let series = monthly_series(date(2024, 12, 31), &[1.5, -0.5, 2.0, 0.0, 1.0, -2.0]);
        assert_eq!(period_returns(&series), period_returns(&series));
    }

    #[test]
    fn empty_series_still_reports_itd() {
        let bundle = period_returns(&ReturnSeries::default());
        assert_eq!(bundle.inception_to_date, Some(0.0));
        assert_eq!(bundle.one_month, None);
    }

    #[test]
    fn calendar_years_group_partial_years_unadjusted() {
        let series = ReturnSeries::from_points(vec![
            ReturnPoint { date: date(2022, 11, 30), value: 1.0 },
            ReturnPoint { date: date(2022, 12, 31), value: 1.0 },
            ReturnPoint { date: date(2023, 1, 31), value: -2.0 },
        ]);
        let years = calendar_year_returns(&series);
        assert_eq!(years.len(), 2);
        assert!((years[&2022] - total_return(&[1.0, 1.0])).abs() < 1e-9);
        assert!((years[&2023] - -2.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_of_single_observation_is_the_observation() {
        let series = ReturnSeries::from_points(vec![ReturnPoint {
            date: date(2024, 1, 31),
            value: 2.5,
        }]);
        let path = cumulative_returns(&series);
        assert_eq!(path.len(), 1);
        assert!((path[0].cumulative_return - 2.5).abs() < 1e-9);
    }

    #[test]
    fn ytd_uses_latest_observed_year() {
        let series = ReturnSeries::from_points(vec![
            ReturnPoint { date: date(2023, 12, 31), value: 10.0 },
            ReturnPoint { date: date(2024, 1, 31), value: 1.0 },
            ReturnPoint { date: date(2024, 2, 29), value: 2.0 },
        ]);
        let ytd = ytd_return(&series).unwrap();
        assert!((ytd - total_return(&[1.0, 2.0])).abs() < 1e-9);
    }

    #[test]
    fn ytd_of_empty_series_is_none() {
        assert_eq!(ytd_return(&ReturnSeries::default()), None);
    }

    #[test]
    fn rolling_returns_need_a_full_window() {
        let series = monthly_series(date(2024, 12, 31), &[1.0; 5]);
        assert!(rolling_returns(&series, 12).is_empty());

        let series = monthly_series(date(2024, 12, 31), &[1.0; 14]);
        let rolling = rolling_returns(&series, 12);
        assert_eq!(rolling.len(), 3);
        // Labeled with the window end dates, ascending.
        assert_eq!(rolling[0].date, date(2024, 10, 31));
        assert_eq!(rolling[2].date, date(2024, 12, 31));
        assert!(rolling.iter().all(|p| p.rolling_return.is_some()));
    }
}
