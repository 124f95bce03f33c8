use crate::error::StoreError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Fund, ReturnObservation, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// The fully-normalized contents of one uploaded source.
///
/// Built once per ingestion and immutable afterwards. The per-fund series
/// index is precomputed so lookups do not rescan the long-format return table
/// on every request.
#[derive(Debug, Clone)]
pub struct Dataset {
    funds: Vec<Fund>,
    series_by_fund: HashMap<u32, ReturnSeries>,
    distinct_dates: usize,
    date_range: Option<DateRange>,
    uploaded_at: DateTime<Utc>,
}

/// First and last observation date across the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The shape served by the data-status endpoint after an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_funds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub total_periods: usize,
    pub upload_timestamp: DateTime<Utc>,
}

impl Dataset {
    /// Assembles a dataset from the normalizer's output, stamping it with the
    /// ingestion time.
    pub fn build(funds: Vec<Fund>, observations: Vec<ReturnObservation>) -> Self {
        let mut points_by_fund: HashMap<u32, Vec<&ReturnObservation>> = HashMap::new();
        for obs in &observations {
            points_by_fund.entry(obs.fund_id).or_default().push(obs);
        }
        let series_by_fund = points_by_fund
            .into_iter()
            .map(|(fund_id, obs)| (fund_id, ReturnSeries::from_observations(obs)))
            .collect();

        let dates: BTreeSet<NaiveDate> = observations.iter().map(|o| o.date).collect();
        let date_range = match (dates.first(), dates.last()) {
            (Some(start), Some(end)) => Some(DateRange { start: *start, end: *end }),
            _ => None,
        };

        Self {
            funds,
            series_by_fund,
            distinct_dates: dates.len(),
            date_range,
            uploaded_at: Utc::now(),
        }
    }

    /// All funds in `fund_id` order.
    pub fn funds(&self) -> &[Fund] {
        &self.funds
    }

    pub fn fund(&self, fund_id: u32) -> Result<&Fund, StoreError> {
        self.funds
            .iter()
            .find(|f| f.fund_id == fund_id)
            .ok_or(StoreError::FundNotFound(fund_id))
    }

    /// The fund's return series clipped to `start..=end` (either bound
    /// optional). A fund that exists but has nothing in the range is an
    /// `EmptyRange`, reported distinctly from an unknown fund.
    pub fn returns_for_fund(
        &self,
        fund_id: u32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ReturnSeries, StoreError> {
        self.fund(fund_id)?;

        let clipped = self
            .series_by_fund
            .get(&fund_id)
            .map(|series| series.between(start, end))
            .unwrap_or_default();

        if clipped.is_empty() {
            return Err(StoreError::EmptyRange { fund_id });
        }
        Ok(clipped)
    }

    /// The fund's inception date, if it has any observations at all.
    pub fn inception_date(&self, fund_id: u32) -> Option<NaiveDate> {
        self.series_by_fund
            .get(&fund_id)
            .and_then(|series| series.first_date())
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_funds: self.funds.len(),
            date_range: self.date_range,
            total_periods: self.distinct_dates,
            upload_timestamp: self.uploaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(fund_id: u32, date: NaiveDate, value: f64) -> ReturnObservation {
        ReturnObservation { fund_id, date, monthly_return: value }
    }

    fn sample() -> Dataset {
        Dataset::build(
            vec![Fund::new(1, "Alpha"), Fund::new(2, "Beta")],
            vec![
                obs(1, date(2024, 1, 31), 1.0),
                obs(1, date(2024, 2, 29), 2.0),
                obs(2, date(2024, 2, 29), -1.0),
            ],
        )
    }

    #[test]
    fn lookup_distinguishes_unknown_fund_from_empty_range() {
        let dataset = sample();
        assert_eq!(
            dataset.returns_for_fund(9, None, None).unwrap_err(),
            StoreError::FundNotFound(9)
        );
        assert_eq!(
            dataset
                .returns_for_fund(1, Some(date(2025, 1, 1)), None)
                .unwrap_err(),
            StoreError::EmptyRange { fund_id: 1 }
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let dataset = sample();
        let series = dataset
            .returns_for_fund(1, Some(date(2024, 2, 29)), Some(date(2024, 2, 29)))
            .unwrap();
        assert_eq!(series.values(), vec![2.0]);
    }

    #[test]
    fn fund_without_observations_is_an_empty_range() {
        let dataset = Dataset::build(vec![Fund::new(1, "Alpha")], Vec::new());
        assert_eq!(
            dataset.returns_for_fund(1, None, None).unwrap_err(),
            StoreError::EmptyRange { fund_id: 1 }
        );
        assert_eq!(dataset.inception_date(1), None);
    }

    #[test]
    fn summary_reports_range_and_distinct_periods() {
        let summary = sample().summary();
        assert_eq!(summary.total_funds, 2);
        assert_eq!(summary.total_periods, 2);
        assert_eq!(
            summary.date_range,
            Some(DateRange { start: date(2024, 1, 31), end: date(2024, 2, 29) })
        );
    }
}
