use crate::structs::ReturnObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single `(date, monthly_return %)` pair within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The ordered monthly return history of one fund.
///
/// This is the shared input to every performance and risk calculation. Points
/// are sorted ascending by date at construction, so downstream code can rely
/// on chronological order without re-sorting. The series makes no claim about
/// cadence: gaps are carried as-is and annualization assumes 12 periods per
/// year regardless.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Builds a series from raw points, sorting them by date.
    pub fn from_points(mut points: Vec<ReturnPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Builds a series from long-format observations (e.g. one fund's slice of
    /// the normalized return table).
    pub fn from_observations<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a ReturnObservation>,
    {
        let points = observations
            .into_iter()
            .map(|obs| ReturnPoint {
                date: obs.date,
                value: obs.monthly_return,
            })
            .collect();
        Self::from_points(points)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The points in ascending date order.
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// The raw return values in ascending date order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// The inception date, i.e. the earliest observation.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// The most recent observation date.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// A sub-series restricted to `start..=end` (either bound optional).
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReturnSeries {
        let points = self
            .points
            .iter()
            .filter(|p| start.is_none_or(|s| p.date >= s))
            .filter(|p| end.is_none_or(|e| p.date <= e))
            .copied()
            .collect();
        // Already sorted; filtering preserves order.
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_points_sorts_by_date() {
        let series = ReturnSeries::from_points(vec![
            ReturnPoint { date: date(2024, 3, 31), value: 2.0 },
            ReturnPoint { date: date(2024, 1, 31), value: 5.0 },
            ReturnPoint { date: date(2024, 2, 29), value: -3.0 },
        ]);
        assert_eq!(series.values(), vec![5.0, -3.0, 2.0]);
        assert_eq!(series.first_date(), Some(date(2024, 1, 31)));
        assert_eq!(series.latest_date(), Some(date(2024, 3, 31)));
    }

    #[test]
    fn between_applies_inclusive_bounds() {
        let series = ReturnSeries::from_points(vec![
            ReturnPoint { date: date(2024, 1, 31), value: 1.0 },
            ReturnPoint { date: date(2024, 2, 29), value: 2.0 },
            ReturnPoint { date: date(2024, 3, 31), value: 3.0 },
        ]);
        let clipped = series.between(Some(date(2024, 2, 29)), Some(date(2024, 3, 31)));
        assert_eq!(clipped.values(), vec![2.0, 3.0]);
        let open_ended = series.between(Some(date(2024, 2, 1)), None);
        assert_eq!(open_ended.len(), 2);
    }

    #[test]
    fn empty_series_has_no_dates() {
        let series = ReturnSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.latest_date(), None);
    }
}
