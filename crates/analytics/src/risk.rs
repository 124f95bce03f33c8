//! Dispersion, drawdown and cross-fund correlation calculations.

use crate::performance::{annualized_return, cumulative_returns, PERIODS_PER_YEAR};
use crate::report::{sanitize, CorrelationMatrix, DrawdownPoint, MaxDrawdown, RiskMetrics};
use core_types::ReturnSeries;
use std::collections::{BTreeSet, HashMap};

/// The wealth index starts at 100 so drawdowns read directly as percentages.
const WEALTH_BASE: f64 = 100.0;

/// Sample standard deviation of the returns, annualized by sqrt(12) when asked.
/// Fewer than two observations carry no dispersion information and yield 0.0.
pub fn volatility(values: &[f64], annualize: bool) -> f64 {
    let Some(std_dev) = sample_std_dev(values) else {
        return 0.0;
    };
    if annualize {
        std_dev * f64::from(PERIODS_PER_YEAR).sqrt()
    } else {
        std_dev
    }
}

/// Standard deviation of the negative observations only (semi-deviation).
/// Fewer than two negative values yield 0.0; same annualization as
/// [`volatility`].
pub fn downside_deviation(values: &[f64], annualize: bool) -> f64 {
    let negative: Vec<f64> = values.iter().copied().filter(|v| *v < 0.0).collect();
    volatility(&negative, annualize)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / (n - 1) as f64;
    Some(variance.sqrt())
}

/// The drawdown path of a series: wealth index `100 * (1 + cumulative/100)`
/// against its running maximum, in percent. Every value is <= 0 and a new high
/// reads exactly 0.
pub fn drawdown_series(series: &ReturnSeries) -> Vec<DrawdownPoint> {
    let mut running_max = f64::MIN;
    cumulative_returns(series)
        .into_iter()
        .map(|point| {
            let wealth = WEALTH_BASE * (1.0 + point.cumulative_return / 100.0);
            if wealth > running_max {
                running_max = wealth;
            }
            DrawdownPoint {
                date: point.date,
                drawdown: (wealth - running_max) / running_max * 100.0,
            }
        })
        .collect()
}

/// Locates the worst drawdown episode.
///
/// The trough is the first occurrence of the minimum drawdown. The peak is the
/// most recent index at or before the trough where the drawdown was exactly 0,
/// falling back to the series' first date when the series never stood at a
/// high before the trough. Recovery is the first return to 0 at or after the
/// trough; a series still under water reports `None`.
pub fn max_drawdown(series: &ReturnSeries) -> MaxDrawdown {
    let drawdowns = drawdown_series(series);
    if drawdowns.is_empty() {
        return MaxDrawdown::default();
    }

    // First occurrence of the minimum, matching how the trough is reported.
    let mut trough_index = 0;
    for (index, point) in drawdowns.iter().enumerate() {
        if point.drawdown < drawdowns[trough_index].drawdown {
            trough_index = index;
        }
    }
    let trough = &drawdowns[trough_index];

    let peak_index = drawdowns[..=trough_index]
        .iter()
        .rposition(|p| p.drawdown == 0.0)
        .unwrap_or(0);

    let recovery_date = drawdowns[trough_index..]
        .iter()
        .find(|p| p.drawdown == 0.0)
        .map(|p| p.date);

    MaxDrawdown {
        max_drawdown: trough.drawdown,
        peak_date: Some(drawdowns[peak_index].date),
        trough_date: Some(trough.date),
        recovery_date,
        duration_months: (trough_index - peak_index) as u32,
    }
}

/// Annualized excess return over annualized volatility.
///
/// The excess return subtracts one twelfth of the annual risk-free rate from
/// each monthly observation; the denominator is the volatility of the RAW
/// returns. Degenerate inputs (fewer than two observations, zero volatility)
/// yield 0.0.
pub fn sharpe_ratio(values: &[f64], risk_free_annual: f64) -> f64 {
    risk_adjusted_ratio(values, risk_free_annual, volatility(values, true))
}

/// Like [`sharpe_ratio`] but penalizing only downside dispersion.
pub fn sortino_ratio(values: &[f64], risk_free_annual: f64) -> f64 {
    risk_adjusted_ratio(values, risk_free_annual, downside_deviation(values, true))
}

fn risk_adjusted_ratio(values: &[f64], risk_free_annual: f64, denominator: f64) -> f64 {
    if values.len() < 2 || denominator == 0.0 {
        return 0.0;
    }
    let excess: Vec<f64> = values
        .iter()
        .map(|r| r - risk_free_annual / f64::from(PERIODS_PER_YEAR))
        .collect();
    annualized_return(&excess, PERIODS_PER_YEAR) / denominator
}

/// The full per-fund risk bundle: dispersion, monthly extremes and counts,
/// risk-adjusted ratios and the worst drawdown episode.
pub fn risk_metrics(series: &ReturnSeries, risk_free_annual: f64) -> RiskMetrics {
    let values = series.values();
    let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst = values.iter().copied().fold(f64::INFINITY, f64::min);

    RiskMetrics {
        volatility: sanitize(volatility(&values, true)),
        downside_deviation: sanitize(downside_deviation(&values, true)),
        best_month: sanitize(best),
        worst_month: sanitize(worst),
        positive_months: values.iter().filter(|v| **v > 0.0).count(),
        negative_months: values.iter().filter(|v| **v < 0.0).count(),
        sharpe_ratio: sanitize(sharpe_ratio(&values, risk_free_annual)),
        sortino_ratio: sanitize(sortino_ratio(&values, risk_free_annual)),
        drawdown: max_drawdown(series),
    }
}

/// Pairwise Pearson correlation across funds, aligned on the union of all
/// observation dates.
///
/// Each pair is correlated over the dates where BOTH series have a value;
/// missing dates are explicit absences, never zeros. A pair with fewer than
/// two overlapping dates, or with zero variance on either side, is undefined
/// and reported as `None`. The diagonal is 1.0 by construction.
pub fn correlation_matrix(named_series: &[(String, ReturnSeries)]) -> CorrelationMatrix {
    let union: BTreeSet<_> = named_series
        .iter()
        .flat_map(|(_, series)| series.points().iter().map(|p| p.date))
        .collect();

    // One aligned column per fund over the date union.
    let columns: Vec<Vec<Option<f64>>> = named_series
        .iter()
        .map(|(_, series)| {
            let by_date: HashMap<_, _> = series
                .points()
                .iter()
                .map(|p| (p.date, p.value))
                .collect();
            union.iter().map(|date| by_date.get(date).copied()).collect()
        })
        .collect();

    let n = named_series.len();
    let mut matrix = vec![vec![None; n]; n];
    for i in 0..n {
        matrix[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let value = pearson_overlapping(&columns[i], &columns[j]);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }

    CorrelationMatrix {
        fund_names: named_series.iter().map(|(name, _)| name.clone()).collect(),
        matrix,
    }
}

/// Pearson correlation over the positions where both aligned columns have a
/// value.
fn pearson_overlapping(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    sanitize(cov / (var_x.sqrt() * var_y.sqrt()))
}
