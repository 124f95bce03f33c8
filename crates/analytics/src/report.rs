use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Converts a computed value into an explicit absence when it is not a real
/// number. This is the system-wide sanitization boundary: NaN and infinities never
/// cross into a result struct, so serialization can never leak a float
/// sentinel to callers.
pub fn sanitize(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Returns over the standard reporting windows, in percent.
///
/// A window is `None` when the series has fewer observations than the window
/// length (insufficient history) or the computation degenerated to a
/// non-finite value. `itd` is always computed over the full history; `ytd` is
/// filled in by callers that want it alongside the fixed windows, mirroring
/// how the bundle is assembled for the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodReturns {
    #[serde(rename = "1M")]
    pub one_month: Option<f64>,
    #[serde(rename = "3M")]
    pub three_months: Option<f64>,
    #[serde(rename = "6M")]
    pub six_months: Option<f64>,
    #[serde(rename = "1Y")]
    pub one_year: Option<f64>,
    #[serde(rename = "3Y")]
    pub three_years: Option<f64>,
    #[serde(rename = "5Y")]
    pub five_years: Option<f64>,
    #[serde(rename = "10Y")]
    pub ten_years: Option<f64>,
    #[serde(rename = "ITD")]
    pub inception_to_date: Option<f64>,
    #[serde(rename = "YTD")]
    pub year_to_date: Option<f64>,
}

/// One point of the running compounded return path, in percent relative to
/// inception.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative_return: f64,
}

/// One point of a rolling-window return series. `rolling_return` is `None`
/// when the window's annualization degenerated (the window itself always has
/// enough observations by construction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub rolling_return: Option<f64>,
}

/// One point of the drawdown path: percentage distance of the wealth index
/// from its running peak. Always <= 0; exactly 0 at a new high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub date: NaiveDate,
    pub drawdown: f64,
}

/// The worst drawdown episode of a series.
///
/// `recovery_date` stays `None` while the drawdown has not healed by the end
/// of the series. `duration_months` counts peak-to-trough only; recovery time is
/// deliberately excluded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaxDrawdown {
    pub max_drawdown: f64,
    pub peak_date: Option<NaiveDate>,
    pub trough_date: Option<NaiveDate>,
    pub recovery_date: Option<NaiveDate>,
    pub duration_months: u32,
}

/// The comprehensive per-fund risk bundle served by the risk endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub volatility: Option<f64>,
    pub downside_deviation: Option<f64>,
    pub best_month: Option<f64>,
    pub worst_month: Option<f64>,
    pub positive_months: usize,
    pub negative_months: usize,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    #[serde(flatten)]
    pub drawdown: MaxDrawdown,
}

/// A symmetric cross-fund correlation matrix.
///
/// `matrix[i][j]` is the Pearson correlation between funds `i` and `j` in
/// `fund_names` order; `None` marks an undefined pair (no overlapping dates,
/// or zero variance on either side). The diagonal is always 1.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub fund_names: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}
