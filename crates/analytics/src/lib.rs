//! # Fundscope Analytics Engine
//!
//! This crate derives performance and risk statistics from monthly return
//! series. It acts as the "unbiased judge" of the system: every number the API
//! serves about a fund's behavior is computed here.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** every function takes a `ReturnSeries` (or raw
//!   values) and returns a fresh result struct. Nothing is cached, nothing is
//!   mutated, so calls are trivially repeatable and easy to test.
//! - **Degenerate inputs are values, not errors:** an empty series compounds
//!   to 0.0, a too-short window reports `None`, and fewer than two
//!   observations collapse the dispersion metrics to 0.0. Callers never have
//!   to catch anything here.
//! - **No NaN leaks:** any non-finite intermediate is converted to an explicit
//!   `None` before it reaches a result struct boundary.
//!
//! ## Public API
//!
//! - `performance`: compounding, period/rolling/calendar-year/YTD returns.
//! - `risk`: volatility, downside deviation, drawdown episodes,
//!   Sharpe/Sortino, cross-fund correlation.
//! - `report`: the standardized result structs consumed by the web layer.

pub mod performance;
pub mod report;
pub mod risk;

// Re-export the key components to create a clean, public-facing API.
pub use performance::{
    annualized_return, calendar_year_returns, cumulative_returns, period_returns,
    rolling_returns, total_return, ytd_return, PERIODS_PER_YEAR,
};
pub use report::{
    sanitize, CorrelationMatrix, CumulativePoint, DrawdownPoint, MaxDrawdown, PeriodReturns,
    RiskMetrics, RollingPoint,
};
pub use risk::{
    correlation_matrix, downside_deviation, drawdown_series, max_drawdown, risk_metrics,
    sharpe_ratio, sortino_ratio, volatility,
};
