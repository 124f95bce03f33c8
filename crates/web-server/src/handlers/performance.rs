use crate::handlers::DateRangeParams;
use crate::{error::AppError, AppState};
use analytics::{period_returns, rolling_returns as rolling, ytd_return, PeriodReturns};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::ReturnSeries;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// The period bundle with YTD filled in, as served by every performance
/// endpoint.
fn performance_bundle(series: &ReturnSeries) -> PeriodReturns {
    let mut bundle = period_returns(series);
    bundle.year_to_date = ytd_return(series);
    bundle
}

/// # GET /api/performance/:fund_id
/// Period returns over the standard windows (1M through 10Y, ITD, YTD).
pub async fn fund_performance(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?;
    let series = dataset.returns_for_fund(fund_id, range.start_date, range.end_date)?;

    Ok(Json(json!({
        "fund_id": fund.fund_id,
        "fund_name": fund.fund_name,
        "as_of_date": series.latest_date(),
        "inception_date": series.first_date(),
        "performance": performance_bundle(&series),
    })))
}

/// # GET /api/performance/:fund_id/calendar-years
/// Total return per calendar year, partial years unadjusted.
pub async fn calendar_years(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?;
    let series = dataset.returns_for_fund(fund_id, None, None)?;

    Ok(Json(json!({
        "fund_id": fund.fund_id,
        "fund_name": fund.fund_name,
        "calendar_year_returns": analytics::calendar_year_returns(&series),
    })))
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub fund_ids: Vec<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// # POST /api/performance/compare
/// The period bundle for each requested fund; unknown or empty funds are
/// skipped.
pub async fn compare_performance(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;

    let mut funds = Vec::new();
    for fund_id in &request.fund_ids {
        let Ok(fund) = dataset.fund(*fund_id) else {
            continue;
        };
        let Ok(series) =
            dataset.returns_for_fund(*fund_id, request.start_date, request.end_date)
        else {
            continue;
        };

        funds.push(json!({
            "fund_id": fund.fund_id,
            "fund_name": fund.fund_name,
            "performance": performance_bundle(&series),
            "inception_date": series.first_date(),
        }));
    }

    Ok(Json(json!({
        "funds": funds,
        "as_of_date": request.end_date,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RollingReturnsRequest {
    pub fund_ids: Vec<u32>,
    pub window_months: Option<usize>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// # POST /api/performance/rolling-returns
/// Trailing-window annualized returns for each requested fund. The window
/// defaults from configuration (12 months).
pub async fn rolling_returns(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RollingReturnsRequest>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let window_months = request
        .window_months
        .unwrap_or(state.settings.analytics.rolling_window_months);
    if window_months == 0 {
        return Err(AppError::BadRequest(
            "window_months must be at least 1".to_string(),
        ));
    }

    let mut funds = Vec::new();
    for fund_id in &request.fund_ids {
        let Ok(fund) = dataset.fund(*fund_id) else {
            continue;
        };
        let Ok(series) =
            dataset.returns_for_fund(*fund_id, request.start_date, request.end_date)
        else {
            continue;
        };

        funds.push(json!({
            "fund_id": fund.fund_id,
            "fund_name": fund.fund_name,
            "rolling_returns": rolling(&series, window_months),
        }));
    }

    Ok(Json(json!({
        "funds": funds,
        "window_months": window_months,
    })))
}
