use crate::{error::AppError, AppState};
use analytics::{drawdown_series, risk_metrics};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Months, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RiskParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub risk_free_rate: Option<f64>,
}

/// # GET /api/risk/:fund_id
/// The comprehensive risk bundle: dispersion, monthly extremes, Sharpe and
/// Sortino, and the worst drawdown episode. `risk_free_rate` is annual, in
/// percent, defaulting from configuration.
pub async fn fund_risk(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
    Query(params): Query<RiskParams>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?;
    let series = dataset.returns_for_fund(fund_id, params.start_date, params.end_date)?;

    let risk_free = params
        .risk_free_rate
        .unwrap_or(state.settings.analytics.risk_free_rate);

    Ok(Json(json!({
        "fund_id": fund.fund_id,
        "fund_name": fund.fund_name,
        "period": {
            "start_date": series.first_date(),
            "end_date": series.latest_date(),
        },
        "risk_metrics": risk_metrics(&series, risk_free),
    })))
}

/// # GET /api/risk/:fund_id/drawdown
/// The drawdown time series for charting.
pub async fn fund_drawdown(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
    Query(params): Query<super::DateRangeParams>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?;
    let series = dataset.returns_for_fund(fund_id, params.start_date, params.end_date)?;

    Ok(Json(json!({
        "fund_id": fund.fund_id,
        "fund_name": fund.fund_name,
        "drawdown_series": drawdown_series(&series),
    })))
}

#[derive(Debug, Deserialize)]
pub struct CorrelationRequest {
    pub fund_ids: Vec<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Trailing lookback applied only when no explicit date range is given.
    pub months: Option<u32>,
}

/// # POST /api/risk/correlation-matrix
/// Pairwise Pearson correlation across the selected funds' monthly returns,
/// served as a nested name-to-name mapping with nulls for undefined pairs.
pub async fn correlation_matrix(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CorrelationRequest>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let months = request
        .months
        .unwrap_or(state.settings.analytics.correlation_months);

    let mut named_series = Vec::new();
    for fund_id in &request.fund_ids {
        let Ok(fund) = dataset.fund(*fund_id) else {
            continue;
        };
        let Ok(mut series) =
            dataset.returns_for_fund(*fund_id, request.start_date, request.end_date)
        else {
            continue;
        };

        // With no explicit range, clip to the trailing `months` window ending
        // at the fund's own latest observation.
        if request.start_date.is_none() && request.end_date.is_none() && months > 0 {
            if let Some(cutoff) = series
                .latest_date()
                .and_then(|latest| latest.checked_sub_months(Months::new(months)))
            {
                series = series.between(Some(cutoff), None);
            }
        }

        named_series.push((fund.fund_name.clone(), series));
    }

    if named_series.len() < 2 {
        return Ok(Json(json!({
            "correlation_matrix": {},
            "fund_names": [],
        })));
    }

    let result = analytics::correlation_matrix(&named_series);

    // Nested name-to-name mapping, preserving request order.
    let mut nested = Map::new();
    for (i, row_name) in result.fund_names.iter().enumerate() {
        let mut row = Map::new();
        for (j, col_name) in result.fund_names.iter().enumerate() {
            row.insert(col_name.clone(), json!(result.matrix[i][j]));
        }
        nested.insert(row_name.clone(), Value::Object(row));
    }

    Ok(Json(json!({
        "correlation_matrix": nested,
        "fund_names": result.fund_names,
    })))
}
