use crate::handlers::DateRangeParams;
use crate::{error::AppError, AppState};
use analytics::cumulative_returns;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// One row of the returns table: the monthly observation and the compounded
/// path value at that date.
#[derive(Debug, Serialize)]
pub struct ReturnRow {
    pub date: NaiveDate,
    pub monthly_return: f64,
    pub cumulative_return: f64,
}

/// Pairs each observation with its cumulative value. Both sequences share the
/// series' ascending date order, so they zip positionally.
fn return_rows(series: &ReturnSeries) -> Vec<ReturnRow> {
    series
        .points()
        .iter()
        .zip(cumulative_returns(series))
        .map(|(point, cumulative)| ReturnRow {
            date: point.date,
            monthly_return: point.value,
            cumulative_return: cumulative.cumulative_return,
        })
        .collect()
}

/// # GET /api/returns/:fund_id
/// Monthly returns with the cumulative path, optionally clipped to a range.
pub async fn fund_returns(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?;
    let series = dataset.returns_for_fund(fund_id, range.start_date, range.end_date)?;

    let rows = return_rows(&series);

    Ok(Json(json!({
        "fund_id": fund.fund_id,
        "fund_name": fund.fund_name,
        "returns": rows,
        "start_date": series.first_date(),
        "end_date": series.latest_date(),
        "total_periods": series.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct MultipleReturnsRequest {
    pub fund_ids: Vec<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// # POST /api/returns/multiple
/// Returns for a selection of funds. Funds that are unknown or have no data
/// in the range are skipped rather than failing the whole request.
pub async fn multiple_returns(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultipleReturnsRequest>,
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
            "returns": return_rows(&series),
        }));
    }

    Ok(Json(json!({
        "funds": funds,
        "start_date": request.start_date,
        "end_date": request.end_date,
    })))
}
