use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::Fund;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct FundListParams {
    pub category: Option<String>,
    pub sector: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize {
    100
}

/// The key fields shown in the fund list, a condensed view of [`Fund`].
#[derive(Debug, Serialize)]
pub struct FundListItem {
    pub fund_id: u32,
    pub fund_name: String,
    pub isin: Option<String>,
    pub firm_name: Option<String>,
    pub category: Option<String>,
    pub sector: Option<String>,
    pub rating: Option<i64>,
    pub management_fee: Option<f64>,
}

impl From<&Fund> for FundListItem {
    fn from(fund: &Fund) -> Self {
        Self {
            fund_id: fund.fund_id,
            fund_name: fund.fund_name.clone(),
            isin: fund.isin.clone(),
            firm_name: fund.firm_name.clone(),
            category: fund.category.clone(),
            sector: fund.sector.clone(),
            rating: fund.rating,
            management_fee: fund.management_fee,
        }
    }
}

/// # GET /api/funds
/// Lists funds with optional category/sector/search filters and pagination.
pub async fn list_funds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FundListParams>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;

    let search_lower = params.search.as_ref().map(|s| s.to_lowercase());
    let matching: Vec<&Fund> = dataset
        .funds()
        .iter()
        .filter(|f| match &params.category {
            Some(category) => f.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|f| match &params.sector {
            Some(sector) => f.sector.as_deref() == Some(sector.as_str()),
            None => true,
        })
        .filter(|f| match &search_lower {
            Some(needle) => f.fund_name.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    let total = matching.len();
    let page: Vec<FundListItem> = matching
        .into_iter()
        .skip(params.skip)
        .take(params.limit)
        .map(FundListItem::from)
        .collect();

    Ok(Json(json!({ "total": total, "funds": page })))
}

/// A fund's full static record plus its inception date.
#[derive(Debug, Serialize)]
pub struct FundDetail {
    #[serde(flatten)]
    pub fund: Fund,
    pub inception_date: Option<NaiveDate>,
}

/// # GET /api/funds/:fund_id
/// Full static detail for a single fund.
pub async fn fund_detail(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<u32>,
) -> Result<Json<FundDetail>, AppError> {
    let dataset = state.repo.require_snapshot()?;
    let fund = dataset.fund(fund_id)?.clone();
    let inception_date = dataset.inception_date(fund_id);
    Ok(Json(FundDetail { fund, inception_date }))
}

#[derive(Debug, Deserialize)]
pub struct CompareFundsRequest {
    pub fund_ids: Vec<u32>,
}

/// # POST /api/funds/compare
/// Side-by-side static attributes for a selection of funds. Unknown ids are
/// skipped; an entirely unknown selection is a 404.
pub async fn compare_funds(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareFundsRequest>,
) -> Result<Json<Value>, AppError> {
    let dataset = state.repo.require_snapshot()?;

    let selected: Vec<&Fund> = dataset
        .funds()
        .iter()
        .filter(|f| request.fund_ids.contains(&f.fund_id))
        .collect();

    if selected.is_empty() {
        return Err(AppError::NotFound(
            "No funds found with provided IDs".to_string(),
        ));
    }

    Ok(Json(json!({ "funds": selected })))
}
