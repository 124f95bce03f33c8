use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar value carried by a source column that has no dedicated field on
/// [`Fund`]. The source mixes text, integer and floating-point columns, so the
/// original cell type is preserved instead of stringifying everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Classifies a raw cell into the narrowest scalar that represents it:
    /// integer first, then float, then text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return AttributeValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return AttributeValue::Number(f);
            }
        }
        AttributeValue::Text(trimmed.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Number(f) => Some(*f),
            AttributeValue::Text(_) => None,
        }
    }
}

/// A fund's static attributes, one record per retained source row.
///
/// The columns the API surfaces directly are first-class optional fields; any
/// other static column from the source lands in `extra` keyed by its original
/// header. `fund_id` is the 1-based row index after filtering and is only
/// stable within a single parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub fund_id: u32,
    pub fund_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_fee: Option<f64>,
    /// Source columns with no dedicated field, keyed by original header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, AttributeValue>,
}

impl Fund {
    pub fn new(fund_id: u32, fund_name: impl Into<String>) -> Self {
        Self {
            fund_id,
            fund_name: fund_name.into(),
            isin: None,
            firm_name: None,
            category: None,
            sector: None,
            investment_area: None,
            rating: None,
            management_fee: None,
            performance_fee: None,
            extra: BTreeMap::new(),
        }
    }
}

/// One monthly return observation in long format.
///
/// `monthly_return` is a percentage (e.g. `2.5` means +2.5%), exactly as it
/// appears in the source. Observations are unique per `(fund_id, date)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    pub fund_id: u32,
    pub date: NaiveDate,
    pub monthly_return: f64,
}
