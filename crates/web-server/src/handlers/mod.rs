//! Request handlers, grouped the way the API is grouped: upload/lifecycle,
//! fund table, raw returns, performance and risk.

pub mod funds;
pub mod performance;
pub mod returns;
pub mod risk;
pub mod upload;

use chrono::NaiveDate;
use serde::Deserialize;

/// The optional date-range filter shared by every per-fund endpoint.
/// Dates are ISO `YYYY-MM-DD`; bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
