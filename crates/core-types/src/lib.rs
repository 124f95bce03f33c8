//! # Fundscope Core Types
//!
//! This crate defines the fundamental data structures shared across the entire
//! system: the fund records and monthly return observations produced by
//! ingestion, and the `ReturnSeries` abstraction every calculator consumes.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate sits at the bottom of the dependency graph. It
//!   knows nothing about parsing, storage, or HTTP; it only defines data.
//! - **Immutable by convention:** A `ReturnSeries` is sorted once at
//!   construction and handed around by reference. Derived series (cumulative,
//!   drawdown, rolling) are computed on demand and never written back.
//!
//! ## Public API
//!
//! - `Fund`: a fund's static attributes as parsed from the source table.
//! - `AttributeValue`: the heterogeneous scalar carried by unrecognized
//!   source columns.
//! - `ReturnObservation`: one `(fund_id, date, monthly_return)` record.
//! - `ReturnSeries` / `ReturnPoint`: the ordered per-fund series.

pub mod series;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use series::{ReturnPoint, ReturnSeries};
pub use structs::{AttributeValue, Fund, ReturnObservation};
