//! # Fundscope Ingest
//!
//! This crate turns an uploaded fund export into the canonical tables the rest
//! of the system works with. It is the only component that understands the
//! source's layout quirks: the preamble above the real headers, the two-level
//! header (a blank first header marks a static attribute column, a date string
//! marks a month column), and the sentinel rows the source uses as section
//! dividers rather than fund names.
//!
//! ## Architectural Principles
//!
//! - **All-or-nothing:** a structural defect anywhere in the source (missing
//!   name column, unparsable date header, a non-numeric return cell) aborts
//!   the whole ingestion. No partially-normalized dataset ever escapes.
//! - **Lockstep filtering:** the same row filter drives both the fund table
//!   and the return extraction, so `fund_id`s always join cleanly.
//!
//! ## Public API
//!
//! - `RawTable` / `read_raw_table`: the positional cell grid and its CSV
//!   front-end.
//! - `NormalizerOptions` / `normalize`: the two-header-table normalizer.
//! - `IngestError`: the specific error types that can be returned from this
//!   crate.

pub mod error;
pub mod normalizer;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use error::IngestError;
pub use normalizer::{normalize, NormalizerOptions};
pub use table::{read_raw_table, RawTable};
