//! # Fundscope Datastore
//!
//! This crate holds the one dataset the system operates on. It is the
//! in-memory replacement for a database: ingestion produces a complete
//! `Dataset`, the repository swaps it in atomically, and every reader works
//! off an immutable snapshot.
//!
//! ## Architectural Principles
//!
//! - **Replace, never mutate:** a new upload wholesale-replaces the previous
//!   dataset. There is no merge, no append, and no versioning; the last
//!   writer wins.
//! - **Snapshot reads:** `DatasetRepository::snapshot` hands out an
//!   `Arc<Dataset>`, so a request that reads several tables sees one
//!   consistent dataset even while a concurrent upload replaces the current
//!   one mid-flight.
//!
//! ## Public API
//!
//! - `Dataset`: the immutable funds + returns tables with a per-fund series
//!   index.
//! - `DatasetRepository`: the shared, cloneable handle with
//!   `replace`/`clear`/`snapshot`.
//! - `DatasetSummary`: the shape served by the data-status endpoint.
//! - `StoreError`: the specific error types that can be returned from this
//!   crate.

pub mod dataset;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use dataset::{Dataset, DatasetSummary, DateRange};
pub use error::StoreError;
pub use repository::DatasetRepository;
