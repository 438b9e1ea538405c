//! Core types and backend contracts for the solar resource atlas dashboard.
//!
//! Every endpoint the dashboard talks to has an explicit response type in
//! this crate, parsed and validated at the boundary:
//! - `station`: station directory and map-data records
//! - `thresholds`: GHI classification bounds
//! - `detail`: per-station monthly snapshot
//! - `comparison`: multi-station series and summary statistics
//! - `prediction`: feature sets, predict and average-value responses
//! - `backend`: the async [`backend::Backend`] trait the engine is written against
//! - `client` (feature `api`): reqwest implementation of `Backend`

pub mod backend;
pub mod comparison;
pub mod detail;
pub mod error;
pub mod prediction;
pub mod station;
pub mod thresholds;

#[cfg(feature = "api")]
pub mod client;
