//! Orchestration engine for the solar resource atlas dashboard.
//!
//! User selections go in, render commands come out. The engine owns the
//! application state, issues backend requests through [`sra_core::backend::Backend`],
//! derives secondary aggregates and discards responses that a newer request
//! has superseded. It never touches the DOM, so every pipeline runs natively
//! under test.
//!
//! - `config`: per-variant dashboard configuration
//! - `state`: the single-owner application state
//! - `generation`: request generation tokens
//! - `render`: render commands consumed by the UI and the CLI
//! - `dashboard`: the [`Dashboard`] handle and startup
//! - `map`, `directory`, `details`, `comparison`, `prediction`: the pipelines

pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod details;
pub mod directory;
pub mod generation;
pub mod map;
pub mod prediction;
pub mod render;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{DashboardConfig, Variant};
pub use dashboard::Dashboard;
pub use render::{MapCommand, RenderCommand};
