//! Dioxus components and Plotly/Leaflet bridge for the atlas dashboards.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Plotly and Leaflet glue via `js_sys::eval()`
//! - `state`: reactive `UiState` with Dioxus Signals, fed by engine render commands
//! - `components`: reusable RSX components (selectors, panels, form, map)

pub mod components;
pub mod js_bridge;
pub mod state;
