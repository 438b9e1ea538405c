//! Application state.
//!
//! One owner for everything the pipelines read or write. Handlers take a
//! short borrow, never across an `.await`.

use crate::config::DashboardConfig;
use crate::details::DetailsLoaded;
use crate::generation::Generations;
use crate::map::MapLayers;
use sra_core::comparison::ComparisonResult;
use sra_core::thresholds::Thresholds;
use std::collections::BTreeMap;

/// Current user selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub station: Option<String>,
    pub detail_params: Vec<String>,
    /// `None` is the all-years aggregate.
    pub detail_year: Option<i32>,
    /// Order decides trace colours.
    pub compare_stations: Vec<String>,
    pub compare_params: Vec<String>,
    pub compare_year: Option<i32>,
    pub summary_param: Option<String>,
    pub prediction_station: Option<String>,
}

/// The last successful comparison together with the selection it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedComparison {
    pub stations: Vec<String>,
    pub params: Vec<String>,
    pub year: Option<i32>,
    pub result: ComparisonResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Raw prediction form input keyed by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: BTreeMap<String, String>,
    pub status: PredictionStatus,
}

impl FormState {
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub stations: Vec<String>,
    pub thresholds: Thresholds,
    pub map: MapLayers,
    pub selection: Selection,
    pub detail: Option<DetailsLoaded>,
    pub comparison: Option<CachedComparison>,
    pub summary_params: Vec<String>,
    pub form: FormState,
    pub generations: Generations,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            stations: Vec::new(),
            thresholds: config.default_thresholds,
            map: MapLayers::default(),
            selection: Selection::default(),
            detail: None,
            comparison: None,
            summary_params: Vec::new(),
            form: FormState::default(),
            generations: Generations::default(),
        }
    }
}
