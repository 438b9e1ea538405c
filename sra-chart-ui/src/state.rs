//! UI state managed via Dioxus context.
//!
//! `UiState` bundles the reactive signals the components render from. The
//! engine never touches it directly: its render commands are applied here
//! by [`UiState::apply`]. User input goes the other way as [`UiEvent`]s
//! sent to the dashboard's event coroutine.

use crate::js_bridge;
use dioxus::prelude::*;
use sra_engine::map::RenderMode;
use sra_engine::render::{AlertLevel, Panel, StatusLevel, SummaryTable};
use sra_engine::{MapCommand, RenderCommand};
use std::collections::{BTreeMap, HashMap};

/// Everything a component can ask the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SelectStation(String),
    SelectParameters(Vec<String>),
    SelectYear(Option<i32>),
    CompareStations(Vec<String>),
    CompareParams(Vec<String>),
    CompareYear(Option<i32>),
    SummaryParam(String),
    PredictionStation(String),
    SetField { field: String, value: String },
    SubmitPrediction,
    ToggleRenderMode,
    MarkerHover { station: String, entered: bool },
    MarkerClick(String),
    TileError,
}

impl UiEvent {
    /// Translate a Leaflet callback into an event.
    pub fn from_map(kind: &str, station: String) -> Option<Self> {
        match kind {
            "hover_in" => Some(UiEvent::MarkerHover {
                station,
                entered: true,
            }),
            "hover_out" => Some(UiEvent::MarkerHover {
                station,
                entered: false,
            }),
            "click" => Some(UiEvent::MarkerClick(station)),
            "tile_error" => Some(UiEvent::TileError),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationInfoView {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: Option<String>,
}

/// Shared UI state for both dashboard variants.
#[derive(Clone, Copy)]
pub struct UiState {
    pub stations: Signal<Vec<String>>,
    pub selected_station: Signal<Option<String>>,
    pub prediction_station: Signal<Option<String>>,
    pub compare_stations: Signal<Vec<String>>,
    pub parameters: Signal<Vec<String>>,
    pub selected_parameters: Signal<Vec<String>>,
    pub compare_params: Signal<Vec<String>>,
    pub selected_compare_params: Signal<Vec<String>>,
    pub summary_params: Signal<Vec<String>>,
    pub summary_param: Signal<Option<String>>,
    pub detail_year: Signal<Option<i32>>,
    pub compare_year: Signal<Option<i32>>,
    pub station_info: Signal<Option<StationInfoView>>,
    /// DOM ids of the comparison charts currently drawn.
    pub comparison_charts: Signal<Vec<String>>,
    pub summary: Signal<Option<SummaryTable>>,
    pub placeholders: Signal<HashMap<Panel, String>>,
    pub statuses: Signal<HashMap<Panel, (StatusLevel, String)>>,
    pub form_values: Signal<BTreeMap<String, String>>,
    pub submitting: Signal<bool>,
    pub prediction_result: Signal<Option<(AlertLevel, String)>>,
    pub render_mode: Signal<RenderMode>,
    /// Whether the station list has arrived.
    pub loading: Signal<bool>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            stations: Signal::new(Vec::new()),
            selected_station: Signal::new(None),
            prediction_station: Signal::new(None),
            compare_stations: Signal::new(Vec::new()),
            parameters: Signal::new(Vec::new()),
            selected_parameters: Signal::new(Vec::new()),
            compare_params: Signal::new(Vec::new()),
            selected_compare_params: Signal::new(Vec::new()),
            summary_params: Signal::new(Vec::new()),
            summary_param: Signal::new(None),
            detail_year: Signal::new(None),
            compare_year: Signal::new(None),
            station_info: Signal::new(None),
            comparison_charts: Signal::new(Vec::new()),
            summary: Signal::new(None),
            placeholders: Signal::new(HashMap::new()),
            statuses: Signal::new(HashMap::new()),
            form_values: Signal::new(BTreeMap::new()),
            submitting: Signal::new(false),
            prediction_result: Signal::new(None),
            render_mode: Signal::new(RenderMode::Markers),
            loading: Signal::new(true),
        }
    }

    pub fn status(&self, panel: Panel) -> Option<(StatusLevel, String)> {
        self.statuses.read().get(&panel).cloned()
    }

    pub fn placeholder(&self, panel: Panel) -> Option<String> {
        self.placeholders.read().get(&panel).cloned()
    }

    /// Apply engine output in order.
    pub fn apply(&mut self, commands: Vec<RenderCommand>) {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::StationOptions { stations, selected } => {
                self.stations.set(stations);
                self.selected_station.set(selected.clone());
                self.prediction_station.set(selected);
                self.loading.set(false);
            }
            RenderCommand::ParameterOptions {
                parameters,
                selected,
            } => {
                self.parameters.set(parameters);
                self.selected_parameters.set(selected);
            }
            RenderCommand::CompareParamOptions {
                parameters,
                selected,
            } => {
                self.compare_params.set(parameters);
                self.selected_compare_params.set(selected);
            }
            RenderCommand::SummaryParamOptions {
                parameters,
                selected,
            } => {
                self.summary_params.set(parameters);
                self.summary_param.set(selected);
            }
            RenderCommand::StationInfo {
                station,
                latitude,
                longitude,
                date,
            } => {
                self.station_info.set(Some(StationInfoView {
                    station,
                    latitude,
                    longitude,
                    date,
                }));
            }
            RenderCommand::Chart(spec) => {
                self.placeholders.write().remove(&Panel::MonthlyChart);
                js_bridge::render_chart(&spec);
            }
            RenderCommand::ComparisonCharts { charts } => {
                self.placeholders.write().remove(&Panel::Comparison);
                self.comparison_charts
                    .set(charts.iter().map(|c| c.container.clone()).collect());
                for chart in &charts {
                    js_bridge::render_chart(chart);
                }
            }
            RenderCommand::SummaryTable(table) => self.summary.set(Some(table)),
            RenderCommand::Placeholder { panel, message } => {
                match panel {
                    Panel::MonthlyChart => js_bridge::clear_chart(panel.container_id()),
                    Panel::Comparison => self.comparison_charts.set(Vec::new()),
                    _ => {}
                }
                self.placeholders.write().insert(panel, message);
            }
            RenderCommand::Status {
                panel,
                level,
                message,
            } => {
                if panel == Panel::Prediction {
                    self.submitting.set(false);
                }
                self.statuses.write().insert(panel, (level, message));
            }
            RenderCommand::ClearStatus { panel } => {
                self.statuses.write().remove(&panel);
            }
            RenderCommand::Map(command) => self.apply_map(command),
            RenderCommand::FormValues { values } => {
                let mut form = self.form_values.write();
                for value in values {
                    form.insert(value.field, value.value);
                }
            }
            RenderCommand::PredictionSubmitting => {
                self.submitting.set(true);
                self.prediction_result.set(None);
                self.statuses.write().remove(&Panel::Prediction);
            }
            RenderCommand::PredictionResult { level, message } => {
                self.submitting.set(false);
                self.prediction_result.set(Some((level, message)));
            }
        }
    }

    fn apply_map(&mut self, command: MapCommand) {
        match &command {
            MapCommand::FocusStation { station } => {
                self.selected_station.set(Some(station.clone()));
                return;
            }
            MapCommand::AttachLayer { layer } => self.render_mode.set(*layer),
            _ => {}
        }
        js_bridge::map_command(&command);
    }
}
