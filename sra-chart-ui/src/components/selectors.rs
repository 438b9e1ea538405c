//! Station, parameter and year selectors.
//!
//! Each selector updates its own signal straight away so the widget
//! reflects the choice, then hands the change to the dashboard's event
//! loop which refetches or redraws.

use super::CheckboxList;
use crate::state::{UiEvent, UiState};
use dioxus::prelude::*;
use sra_engine::DashboardConfig;

const LABEL_STYLE: &str = "font-weight: bold; margin-right: 8px;";

/// Station dropdown for the detail view, or for the prediction form.
#[component]
pub fn StationSelector(#[props(default = false)] prediction: bool) -> Element {
    let mut state = use_context::<UiState>();
    let events = use_coroutine_handle::<UiEvent>();
    let stations = state.stations.read().clone();
    let selected = if prediction {
        (state.prediction_station)()
    } else {
        (state.selected_station)()
    };
    let id = if prediction {
        "prediction-station-select"
    } else {
        "station-select"
    };

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        if prediction {
            state.prediction_station.set(Some(value.clone()));
            events.send(UiEvent::PredictionStation(value));
        } else {
            state.selected_station.set(Some(value.clone()));
            events.send(UiEvent::SelectStation(value));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{id}",
                style: LABEL_STYLE,
                "Station: "
            }
            select {
                id: "{id}",
                onchange: on_change,
                for station in stations.iter() {
                    option {
                        value: "{station}",
                        selected: selected.as_deref() == Some(station.as_str()),
                        "{station}"
                    }
                }
            }
        }
    }
}

/// Which view a year selector drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearTarget {
    Details,
    Comparison,
}

/// Year dropdown with an "All years" entry mapped to `None`.
#[component]
pub fn YearSelector(target: YearTarget) -> Element {
    let mut state = use_context::<UiState>();
    let config = use_context::<DashboardConfig>();
    let events = use_coroutine_handle::<UiEvent>();
    let current = match target {
        YearTarget::Details => (state.detail_year)(),
        YearTarget::Comparison => (state.compare_year)(),
    };
    let id = match target {
        YearTarget::Details => "year-select",
        YearTarget::Comparison => "compare-year-select",
    };

    let on_change = move |evt: Event<FormData>| {
        let year = evt.value().parse::<i32>().ok();
        match target {
            YearTarget::Details => {
                state.detail_year.set(year);
                events.send(UiEvent::SelectYear(year));
            }
            YearTarget::Comparison => {
                state.compare_year.set(year);
                events.send(UiEvent::CompareYear(year));
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{id}",
                style: LABEL_STYLE,
                "Year: "
            }
            select {
                id: "{id}",
                onchange: on_change,
                option {
                    value: "",
                    selected: current.is_none(),
                    "All years"
                }
                for year in config.known_years.iter().copied() {
                    option {
                        value: "{year}",
                        selected: current == Some(year),
                        "{year}"
                    }
                }
            }
        }
    }
}

/// Parameters drawn in the monthly/yearly chart.
#[component]
pub fn ParameterSelector() -> Element {
    let mut state = use_context::<UiState>();
    let events = use_coroutine_handle::<UiEvent>();
    let options = state.parameters.read().clone();
    let selected = state.selected_parameters.read().clone();

    rsx! {
        CheckboxList {
            id: "parameter-select".to_string(),
            label: "Parameters".to_string(),
            options,
            selected,
            on_change: move |params: Vec<String>| {
                state.selected_parameters.set(params.clone());
                events.send(UiEvent::SelectParameters(params));
            },
        }
    }
}

#[component]
pub fn CompareStationSelector() -> Element {
    let mut state = use_context::<UiState>();
    let events = use_coroutine_handle::<UiEvent>();
    let options = state.stations.read().clone();
    let selected = state.compare_stations.read().clone();

    rsx! {
        CheckboxList {
            id: "compare-station-select".to_string(),
            label: "Stations".to_string(),
            options,
            selected,
            on_change: move |stations: Vec<String>| {
                state.compare_stations.set(stations.clone());
                events.send(UiEvent::CompareStations(stations));
            },
        }
    }
}

#[component]
pub fn CompareParamSelector() -> Element {
    let mut state = use_context::<UiState>();
    let events = use_coroutine_handle::<UiEvent>();
    let options = state.compare_params.read().clone();
    let selected = state.selected_compare_params.read().clone();

    rsx! {
        CheckboxList {
            id: "compare-param-select".to_string(),
            label: "Parameters".to_string(),
            options,
            selected,
            on_change: move |params: Vec<String>| {
                state.selected_compare_params.set(params.clone());
                events.send(UiEvent::CompareParams(params));
            },
        }
    }
}

/// Picks the parameter the summary table shows.
#[component]
pub fn SummaryParamSelector() -> Element {
    let mut state = use_context::<UiState>();
    let events = use_coroutine_handle::<UiEvent>();
    let params = state.summary_params.read().clone();
    let selected = (state.summary_param)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.summary_param.set(Some(value.clone()));
        events.send(UiEvent::SummaryParam(value));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "summary-param-select",
                style: LABEL_STYLE,
                "Summary of: "
            }
            select {
                id: "summary-param-select".to_string(),
                onchange: on_change,
                for param in params.iter() {
                    option {
                        value: "{param}",
                        selected: selected.as_deref() == Some(param.as_str()),
                        "{param}"
                    }
                }
            }
        }
    }
}
