//! Solar resource atlas dashboard.
//!
//! Both binaries render [`AtlasDashboard`]; they differ only in the
//! [`Variant`] they pass, which selects the `DashboardConfig`.
//!
//! Data flow:
//! 1. On mount the Plotly/Leaflet bridges are evaluated, the map is created
//!    and every startup loader is spawned on its own so each panel fills in
//!    as soon as its response arrives.
//! 2. Components send `UiEvent`s to the event coroutine.
//! 3. Each event runs the matching engine pipeline in its own task; the
//!    resulting render commands are applied to `UiState`, which updates
//!    the signals and calls into the JS bridge.

use dioxus::prelude::*;
use futures::StreamExt;
use sra_chart_ui::components::{
    ChartContainer, ChartHeader, CompareParamSelector, CompareStationSelector, LoadingSpinner,
    MapPanel, PanelStatus, ParameterSelector, PredictionForm, StationInfoPanel, StationSelector,
    SummaryParamSelector, SummaryTableView, YearSelector, YearTarget,
};
use sra_chart_ui::js_bridge;
use sra_chart_ui::state::{UiEvent, UiState};
use sra_core::backend::Backend;
use sra_core::client::HttpBackend;
use sra_engine::render::Panel;
use sra_engine::{Dashboard, DashboardConfig, RenderCommand, Variant};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.7.1/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.7.1/dist/leaflet.css";

const SECTION_STYLE: &str =
    "margin: 16px 0; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;";

/// Backend origin: the page is served by the same server as the API.
fn base_url() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Run the engine pipeline behind one UI event.
///
/// The browser app routes `SubmitPrediction` through [`handle_event`]
/// instead, so the "submitting" state shows before the request goes out.
pub async fn dispatch<B: Backend>(dashboard: &Dashboard<B>, event: UiEvent) -> Vec<RenderCommand> {
    match event {
        UiEvent::SelectStation(station) => dashboard.select_station(&station).await,
        UiEvent::SelectParameters(params) => dashboard.select_parameters(params).await,
        UiEvent::SelectYear(year) => dashboard.select_year(year).await,
        UiEvent::CompareStations(stations) => dashboard.select_compare_stations(stations).await,
        UiEvent::CompareParams(params) => dashboard.select_compare_params(params).await,
        UiEvent::CompareYear(year) => dashboard.select_compare_year(year).await,
        UiEvent::SummaryParam(param) => dashboard.select_summary_param(&param),
        UiEvent::PredictionStation(station) => dashboard.select_prediction_station(&station).await,
        UiEvent::SetField { field, value } => {
            dashboard.set_field(&field, value);
            Vec::new()
        }
        UiEvent::SubmitPrediction => dashboard.submit_prediction().await,
        UiEvent::ToggleRenderMode => dashboard.toggle_render_mode(),
        UiEvent::MarkerHover { station, entered } => dashboard.hover_marker(&station, entered),
        UiEvent::MarkerClick(station) => dashboard.click_marker(&station).await,
        UiEvent::TileError => dashboard.tile_error(),
    }
}

fn handle_event(dashboard: Dashboard<HttpBackend>, mut ui: UiState, event: UiEvent) {
    if event == UiEvent::SubmitPrediction {
        match dashboard.prepare_prediction() {
            Ok((pending, submitting)) => {
                ui.apply(vec![submitting]);
                spawn(async move {
                    ui.apply(dashboard.send_prediction(pending).await);
                });
            }
            Err(invalid) => ui.apply(vec![invalid]),
        }
        return;
    }
    spawn(async move {
        let commands = dispatch(&dashboard, event).await;
        ui.apply(commands);
    });
}

/// Spawn the startup loaders separately; each applies its own commands
/// before its follow-up starts.
fn start(dashboard: &Dashboard<HttpBackend>, ui: UiState) {
    for loader in dashboard.config().startup_loaders() {
        let dashboard = dashboard.clone();
        let mut ui = ui;
        spawn(async move {
            ui.apply(dashboard.run_loader(loader).await);
            if let Some(next) = loader.follow_up() {
                ui.apply(dashboard.run_loader(next).await);
            }
        });
    }
}

#[component]
pub fn AtlasDashboard(variant: Variant) -> Element {
    let config = use_context_provider(|| DashboardConfig::for_variant(variant));
    let mut ui = use_context_provider(UiState::new);
    let dashboard = use_hook({
        let config = config.clone();
        move || Dashboard::new(HttpBackend::new(base_url()), config)
    });

    let events = use_coroutine({
        let dashboard = dashboard.clone();
        move |mut rx: UnboundedReceiver<UiEvent>| {
            let dashboard = dashboard.clone();
            async move {
                while let Some(event) = rx.next().await {
                    log::debug!("UI event: {:?}", event);
                    handle_event(dashboard.clone(), ui, event);
                }
            }
        }
    });

    use_hook(move || {
        js_bridge::init_bridges();
        let config = dashboard.config();
        js_bridge::init_map(config.map_center, config.map_zoom);
        js_bridge::register_map_events(move |kind, station| {
            match UiEvent::from_map(&kind, station) {
                Some(event) => events.send(event),
                None => log::warn!("Unknown map event: {}", kind),
            }
        });
        ui.apply(dashboard.init_map());
        start(&dashboard, ui);
    });

    let title = match variant {
        Variant::Minimal => "Solar Resource Atlas",
        Variant::Extended => "Solar Resource Atlas (Extended)",
    };
    let chart_placeholder = ui.placeholder(Panel::MonthlyChart).unwrap_or_default();
    let comparison_placeholder = ui.placeholder(Panel::Comparison);
    let comparison_charts = ui.comparison_charts.read().clone();

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        document::Script { src: PLOTLY_JS }

        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h2 { "{title}" }

            section {
                style: SECTION_STYLE,
                ChartHeader { title: "Station Map".to_string() }
                MapPanel {}
            }

            section {
                style: SECTION_STYLE,
                ChartHeader {
                    title: "Station Details".to_string(),
                    description: "Monthly values for one year, or yearly averages across all years".to_string(),
                }
                if (ui.loading)() {
                    LoadingSpinner {}
                } else {
                    div {
                        style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-start;",
                        StationSelector {}
                        YearSelector { target: YearTarget::Details }
                        ParameterSelector {}
                    }
                }
                StationInfoPanel {}
                PanelStatus { panel: Panel::MonthlyChart }
                ChartContainer {
                    id: Panel::MonthlyChart.container_id().to_string(),
                    placeholder: chart_placeholder,
                    min_height: 450,
                }
            }

            section {
                style: SECTION_STYLE,
                ChartHeader { title: "Station Comparison".to_string() }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-start;",
                    CompareStationSelector {}
                    CompareParamSelector {}
                    YearSelector { target: YearTarget::Comparison }
                }
                PanelStatus { panel: Panel::Comparison }
                div {
                    id: Panel::Comparison.container_id(),
                    if let Some(message) = comparison_placeholder {
                        p { style: "color: #666;", "{message}" }
                    }
                    for id in comparison_charts {
                        ChartContainer {
                            key: "{id}",
                            id: id.clone(),
                            min_height: 400,
                        }
                    }
                }
                SummaryParamSelector {}
                SummaryTableView {}
            }

            section {
                style: SECTION_STYLE,
                ChartHeader { title: "GHI Prediction".to_string() }
                PredictionForm {}
            }
        }
    }
}
