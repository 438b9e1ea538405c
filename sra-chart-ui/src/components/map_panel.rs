//! Leaflet map container and the marker/circle toggle.

use super::PanelStatus;
use crate::js_bridge::MAP_CONTAINER_ID;
use crate::state::{UiEvent, UiState};
use dioxus::prelude::*;
use sra_engine::map::RenderMode;
use sra_engine::render::Panel;
use sra_engine::DashboardConfig;

#[component]
pub fn MapPanel(#[props(default = 500)] height: u32) -> Element {
    let state = use_context::<UiState>();
    let config = use_context::<DashboardConfig>();
    let events = use_coroutine_handle::<UiEvent>();
    let toggle_label = match (state.render_mode)().other() {
        RenderMode::Markers => "Show markers",
        RenderMode::Circles => "Show classification circles",
    };
    let style = format!("height: {height}px; width: 100%; border-radius: 4px;");

    rsx! {
        PanelStatus { panel: Panel::Map }
        if config.classify_map {
            button {
                id: "toggle-render-mode",
                style: "margin-bottom: 8px; padding: 4px 12px;",
                onclick: move |_| events.send(UiEvent::ToggleRenderMode),
                "{toggle_label}"
            }
        }
        div {
            id: MAP_CONTAINER_ID,
            style: "{style}",
        }
    }
}
