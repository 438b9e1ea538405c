//! Location and timestamp of the selected station.

use super::PanelStatus;
use crate::state::UiState;
use dioxus::prelude::*;
use sra_engine::render::Panel;

#[component]
pub fn StationInfoPanel() -> Element {
    let state = use_context::<UiState>();
    let info = (state.station_info)();

    rsx! {
        div {
            id: "stationDetails",
            style: "margin: 8px 0; font-size: 14px;",
            PanelStatus { panel: Panel::StationDetails }
            if let Some(info) = info {
                h4 { style: "margin: 0 0 4px 0;", "{info.station}" }
                p { style: "margin: 2px 0;", "Latitude: {info.latitude}" }
                p { style: "margin: 2px 0;", "Longitude: {info.longitude}" }
                if let Some(date) = info.date {
                    p { style: "margin: 2px 0;", "Date: {date}" }
                }
            }
        }
    }
}
