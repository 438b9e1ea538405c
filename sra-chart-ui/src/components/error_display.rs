//! Inline status messages.

use crate::state::UiState;
use dioxus::prelude::*;
use sra_engine::render::{Panel, StatusLevel};

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[props(default = StatusLevel::Error)]
    pub level: StatusLevel,
}

/// Displays a status message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let (style, prefix) = match props.level {
        StatusLevel::Error => (
            "background: #FFEBEE; color: #C62828; border: 1px solid #EF9A9A;",
            "Error: ",
        ),
        StatusLevel::Warning => (
            "background: #FFF8E1; color: #8D6E00; border: 1px solid #FFE082;",
            "Warning: ",
        ),
    };
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; border-radius: 4px; {style}",
            strong { "{prefix}" }
            "{props.message}"
        }
    }
}

/// The current status message of one panel, if any.
#[component]
pub fn PanelStatus(panel: Panel) -> Element {
    let state = use_context::<UiState>();
    match state.status(panel) {
        Some((level, message)) => rsx! {
            ErrorDisplay { message, level }
        },
        None => rsx! {},
    }
}
