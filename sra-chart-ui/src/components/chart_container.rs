//! Chart container component with placeholder text.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id Plotly renders into
    pub id: String,
    /// Message shown instead of the chart, empty when there is none
    #[props(default = String::new())]
    pub placeholder: String,
    #[props(default = 400)]
    pub min_height: u32,
}

/// A container div for Plotly charts.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if !props.placeholder.is_empty() {
                p {
                    style: "color: #666; margin: 8px 0;",
                    "{props.placeholder}"
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
