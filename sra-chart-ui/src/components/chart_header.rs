//! Section header component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Optional one-line explanation under the title
    #[props(default = String::new())]
    pub description: String,
}

/// Header for dashboard sections showing title and optional description.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.description.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.description}"
                }
            }
        }
    }
}
