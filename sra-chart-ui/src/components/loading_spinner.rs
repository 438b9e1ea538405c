//! Loading indicator component.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(#[props(default = "Loading stations...".to_string())] message: String) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{message}"
        }
    }
}
