//! Minimal dashboard: station markers and a six-field prediction form
//! prefilled from the selected station's means.

use dioxus::prelude::*;
use sra_dashboard::AtlasDashboard;
use sra_engine::Variant;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("atlas-minimal-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AtlasDashboard { variant: Variant::Minimal }
    }
}
