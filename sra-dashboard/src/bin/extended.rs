//! Extended dashboard: GHI classification circles, the 21-feature model
//! form prefilled from dataset averages, and classified predictions.

use dioxus::prelude::*;
use sra_dashboard::AtlasDashboard;
use sra_engine::Variant;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("atlas-extended-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AtlasDashboard { variant: Variant::Extended }
    }
}
