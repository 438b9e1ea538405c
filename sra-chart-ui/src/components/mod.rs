//! Reusable Dioxus RSX components for the atlas dashboards.

mod chart_container;
mod chart_header;
mod checkbox_list;
mod error_display;
mod loading_spinner;
mod map_panel;
mod prediction_form;
mod selectors;
mod station_info;
mod summary_table;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use checkbox_list::CheckboxList;
pub use error_display::{ErrorDisplay, PanelStatus};
pub use loading_spinner::LoadingSpinner;
pub use map_panel::MapPanel;
pub use prediction_form::PredictionForm;
pub use selectors::{
    CompareParamSelector, CompareStationSelector, ParameterSelector, StationSelector,
    SummaryParamSelector, YearSelector, YearTarget,
};
pub use station_info::StationInfoPanel;
pub use summary_table::SummaryTableView;
