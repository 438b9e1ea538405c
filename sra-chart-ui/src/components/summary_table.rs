//! Per-station mean/min/max/std table for one parameter.

use super::ChartHeader;
use crate::state::UiState;
use dioxus::prelude::*;

#[component]
pub fn SummaryTableView() -> Element {
    let state = use_context::<UiState>();
    let summary = (state.summary)();

    rsx! {
        div {
            id: "summaryStats",
            if let Some(summary) = summary {
                ChartHeader { title: format!("Summary Statistics: {}", summary.parameter) }
                table {
                    style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                    thead {
                        tr {
                            for header in summary.headers.iter() {
                                th {
                                    style: "text-align: left; border-bottom: 2px solid #ccc; padding: 4px 8px;",
                                    "{header}"
                                }
                            }
                        }
                    }
                    tbody {
                        for row in summary.rows.iter() {
                            tr {
                                key: "{row.station}",
                                td { style: "padding: 4px 8px; border-bottom: 1px solid #eee;", "{row.station}" }
                                for cell in row.cells.iter() {
                                    td { style: "padding: 4px 8px; border-bottom: 1px solid #eee;", "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
