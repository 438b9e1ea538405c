//! Comparison Engine and Summary Statistics Table.

use crate::dashboard::Dashboard;
use crate::generation::Channel;
use crate::render::{ChartSpec, Panel, RenderCommand, SummaryRow, SummaryTable, Trace, TraceKind};
use crate::state::CachedComparison;
use log::{error, warn};
use sra_core::backend::Backend;
use sra_core::comparison::{ComparisonRequest, ComparisonResult, Stat};
use sra_data::numbers::format_stat;

fn comparison_charts(
    result: &ComparisonResult,
    stations: &[String],
    params: &[String],
    color: impl Fn(usize) -> String,
) -> Vec<ChartSpec> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let traces = stations
                .iter()
                .enumerate()
                .map(|(j, station)| {
                    let (x, y) = match result.series(station, param) {
                        Some((dates, values)) => (dates.to_vec(), values.to_vec()),
                        None => {
                            warn!("Comparison has no {} series for {}", param, station);
                            (Vec::new(), Vec::new())
                        }
                    };
                    Trace {
                        name: station.clone(),
                        kind: TraceKind::Line,
                        x,
                        y,
                        color: color(j),
                    }
                })
                .collect();
            ChartSpec {
                container: format!("comparison-chart-{i}"),
                title: format!("{param} Comparison Across Stations"),
                x_title: "Date".to_string(),
                y_title: param.clone(),
                traces,
            }
        })
        .collect()
}

fn summary_table(cached: &CachedComparison, param: &str) -> SummaryTable {
    let headers = std::iter::once("Station".to_string())
        .chain(Stat::ALL.iter().map(|stat| format!("{param} {}", stat.title())))
        .collect();
    let rows = cached
        .stations
        .iter()
        .map(|station| SummaryRow {
            station: station.clone(),
            cells: Stat::ALL
                .iter()
                .map(|stat| format_stat(cached.result.summary_stats.get(param, *stat, station)))
                .collect(),
        })
        .collect();
    SummaryTable {
        parameter: param.to_string(),
        headers,
        rows,
    }
}

impl<B: Backend> Dashboard<B> {
    /// Request one combined comparison and render a chart per parameter.
    ///
    /// Either list empty: placeholder, no request. Any new request drops
    /// the cached result first so the summary table cannot pair it with
    /// the new selection.
    pub async fn compare(
        &self,
        stations: Vec<String>,
        params: Vec<String>,
        year: Option<i32>,
    ) -> Vec<RenderCommand> {
        self.with_state(|state| {
            state.selection.compare_stations = stations.clone();
            state.selection.compare_params = params.clone();
            state.selection.compare_year = year;
            state.comparison = None;
        });
        if stations.is_empty() || params.is_empty() {
            self.invalidate(Channel::Comparison);
            return vec![RenderCommand::placeholder(
                Panel::Comparison,
                "Please select stations and parameters",
            )];
        }

        let ticket = self.issue(Channel::Comparison);
        let request = ComparisonRequest::new(&stations, &params, year);
        let result = self.backend().compare(&request).await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                error!("Comparison failed: {}", e);
                return vec![RenderCommand::error(
                    Panel::Comparison,
                    format!("Error loading comparison: {e}"),
                )];
            }
        };

        let charts = comparison_charts(&result, &stations, &params, |j| {
            self.config().color(j).to_string()
        });
        self.with_state(|state| {
            state.comparison = Some(CachedComparison {
                stations,
                params,
                year,
                result,
            });
        });

        let mut commands = vec![
            RenderCommand::ClearStatus {
                panel: Panel::Comparison,
            },
            RenderCommand::ComparisonCharts { charts },
        ];
        commands.extend(self.render_summary_table());
        commands
    }

    pub async fn select_compare_stations(&self, stations: Vec<String>) -> Vec<RenderCommand> {
        let (params, year) = self.with_state(|state| {
            (
                state.selection.compare_params.clone(),
                state.selection.compare_year,
            )
        });
        self.compare(stations, params, year).await
    }

    pub async fn select_compare_params(&self, params: Vec<String>) -> Vec<RenderCommand> {
        let (stations, year) = self.with_state(|state| {
            (
                state.selection.compare_stations.clone(),
                state.selection.compare_year,
            )
        });
        self.compare(stations, params, year).await
    }

    pub async fn select_compare_year(&self, year: Option<i32>) -> Vec<RenderCommand> {
        let (stations, params) = self.with_state(|state| {
            (
                state.selection.compare_stations.clone(),
                state.selection.compare_params.clone(),
            )
        });
        self.compare(stations, params, year).await
    }

    /// Render the summary for the selected summary parameter from the
    /// cached comparison only. Nothing cached means nothing to render.
    pub fn render_summary_table(&self) -> Vec<RenderCommand> {
        let state = self.state();
        let Some(cached) = state.comparison.as_ref() else {
            return Vec::new();
        };
        let Some(param) = state.selection.summary_param.as_deref() else {
            return Vec::new();
        };
        vec![RenderCommand::SummaryTable(summary_table(cached, param))]
    }

    pub fn select_summary_param(&self, param: &str) -> Vec<RenderCommand> {
        self.with_state(|state| state.selection.summary_param = Some(param.to_string()));
        self.render_summary_table()
    }
}
