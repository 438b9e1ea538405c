//! Station Detail Fetcher and the monthly/yearly chart renderer.

use crate::dashboard::Dashboard;
use crate::generation::Channel;
use crate::render::{ChartSpec, Panel, RenderCommand, Trace, TraceKind};
use futures::future::try_join_all;
use log::{error, warn};
use sra_core::backend::Backend;
use sra_core::detail::{MonthlyData, StationDetail, MONTHS_PER_YEAR};
use sra_data::aggregation::yearly_averages;

const CHART_CONTAINER: &str = "monthlyChart";
const DETAIL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A station detail snapshot, as delivered to the chart renderer and the
/// station-means autofill.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsLoaded {
    pub station: String,
    pub year: Option<i32>,
    pub detail: StationDetail,
}

/// A bar and a trend line per parameter, the i-th parameter coloured by
/// the i-th palette entry.
fn bar_and_trend(
    parameter: &str,
    color: &str,
    x: &[String],
    values: Vec<Option<f64>>,
) -> [Trace; 2] {
    [
        Trace {
            name: parameter.to_string(),
            kind: TraceKind::Bar,
            x: x.to_vec(),
            y: values.clone(),
            color: color.to_string(),
        },
        Trace {
            name: format!("{parameter} trend"),
            kind: TraceKind::Line,
            x: x.to_vec(),
            y: values,
            color: color.to_string(),
        },
    ]
}

impl<B: Backend> Dashboard<B> {
    fn detail_chart(
        &self,
        station: &str,
        year: i32,
        monthly: &MonthlyData,
        params: &[String],
    ) -> ChartSpec {
        let traces = params
            .iter()
            .enumerate()
            .flat_map(|(i, parameter)| {
                let values = match monthly.values(parameter) {
                    Some(values) => values.to_vec(),
                    None => {
                        warn!("{} has no monthly {} data for {}", station, parameter, year);
                        vec![None; MONTHS_PER_YEAR]
                    }
                };
                bar_and_trend(parameter, self.config().color(i), &monthly.months, values)
            })
            .collect();
        ChartSpec {
            container: CHART_CONTAINER.to_string(),
            title: format!("Monthly Data for {station} ({year})"),
            x_title: "Month".to_string(),
            y_title: "Value".to_string(),
            traces,
        }
    }

    fn yearly_chart(
        &self,
        station: &str,
        per_year: &[(i32, MonthlyData)],
        params: &[String],
    ) -> ChartSpec {
        let averages = yearly_averages(per_year, params);
        let years: Vec<String> = averages.years.iter().map(i32::to_string).collect();
        let traces = averages
            .series
            .into_iter()
            .enumerate()
            .flat_map(|(i, series)| {
                bar_and_trend(&series.parameter, self.config().color(i), &years, series.values)
            })
            .collect();
        ChartSpec {
            container: CHART_CONTAINER.to_string(),
            title: format!("Yearly Averages for {station}"),
            x_title: "Year".to_string(),
            y_title: "Value".to_string(),
            traces,
        }
    }

    /// Fetch one station's snapshot, update the info panel and parameter
    /// select, then draw the chart for its first parameter.
    pub async fn show_details(&self, station: &str) -> Vec<RenderCommand> {
        self.show_details_with_params(station, Vec::new()).await
    }

    /// Like [`Dashboard::show_details`], but charts `params` instead of the
    /// first parameter. An empty list means the first parameter.
    pub async fn show_details_with_params(
        &self,
        station: &str,
        params: Vec<String>,
    ) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::Details);
        let year = self.with_state(|state| {
            state.selection.station = Some(station.to_string());
            state.selection.detail_year
        });
        let result = self.backend().station_details(station, year).await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        let detail = match result {
            Ok(detail) => detail,
            Err(e) => {
                error!("Failed to load details for {}: {}", station, e);
                return vec![RenderCommand::error(
                    Panel::StationDetails,
                    format!("Error loading details for {station}: {e}"),
                )];
            }
        };

        let parameters = detail.monthly.parameters();
        let selected: Vec<String> = if params.is_empty() {
            parameters.first().cloned().into_iter().collect()
        } else {
            params
        };
        let mut commands = vec![
            RenderCommand::ClearStatus {
                panel: Panel::StationDetails,
            },
            RenderCommand::StationInfo {
                station: station.to_string(),
                latitude: detail.latitude,
                longitude: detail.longitude,
                date: detail.date.map(|d| d.format(DETAIL_DATE_FORMAT).to_string()),
            },
            RenderCommand::ParameterOptions {
                parameters,
                selected: selected.clone(),
            },
        ];
        self.with_state(|state| {
            state.selection.detail_params = selected;
            state.detail = Some(DetailsLoaded {
                station: station.to_string(),
                year,
                detail,
            });
        });

        commands.extend(self.render_chart().await);
        commands
    }

    pub async fn select_station(&self, station: &str) -> Vec<RenderCommand> {
        self.show_details(station).await
    }

    pub async fn select_parameters(&self, params: Vec<String>) -> Vec<RenderCommand> {
        self.with_state(|state| state.selection.detail_params = params);
        self.render_chart().await
    }

    pub async fn select_year(&self, year: Option<i32>) -> Vec<RenderCommand> {
        self.with_state(|state| state.selection.detail_year = year);
        self.render_chart().await
    }

    /// Draw the selected parameters of the selected station.
    ///
    /// With a year: the twelve monthly values, reusing the loaded snapshot
    /// when it is for that year. Without: one request per known year, all
    /// of which must succeed, reduced to yearly means.
    pub async fn render_chart(&self) -> Vec<RenderCommand> {
        let (station, params, year, cached) = self.with_state(|state| {
            let selection = &state.selection;
            let cached = state
                .detail
                .as_ref()
                .filter(|d| Some(&d.station) == selection.station.as_ref() && d.year.is_some())
                .filter(|d| d.year == selection.detail_year)
                .map(|d| d.detail.monthly.clone());
            (
                selection.station.clone(),
                selection.detail_params.clone(),
                selection.detail_year,
                cached,
            )
        });
        let Some(station) = station else {
            return Vec::new();
        };
        if params.is_empty() {
            self.invalidate(Channel::Chart);
            return vec![RenderCommand::placeholder(
                Panel::MonthlyChart,
                "Please select at least one parameter",
            )];
        }

        let ticket = self.issue(Channel::Chart);
        let chart = match year {
            Some(year) => {
                let monthly = match cached {
                    Some(monthly) => Ok(monthly),
                    None => self
                        .backend()
                        .station_details(&station, Some(year))
                        .await
                        .map(|detail| detail.monthly),
                };
                monthly.map(|monthly| self.detail_chart(&station, year, &monthly, &params))
            }
            None => {
                let backend = self.backend();
                let station = station.as_str();
                let fetches = self.config().known_years.iter().map(|&year| async move {
                    let detail = backend.station_details(station, Some(year)).await?;
                    Ok::<_, sra_core::error::ApiError>((year, detail.monthly))
                });
                try_join_all(fetches)
                    .await
                    .map(|per_year| self.yearly_chart(station, &per_year, &params))
            }
        };
        if !self.accept(ticket) {
            return Vec::new();
        }

        match chart {
            Ok(chart) => vec![
                RenderCommand::ClearStatus {
                    panel: Panel::MonthlyChart,
                },
                RenderCommand::Chart(chart),
            ],
            Err(e) => {
                error!("Failed to load chart data for {}: {}", station, e);
                vec![RenderCommand::error(
                    Panel::MonthlyChart,
                    format!("Error loading chart data: {e}"),
                )]
            }
        }
    }
}
