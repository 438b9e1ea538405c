//! Plain-text rendering of engine render commands.

use sra_data::numbers::format_stat;
use sra_engine::render::{ChartSpec, StatusLevel, SummaryTable};
use sra_engine::{MapCommand, RenderCommand};

/// Lines describing one command. Commands with nothing to show for a
/// terminal (status clears, the submitting marker) produce no lines.
pub fn describe(command: &RenderCommand) -> Vec<String> {
    match command {
        RenderCommand::StationOptions { stations, selected } => {
            let mut lines = vec![format!("Stations ({}):", stations.len())];
            lines.extend(stations.iter().map(|s| {
                let mark = if selected.as_ref() == Some(s) { "*" } else { " " };
                format!(" {mark} {s}")
            }));
            lines
        }
        RenderCommand::ParameterOptions { parameters, .. } => {
            vec![format!("Parameters: {}", parameters.join(", "))]
        }
        RenderCommand::CompareParamOptions { parameters, .. }
        | RenderCommand::SummaryParamOptions { parameters, .. } => {
            vec![format!("Comparable parameters: {}", parameters.join(", "))]
        }
        RenderCommand::StationInfo {
            station,
            latitude,
            longitude,
            date,
        } => {
            let date = date.as_deref().unwrap_or("unknown date");
            vec![format!("{station}: lat {latitude}, lon {longitude}, {date}")]
        }
        RenderCommand::Chart(chart) => describe_chart(chart),
        RenderCommand::ComparisonCharts { charts } => {
            charts.iter().flat_map(describe_chart).collect()
        }
        RenderCommand::SummaryTable(table) => describe_table(table),
        RenderCommand::Placeholder { message, .. } => vec![message.clone()],
        RenderCommand::Status { level, message, .. } => {
            let prefix = match level {
                StatusLevel::Warning => "warning",
                StatusLevel::Error => "error",
            };
            vec![format!("{prefix}: {message}")]
        }
        RenderCommand::Map(command) => describe_map(command).into_iter().collect(),
        RenderCommand::FormValues { values } => values
            .iter()
            .map(|v| format!("{} = {}", v.field, v.value))
            .collect(),
        RenderCommand::PredictionResult { level, message } => {
            vec![format!("{message} [{level:?}]")]
        }
        RenderCommand::ClearStatus { .. } | RenderCommand::PredictionSubmitting => Vec::new(),
    }
}

fn describe_chart(chart: &ChartSpec) -> Vec<String> {
    let mut lines = vec![chart.title.clone()];
    for trace in &chart.traces {
        let points: Vec<String> = trace
            .x
            .iter()
            .zip(&trace.y)
            .map(|(x, y)| format!("{x}={}", format_stat(*y)))
            .collect();
        lines.push(format!("  {} ({:?}): {}", trace.name, trace.kind, points.join(" ")));
    }
    lines
}

fn describe_table(table: &SummaryTable) -> Vec<String> {
    let mut lines = vec![table.headers.join(" | ")];
    lines.extend(
        table
            .rows
            .iter()
            .map(|row| format!("{} | {}", row.station, row.cells.join(" | "))),
    );
    lines
}

/// Only placements are worth printing; layer and icon bookkeeping is not.
fn describe_map(command: &MapCommand) -> Option<String> {
    match command {
        MapCommand::AddMarker {
            station,
            latitude,
            longitude,
            ..
        } => Some(format!("marker {station} at ({latitude}, {longitude})")),
        MapCommand::AddCircle {
            station,
            avg_ghi,
            class,
            ..
        } => Some(format!("circle {station}: avg GHI {avg_ghi} ({})", class.label())),
        MapCommand::SetCircleColor { station, class, .. } => {
            Some(format!("recolor {station}: {}", class.label()))
        }
        MapCommand::SetTiles { url, .. } => Some(format!("tiles {url}")),
        _ => None,
    }
}
