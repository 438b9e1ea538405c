//! Render commands: the engine's only output.
//!
//! Pipelines never touch a widget tree. They return commands which the UI
//! (Dioxus + Plotly + Leaflet) or the CLI applies in order.

use crate::map::RenderMode;
use serde::Serialize;
use sra_core::thresholds::GhiClass;

/// UI surfaces that can show a placeholder or a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Map,
    StationDetails,
    MonthlyChart,
    Comparison,
    Prediction,
}

impl Panel {
    /// DOM id of the panel's content container.
    pub fn container_id(&self) -> &'static str {
        match self {
            Panel::Map => "map",
            Panel::StationDetails => "stationDetails",
            Panel::MonthlyChart => "monthlyChart",
            Panel::Comparison => "comparisonCharts",
            Panel::Prediction => "predictionResult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Warning,
    Error,
}

/// Styling of the prediction result box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertLevel::Success => "alert alert-success",
            AlertLevel::Warning => "alert alert-warning",
            AlertLevel::Danger => "alert alert-danger",
        }
    }
}

impl From<GhiClass> for AlertLevel {
    fn from(class: GhiClass) -> Self {
        match class {
            GhiClass::Positive => AlertLevel::Success,
            GhiClass::Warning => AlertLevel::Warning,
            GhiClass::Negative => AlertLevel::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Line,
}

/// One chart series, shaped for Plotly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    pub x: Vec<String>,
    /// `None` serializes as `null` and is drawn as a gap.
    pub y: Vec<Option<f64>>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// DOM id the chart is drawn into.
    pub container: String,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub station: String,
    /// Mean, min, max, std, already formatted ("N/A" when missing).
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub parameter: String,
    pub headers: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerIcon {
    Default,
    Highlighted,
}

impl MarkerIcon {
    pub fn url(&self) -> &'static str {
        match self {
            MarkerIcon::Default => "https://unpkg.com/leaflet@1.7.1/dist/images/marker-icon.png",
            MarkerIcon::Highlighted => {
                "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-red.png"
            }
        }
    }
}

/// Leaflet operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    /// Remove every marker and circle.
    Clear,
    SetTiles {
        url: String,
        attribution: String,
    },
    RemoveTiles {
        url: String,
    },
    AddMarker {
        station: String,
        latitude: f64,
        longitude: f64,
        icon: MarkerIcon,
        icon_url: String,
    },
    AddCircle {
        station: String,
        latitude: f64,
        longitude: f64,
        avg_ghi: f64,
        class: GhiClass,
        color: String,
    },
    SetCircleColor {
        station: String,
        class: GhiClass,
        color: String,
    },
    SetMarkerIcon {
        station: String,
        icon: MarkerIcon,
        icon_url: String,
    },
    AttachLayer {
        layer: RenderMode,
    },
    DetachLayer {
        layer: RenderMode,
    },
    /// Reflect a marker click in the station select.
    FocusStation {
        station: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormValue {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Seeds the station select, the prediction station select and the
    /// comparison station multi-select.
    StationOptions {
        stations: Vec<String>,
        selected: Option<String>,
    },
    /// Detail-view parameter multi-select.
    ParameterOptions {
        parameters: Vec<String>,
        selected: Vec<String>,
    },
    CompareParamOptions {
        parameters: Vec<String>,
        selected: Vec<String>,
    },
    SummaryParamOptions {
        parameters: Vec<String>,
        selected: Option<String>,
    },
    StationInfo {
        station: String,
        latitude: f64,
        longitude: f64,
        date: Option<String>,
    },
    Chart(ChartSpec),
    /// Replaces every comparison chart.
    ComparisonCharts {
        charts: Vec<ChartSpec>,
    },
    SummaryTable(SummaryTable),
    Placeholder {
        panel: Panel,
        message: String,
    },
    Status {
        panel: Panel,
        level: StatusLevel,
        message: String,
    },
    ClearStatus {
        panel: Panel,
    },
    Map(MapCommand),
    FormValues {
        values: Vec<FormValue>,
    },
    PredictionSubmitting,
    PredictionResult {
        level: AlertLevel,
        message: String,
    },
}

impl RenderCommand {
    pub fn placeholder(panel: Panel, message: impl Into<String>) -> Self {
        RenderCommand::Placeholder {
            panel,
            message: message.into(),
        }
    }

    pub fn error(panel: Panel, message: impl Into<String>) -> Self {
        RenderCommand::Status {
            panel,
            level: StatusLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(panel: Panel, message: impl Into<String>) -> Self {
        RenderCommand::Status {
            panel,
            level: StatusLevel::Warning,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_serialize_as_null() {
        let spec = ChartSpec {
            container: "monthlyChart".to_string(),
            title: "t".to_string(),
            x_title: "Month".to_string(),
            y_title: "Value".to_string(),
            traces: vec![Trace {
                name: "GHI".to_string(),
                kind: TraceKind::Bar,
                x: vec!["Jan".to_string(), "Feb".to_string()],
                y: vec![Some(1.5), None],
                color: "#1f77b4".to_string(),
            }],
        };
        let json = spec.to_json();
        assert!(json.contains(r#""y":[1.5,null]"#));
        assert!(json.contains(r#""kind":"bar""#));
    }

    #[test]
    fn map_commands_are_tagged() {
        let json = serde_json::to_string(&MapCommand::AttachLayer {
            layer: RenderMode::Circles,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"attach_layer","layer":"circles"}"#);
    }

    #[test]
    fn ghi_class_maps_to_alert_level() {
        assert_eq!(AlertLevel::from(GhiClass::Positive), AlertLevel::Success);
        assert_eq!(AlertLevel::from(GhiClass::Warning), AlertLevel::Warning);
        assert_eq!(AlertLevel::from(GhiClass::Negative), AlertLevel::Danger);
    }
}
