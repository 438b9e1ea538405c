//! Per-station monthly snapshot returned by the station details endpoint.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Number of monthly buckets in every snapshot.
pub const MONTHS_PER_YEAR: usize = 12;

/// Timestamp format of `details.date`.
const DETAIL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One parameter's monthly values. `None` marks a null in the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSeries {
    pub parameter: String,
    pub values: Vec<Option<f64>>,
}

/// The `monthly_chart_data` block: 12 month labels plus one series per
/// parameter, in the order the backend listed them.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyData {
    pub months: Vec<String>,
    pub series: Vec<ParameterSeries>,
}

impl MonthlyData {
    pub fn parameters(&self) -> Vec<String> {
        self.series.iter().map(|s| s.parameter.clone()).collect()
    }

    pub fn values(&self, parameter: &str) -> Option<&[Option<f64>]> {
        self.series
            .iter()
            .find(|s| s.parameter == parameter)
            .map(|s| s.values.as_slice())
    }
}

/// A full station details snapshot. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "DetailWire")]
pub struct StationDetail {
    pub latitude: f64,
    pub longitude: f64,
    /// First observation in the selected range, if the backend sent one.
    pub date: Option<NaiveDateTime>,
    pub monthly: MonthlyData,
    /// Mean of every parameter over the selected range, in backend order.
    pub mean_values: Vec<(String, Option<f64>)>,
}

#[derive(Deserialize)]
struct DetailWire {
    details: DetailsWire,
    monthly_chart_data: MonthlyWire,
    #[serde(default)]
    mean_values: Map<String, Value>,
}

#[derive(Deserialize)]
struct DetailsWire {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
struct MonthlyWire {
    months: Vec<String>,
    data: Map<String, Value>,
}

fn number_series(parameter: &str, value: Value) -> Result<Vec<Option<f64>>, String> {
    serde_json::from_value::<Vec<Option<f64>>>(value)
        .map_err(|e| format!("parameter {parameter:?}: {e}"))
}

impl TryFrom<DetailWire> for StationDetail {
    type Error = String;

    fn try_from(wire: DetailWire) -> Result<Self, Self::Error> {
        let months = wire.monthly_chart_data.months;
        if months.len() != MONTHS_PER_YEAR {
            return Err(format!(
                "expected {MONTHS_PER_YEAR} month labels, got {}",
                months.len()
            ));
        }

        let mut series = Vec::with_capacity(wire.monthly_chart_data.data.len());
        for (parameter, value) in wire.monthly_chart_data.data {
            let values = number_series(&parameter, value)?;
            if values.len() != MONTHS_PER_YEAR {
                return Err(format!(
                    "parameter {parameter:?} has {} monthly values",
                    values.len()
                ));
            }
            series.push(ParameterSeries { parameter, values });
        }

        let date = wire
            .details
            .date
            .as_deref()
            .and_then(|d| NaiveDateTime::parse_from_str(d, DETAIL_DATE_FORMAT).ok());

        let mean_values = wire
            .mean_values
            .into_iter()
            .map(|(parameter, value)| {
                let mean = value.as_f64();
                (parameter, mean)
            })
            .collect();

        Ok(StationDetail {
            latitude: wire.details.latitude,
            longitude: wire.details.longitude,
            date,
            monthly: MonthlyData { months, series },
            mean_values,
        })
    }
}
