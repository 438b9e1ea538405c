//! Station directory and map-data records.

use crate::error::StationDefect;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of the station list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationNames {
    pub stations: Vec<String>,
}

/// A station that can be placed on the map: coordinates and average GHI
/// are all present and non-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub avg_ghi: f64,
}

/// One map-data row as sent by the backend. Numeric fields are optional
/// because the backend may omit or null them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapStation {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub avg_ghi: Option<f64>,
}

/// A value counts as present only if it is a number other than zero or NaN.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

impl MapStation {
    /// Check that every field needed for a marker is present.
    pub fn placeable(&self) -> Result<Station, StationDefect> {
        let missing = |field| StationDefect::MissingField {
            station: self.name.clone(),
            field,
        };
        let latitude = present(self.latitude).ok_or_else(|| missing("latitude"))?;
        let longitude = present(self.longitude).ok_or_else(|| missing("longitude"))?;
        let avg_ghi = present(self.avg_ghi).ok_or_else(|| missing("avg_ghi"))?;
        Ok(Station {
            name: self.name.clone(),
            latitude,
            longitude,
            avg_ghi,
        })
    }

    fn from_value(index: usize, value: &Value) -> Result<Self, StationDefect> {
        let object = value
            .as_object()
            .ok_or(StationDefect::NotAnObject { index })?;
        let name = object
            .get("station_name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(StationDefect::MissingName { index })?;
        let number = |key: &str| object.get(key).and_then(Value::as_f64);
        Ok(MapStation {
            name: name.to_string(),
            latitude: number("latitude"),
            longitude: number("longitude"),
            avg_ghi: number("avg_ghi"),
        })
    }
}

/// Response of the map-data endpoint.
///
/// Each array element is parsed on its own so that one bad record does not
/// reject the whole batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<Value>")]
pub struct MapData {
    pub entries: Vec<Result<MapStation, StationDefect>>,
}

impl From<Vec<Value>> for MapData {
    fn from(values: Vec<Value>) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .map(|(index, value)| MapStation::from_value(index, value))
            .collect();
        MapData { entries }
    }
}

impl MapData {
    /// Placeable stations in response order; every other record is logged and dropped.
    pub fn placeable_stations(&self) -> Vec<Station> {
        self.entries
            .iter()
            .filter_map(|entry| {
                match entry.as_ref().map_err(Clone::clone).and_then(MapStation::placeable) {
                    Ok(station) => Some(station),
                    Err(defect) => {
                        warn!("Skipping map station: {}", defect);
                        None
                    }
                }
            })
            .collect()
    }
}
