//! Prediction feature sets and the predict / average-values responses.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One numeric input of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureField {
    /// Stable form field identifier.
    pub id: &'static str,
    /// Feature name expected by the model (and used as the label).
    pub feature: &'static str,
}

const fn field(id: &'static str, feature: &'static str) -> FeatureField {
    FeatureField { id, feature }
}

/// A fixed, ordered set of model features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub name: &'static str,
    pub fields: &'static [FeatureField],
    /// Payload key for the selected station, for models that take one.
    pub station_key: Option<&'static str>,
}

impl FeatureSet {
    /// Name → field-id table used by autofill.
    pub fn field_for_feature(&self, feature: &str) -> Option<&FeatureField> {
        self.fields.iter().find(|f| f.feature == feature)
    }

    pub fn field(&self, id: &str) -> Option<&FeatureField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Six weather inputs plus the station name.
pub const MINIMAL_FEATURES: FeatureSet = FeatureSet {
    name: "minimal",
    fields: &[
        field("temperature", "Air Temperature (C°)"),
        field("wind_speed", "Wind Speed at 3m (m/s)"),
        field("dhi", "DHI (Wh/m2)"),
        field("dni", "DNI (Wh/m2)"),
        field("humidity", "Relative Humidity (%)"),
        field("pressure", "Barometric Pressure (mB (hPa equiv))"),
    ],
    station_key: Some("Station_Name"),
};

/// The full 21-feature input vector of the regression model, in training order.
pub const EXTENDED_FEATURES: FeatureSet = FeatureSet {
    name: "extended",
    fields: &[
        field("air_temperature", "Air Temperature (C°)"),
        field("air_temperature_uncertainty", "Air Temperature Uncertainty (C°)"),
        field("wind_direction", "Wind Direction at 3m (°N)"),
        field("wind_direction_uncertainty", "Wind Direction at 3m Uncertainty (°N)"),
        field("wind_speed", "Wind Speed at 3m (m/s)"),
        field("wind_speed_uncertainty", "Wind Speed at 3m Uncertainty (m/s)"),
        field("wind_speed_std", "Wind Speed at 3m (std dev) (m/s)"),
        field("dhi", "DHI (Wh/m2)"),
        field("dhi_uncertainty", "DHI Uncertainty (Wh/m2)"),
        field("dhi_std", "Standard Deviation DHI (Wh/m2)"),
        field("dni", "DNI (Wh/m2)"),
        field("dni_uncertainty", "DNI Uncertainty (Wh/m2)"),
        field("dni_std", "Standard Deviation DNI (Wh/m2)"),
        field("ghi_uncertainty", "GHI Uncertainty (Wh/m2)"),
        field("ghi_std", "Standard Deviation GHI (Wh/m2)"),
        field("peak_wind_speed", "Peak Wind Speed at 3m (m/s)"),
        field("peak_wind_speed_uncertainty", "Peak Wind Speed at 3m Uncertainty (m/s)"),
        field("humidity", "Relative Humidity (%)"),
        field("humidity_uncertainty", "Relative Humidity Uncertainty (%)"),
        field("pressure", "Barometric Pressure (mB (hPa equiv))"),
        field("pressure_uncertainty", "Barometric Pressure Uncertainty (mB (hPa equiv))"),
    ],
    station_key: None,
};

/// Response of the predict endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PredictWire")]
pub enum PredictResponse {
    Prediction(f64),
    /// The backend's `{error}` text, e.g. a missing feature.
    Rejected(String),
}

#[derive(Deserialize)]
struct PredictWire {
    #[serde(default)]
    prediction: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<PredictWire> for PredictResponse {
    type Error = String;

    fn try_from(wire: PredictWire) -> Result<Self, String> {
        match (wire.prediction, wire.error) {
            (Some(value), _) if value.is_finite() => Ok(PredictResponse::Prediction(value)),
            (_, Some(error)) => Ok(PredictResponse::Rejected(error)),
            (Some(value), None) => Err(format!("prediction is not finite: {value}")),
            (None, None) => Err("response has neither prediction nor error".to_string()),
        }
    }
}

/// Response of the average-values endpoint: feature → mean, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AverageValues(pub Vec<(String, Option<f64>)>);

impl From<Map<String, Value>> for AverageValues {
    fn from(map: Map<String, Value>) -> Self {
        AverageValues(map.into_iter().map(|(k, v)| (k, v.as_f64())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_keep_distinct_field_sets() {
        assert_eq!(MINIMAL_FEATURES.len(), 6);
        assert_eq!(EXTENDED_FEATURES.len(), 21);
        assert!(MINIMAL_FEATURES.station_key.is_some());
        assert!(EXTENDED_FEATURES.station_key.is_none());
    }

    #[test]
    fn field_ids_are_unique() {
        for set in [MINIMAL_FEATURES, EXTENDED_FEATURES] {
            let mut ids: Vec<&str> = set.fields.iter().map(|f| f.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), set.len(), "duplicate id in {}", set.name);
        }
    }

    #[test]
    fn feature_lookup_maps_name_to_id() {
        let field = EXTENDED_FEATURES
            .field_for_feature("Standard Deviation DNI (Wh/m2)")
            .unwrap();
        assert_eq!(field.id, "dni_std");
        assert!(MINIMAL_FEATURES.field_for_feature("DNI Uncertainty (Wh/m2)").is_none());
    }

    #[test]
    fn predict_response_variants() {
        let ok: PredictResponse = serde_json::from_str(r#"{"prediction": 512.345}"#).unwrap();
        assert_eq!(ok, PredictResponse::Prediction(512.345));
        let zero: PredictResponse = serde_json::from_str(r#"{"prediction": 0.0}"#).unwrap();
        assert_eq!(zero, PredictResponse::Prediction(0.0));
        let err: PredictResponse =
            serde_json::from_str(r#"{"error": "Missing or invalid feature: DHI (Wh/m2)"}"#).unwrap();
        assert_eq!(
            err,
            PredictResponse::Rejected("Missing or invalid feature: DHI (Wh/m2)".to_string())
        );
        assert!(serde_json::from_str::<PredictResponse>("{}").is_err());
    }

    #[test]
    fn average_values_keep_nulls() {
        let averages: AverageValues =
            serde_json::from_str(r#"{"DHI (Wh/m2)": 118.2, "GHI Uncertainty (Wh/m2)": null}"#).unwrap();
        assert_eq!(
            averages.0,
            vec![
                ("DHI (Wh/m2)".to_string(), Some(118.2)),
                ("GHI Uncertainty (Wh/m2)".to_string(), None)
            ]
        );
    }
}
