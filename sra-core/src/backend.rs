//! The backend contract the dashboard engine is written against.
//!
//! Each method maps to one JSON endpoint. Implementations parse the body
//! into the typed result (see [`decode`]) so the engine never sees an
//! untyped payload.

use crate::comparison::{ComparisonRequest, ComparisonResult, SummaryStats};
use crate::detail::StationDetail;
use crate::error::ApiError;
use crate::prediction::{AverageValues, PredictResponse};
use crate::station::{MapData, StationNames};
use crate::thresholds::Thresholds;
use serde::de::DeserializeOwned;
use std::fmt;

/// The eight backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    StationNames,
    MapData,
    Thresholds,
    StationDetails,
    Comparison,
    DataAnalysis,
    Predict,
    AverageValues,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::StationNames,
        Endpoint::MapData,
        Endpoint::Thresholds,
        Endpoint::StationDetails,
        Endpoint::Comparison,
        Endpoint::DataAnalysis,
        Endpoint::Predict,
        Endpoint::AverageValues,
    ];

    /// Route served by the reference backend.
    pub fn default_path(&self) -> &'static str {
        match self {
            Endpoint::StationNames => "/get-station-names",
            Endpoint::MapData => "/map-data",
            Endpoint::Thresholds => "/get-ghi-thresholds",
            Endpoint::StationDetails => "/station-details",
            Endpoint::Comparison => "/station-comparison",
            Endpoint::DataAnalysis => "/data-analysis",
            Endpoint::Predict => "/predict",
            Endpoint::AverageValues => "/get-average-values",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::StationNames => "station list",
            Endpoint::MapData => "map data",
            Endpoint::Thresholds => "thresholds",
            Endpoint::StationDetails => "station details",
            Endpoint::Comparison => "comparison",
            Endpoint::DataAnalysis => "data analysis",
            Endpoint::Predict => "predict",
            Endpoint::AverageValues => "average values",
        };
        f.write_str(name)
    }
}

/// Async access to the dashboard backend.
///
/// Futures are not required to be `Send`: the engine runs on a single
/// cooperative event loop (the browser, or a current-thread runtime).
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn station_names(&self) -> Result<StationNames, ApiError>;

    async fn map_data(&self) -> Result<MapData, ApiError>;

    async fn thresholds(&self) -> Result<Thresholds, ApiError>;

    /// `year = None` asks for the station's whole record.
    async fn station_details(
        &self,
        station: &str,
        year: Option<i32>,
    ) -> Result<StationDetail, ApiError>;

    async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, ApiError>;

    async fn data_analysis(&self) -> Result<SummaryStats, ApiError>;

    async fn predict(
        &self,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<PredictResponse, ApiError>;

    async fn average_values(&self) -> Result<AverageValues, ApiError>;
}

/// Parse a response body into the endpoint's typed result.
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::malformed(endpoint, e.to_string()))
}

/// Extract the `{error: "..."}` text a backend attaches to failed responses.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
