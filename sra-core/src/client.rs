//! reqwest implementation of [`Backend`].
//!
//! Works natively (CLI) and on `wasm32` (reqwest falls back to `fetch`),
//! so the base URL must be absolute in both cases.

use crate::backend::{decode, error_detail, Backend, Endpoint};
use crate::comparison::{ComparisonRequest, ComparisonResult, DataAnalysis, SummaryStats};
use crate::detail::StationDetail;
use crate::error::ApiError;
use crate::prediction::{AverageValues, PredictResponse};
use crate::station::{MapData, StationNames};
use crate::thresholds::Thresholds;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Endpoint paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    paths: HashMap<Endpoint, String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        let paths = Endpoint::ALL
            .iter()
            .map(|e| (*e, e.default_path().to_string()))
            .collect();
        Self { paths }
    }
}

impl Endpoints {
    /// Override the path of one endpoint.
    pub fn with_path(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
        self.paths.insert(endpoint, path.into());
        self
    }

    pub fn path(&self, endpoint: Endpoint) -> &str {
        self.paths
            .get(&endpoint)
            .map(String::as_str)
            .unwrap_or_else(|| endpoint.default_path())
    }
}

/// HTTP backend talking JSON to the atlas server.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_endpoints(base_url, Endpoints::default())
    }

    pub fn with_endpoints(base_url: impl Into<String>, endpoints: Endpoints) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            endpoints,
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, self.endpoints.path(endpoint))
    }

    /// Send, check the status, and decode the body.
    async fn exchange<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(endpoint, e.to_string()))?;
        debug!("{} -> HTTP {} ({} bytes)", endpoint, status.as_u16(), body.len());

        if !status.is_success() {
            let detail = error_detail(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
            warn!("{} failed with HTTP {}: {}", endpoint, status.as_u16(), detail);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }
        decode(endpoint, &body)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let request = self.client.get(self.url(endpoint));
        self.exchange(endpoint, request).await
    }
}

/// Query string for the station details endpoint. The year is omitted for "all years".
pub fn detail_query(station: &str, year: Option<i32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("station", station.to_string())];
    if let Some(year) = year {
        query.push(("year", year.to_string()));
    }
    query
}

impl Backend for HttpBackend {
    async fn station_names(&self) -> Result<StationNames, ApiError> {
        self.get(Endpoint::StationNames).await
    }

    async fn map_data(&self) -> Result<MapData, ApiError> {
        self.get(Endpoint::MapData).await
    }

    async fn thresholds(&self) -> Result<Thresholds, ApiError> {
        self.get(Endpoint::Thresholds).await
    }

    async fn station_details(
        &self,
        station: &str,
        year: Option<i32>,
    ) -> Result<StationDetail, ApiError> {
        let endpoint = Endpoint::StationDetails;
        let request = self
            .client
            .get(self.url(endpoint))
            .query(&detail_query(station, year));
        self.exchange(endpoint, request).await
    }

    async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, ApiError> {
        let endpoint = Endpoint::Comparison;
        let builder = self.client.post(self.url(endpoint)).json(request);
        self.exchange(endpoint, builder).await
    }

    async fn data_analysis(&self) -> Result<SummaryStats, ApiError> {
        let analysis: DataAnalysis = self.get(Endpoint::DataAnalysis).await?;
        Ok(analysis.summary_stats)
    }

    async fn predict(
        &self,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<PredictResponse, ApiError> {
        let endpoint = Endpoint::Predict;
        let builder = self.client.post(self.url(endpoint)).json(payload);
        self.exchange(endpoint, builder).await
    }

    async fn average_values(&self) -> Result<AverageValues, ApiError> {
        self.get(Endpoint::AverageValues).await
    }
}
