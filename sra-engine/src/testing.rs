//! In-memory backend and canned responses for engine tests.

use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use sra_core::backend::{decode, Backend, Endpoint};
use sra_core::comparison::{ComparisonRequest, ComparisonResult, DataAnalysis, SummaryStats};
use sra_core::detail::StationDetail;
use sra_core::error::ApiError;
use sra_core::prediction::{AverageValues, PredictResponse};
use sra_core::station::{MapData, StationNames};
use sra_core::thresholds::Thresholds;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

pub const STATION_NAMES: &str = r#"{"stations": ["Riyadh", "Jeddah"]}"#;

pub const MAP_DATA: &str = r#"[
    {"station_name": "Riyadh", "latitude": 24.7, "longitude": 46.7, "avg_ghi": 512.3},
    {"station_name": "NoGhi", "latitude": 26.3, "longitude": 50.2},
    {"station_name": "ZeroLat", "latitude": 0, "longitude": 39.6, "avg_ghi": 410.0},
    {"station_name": "Jeddah", "latitude": 21.5, "longitude": 39.2, "avg_ghi": 480.0}
]"#;

pub const DATA_ANALYSIS: &str = r#"{"summary_stats": {
    "GHI (Wh/m2)_mean": {"Riyadh": 421.75, "Jeddah": 380.0},
    "GHI (Wh/m2)_std": {"Riyadh": 15.91},
    "DHI (Wh/m2)_mean": {"Riyadh": 118.2}
}}"#;

pub const COMPARISON: &str = r#"{
    "dates": {"Riyadh": ["2018-01-01", "2018-01-02"], "Jeddah": ["2018-01-01", "2018-01-02"]},
    "values": {
        "Riyadh": {"GHI (Wh/m2)": [410.5, 433.0], "DHI (Wh/m2)": [117.0, 119.4]},
        "Jeddah": {"GHI (Wh/m2)": [380.0, null], "DHI (Wh/m2)": [101.0, 102.0]}
    },
    "summary_stats": {
        "GHI (Wh/m2)_mean": {"Riyadh": 421.75, "Jeddah": 380.0},
        "GHI (Wh/m2)_min": {"Riyadh": 410.5, "Jeddah": null},
        "GHI (Wh/m2)_max": {"Riyadh": 433.0},
        "GHI (Wh/m2)_std": {"Riyadh": 15.91, "Jeddah": null},
        "DHI (Wh/m2)_mean": {"Riyadh": 118.2, "Jeddah": 101.5}
    }
}"#;

pub const AVERAGE_VALUES: &str = r#"{
    "DHI (Wh/m2)": 118.2,
    "Air Temperature (C°)": 29.5,
    "GHI Uncertainty (Wh/m2)": null,
    "Mystery Feature": 3.0
}"#;

/// Station details body with GHI `ghi..ghi+12` and DHI `dhi..dhi+12`.
pub fn detail_body(date: &str, ghi: i32, dhi: i32, means: &str) -> String {
    let series = |start: i32| {
        (start..start + 12)
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        r#"{{
            "details": {{"latitude": 24.7, "longitude": 46.7, "date": "{date}"}},
            "monthly_chart_data": {{
                "months": ["Jan","Feb","Mar","Apr","May","Jun","Jul","Aug","Sep","Oct","Nov","Dec"],
                "data": {{"GHI (Wh/m2)": [{}], "DHI (Wh/m2)": [{}]}}
            }},
            "mean_values": {means}
        }}"#,
        series(ghi),
        series(dhi)
    )
}

/// Every endpoint answered, with yearly details for Riyadh 2015..=2019
/// (GHI starting at 1..=5) and Jeddah 2018.
pub fn seeded_backend() -> MockBackend {
    let backend = MockBackend::new();
    backend.respond(Endpoint::StationNames, STATION_NAMES);
    backend.respond(Endpoint::MapData, MAP_DATA);
    backend.respond(Endpoint::Thresholds, r#"{"low": 250.0, "high": 640.0}"#);
    backend.respond(Endpoint::DataAnalysis, DATA_ANALYSIS);
    backend.respond(Endpoint::Comparison, COMPARISON);
    backend.respond(Endpoint::AverageValues, AVERAGE_VALUES);
    backend.respond(Endpoint::Predict, r#"{"prediction": 512.5}"#);

    backend.respond_detail(
        "Riyadh",
        None,
        detail_body(
            "2019-01-01 00:00",
            5,
            100,
            r#"{"DHI (Wh/m2)": 120.0, "GHI (Wh/m2)": 10.5}"#,
        ),
    );
    for year in 2015..=2019 {
        backend.respond_detail(
            "Riyadh",
            Some(year),
            detail_body(&format!("{year}-01-01 00:00"), year - 2014, 100, "{}"),
        );
    }
    let jeddah_means =
        r#"{"DHI (Wh/m2)": 101.5, "Air Temperature (C°)": 31.0, "GHI (Wh/m2)": 400.0, "Relative Humidity (%)": null}"#;
    backend.respond_detail("Jeddah", None, detail_body("2019-01-01 00:00", 20, 90, jeddah_means));
    backend.respond_detail("Jeddah", Some(2018), detail_body("2018-01-01 00:00", 20, 90, "{}"));
    backend
}

/// Canned-response backend that counts calls and can hold a response
/// back until the test releases it.
#[derive(Default)]
pub struct MockBackend {
    responses: RefCell<HashMap<(Endpoint, String), Result<String, ApiError>>>,
    calls: RefCell<HashMap<Endpoint, usize>>,
    requests: RefCell<HashMap<Endpoint, Vec<String>>>,
    gates: RefCell<HashMap<Endpoint, VecDeque<oneshot::Receiver<()>>>>,
}

fn detail_key(station: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{station}|{year}"),
        None => station.to_string(),
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, endpoint: Endpoint, body: impl Into<String>) {
        self.responses
            .borrow_mut()
            .insert((endpoint, String::new()), Ok(body.into()));
    }

    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.responses
            .borrow_mut()
            .insert((endpoint, String::new()), Err(error));
    }

    pub fn respond_detail(&self, station: &str, year: Option<i32>, body: impl Into<String>) {
        self.responses.borrow_mut().insert(
            (Endpoint::StationDetails, detail_key(station, year)),
            Ok(body.into()),
        );
    }

    pub fn fail_detail(&self, station: &str, year: Option<i32>, error: ApiError) {
        self.responses.borrow_mut().insert(
            (Endpoint::StationDetails, detail_key(station, year)),
            Err(error),
        );
    }

    /// Hold the next call to `endpoint` until the sender fires.
    pub fn gate(&self, endpoint: Endpoint) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.borrow().get(&endpoint).copied().unwrap_or(0)
    }

    /// Request bodies (or detail keys) in call order.
    pub fn requests(&self, endpoint: Endpoint) -> Vec<String> {
        self.requests
            .borrow()
            .get(&endpoint)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
        self.requests.borrow_mut().clear();
    }

    async fn answer<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        key: String,
        request: String,
    ) -> Result<T, ApiError> {
        *self.calls.borrow_mut().entry(endpoint).or_default() += 1;
        self.requests
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push(request);

        let gate = self
            .gates
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let response = self
            .responses
            .borrow()
            .get(&(endpoint, key))
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    endpoint,
                    status: 404,
                    detail: "no canned response".to_string(),
                })
            });
        decode(endpoint, &response?)
    }
}

impl Backend for MockBackend {
    async fn station_names(&self) -> Result<StationNames, ApiError> {
        self.answer(Endpoint::StationNames, String::new(), String::new())
            .await
    }

    async fn map_data(&self) -> Result<MapData, ApiError> {
        self.answer(Endpoint::MapData, String::new(), String::new())
            .await
    }

    async fn thresholds(&self) -> Result<Thresholds, ApiError> {
        self.answer(Endpoint::Thresholds, String::new(), String::new())
            .await
    }

    async fn station_details(
        &self,
        station: &str,
        year: Option<i32>,
    ) -> Result<StationDetail, ApiError> {
        let key = detail_key(station, year);
        self.answer(Endpoint::StationDetails, key.clone(), key).await
    }

    async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, ApiError> {
        let body = serde_json::to_string(request).unwrap_or_default();
        self.answer(Endpoint::Comparison, String::new(), body).await
    }

    async fn data_analysis(&self) -> Result<SummaryStats, ApiError> {
        let analysis: DataAnalysis = self
            .answer(Endpoint::DataAnalysis, String::new(), String::new())
            .await?;
        Ok(analysis.summary_stats)
    }

    async fn predict(
        &self,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<PredictResponse, ApiError> {
        let body = serde_json::to_string(payload).unwrap_or_default();
        self.answer(Endpoint::Predict, String::new(), body).await
    }

    async fn average_values(&self) -> Result<AverageValues, ApiError> {
        self.answer(Endpoint::AverageValues, String::new(), String::new())
            .await
    }
}
