//! Multi-station comparison request/response and summary statistics.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Body of the comparison POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    pub stations: Vec<String>,
    pub params: Vec<String>,
    /// The year as the form sends it: a string, or null for all years.
    pub year: Option<String>,
}

impl ComparisonRequest {
    pub fn new(stations: &[String], params: &[String], year: Option<i32>) -> Self {
        Self {
            stations: stations.to_vec(),
            params: params.to_vec(),
            year: year.map(|y| y.to_string()),
        }
    }
}

/// The four summary statistics reported per parameter and station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Mean,
    Min,
    Max,
    Std,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Mean, Stat::Min, Stat::Max, Stat::Std];

    pub fn suffix(&self) -> &'static str {
        match self {
            Stat::Mean => "mean",
            Stat::Min => "min",
            Stat::Max => "max",
            Stat::Std => "std",
        }
    }

    /// Summary-stats key for a parameter, e.g. `"GHI (Wh/m2)_mean"`.
    pub fn key(&self, parameter: &str) -> String {
        format!("{}_{}", parameter, self.suffix())
    }

    /// Column header label.
    pub fn title(&self) -> &'static str {
        match self {
            Stat::Mean => "Mean",
            Stat::Min => "Min",
            Stat::Max => "Max",
            Stat::Std => "Std",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// `{"<param>_<stat>": {station: number|null}}`, keeping the backend's key order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SummaryStats {
    keys: Vec<String>,
    entries: HashMap<String, HashMap<String, Option<f64>>>,
}

impl From<Map<String, Value>> for SummaryStats {
    fn from(map: Map<String, Value>) -> Self {
        let mut stats = SummaryStats::default();
        for (key, value) in map {
            let Value::Object(per_station) = value else {
                warn!("Skipping summary entry {:?}: not an object", key);
                continue;
            };
            let per_station = per_station
                .into_iter()
                .map(|(station, v)| (station, v.as_f64()))
                .collect();
            stats.keys.push(key.clone());
            stats.entries.insert(key, per_station);
        }
        stats
    }
}

impl SummaryStats {
    /// Value for one statistic; `None` when the key, the station or the value is missing.
    pub fn get(&self, parameter: &str, stat: Stat, station: &str) -> Option<f64> {
        self.entries
            .get(&stat.key(parameter))
            .and_then(|per_station| per_station.get(station))
            .copied()
            .flatten()
    }

    /// Parameters that have a `_mean` entry, in key order.
    pub fn parameters(&self) -> Vec<String> {
        let suffix = format!("_{}", Stat::Mean.suffix());
        self.keys
            .iter()
            .filter_map(|key| key.strip_suffix(suffix.as_str()))
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Response of the data-analysis endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataAnalysis {
    pub summary_stats: SummaryStats,
}

/// Response of the comparison endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonResult {
    /// Timestamps per station.
    #[serde(default)]
    pub dates: BTreeMap<String, Vec<String>>,
    /// Series per station and parameter.
    #[serde(default)]
    pub values: BTreeMap<String, BTreeMap<String, Vec<Option<f64>>>>,
    #[serde(default)]
    pub summary_stats: SummaryStats,
}

impl ComparisonResult {
    /// Aligned `(dates, values)` for one station and parameter.
    pub fn series(&self, station: &str, parameter: &str) -> Option<(&[String], &[Option<f64>])> {
        let dates = self.dates.get(station)?;
        let values = self.values.get(station)?.get(parameter)?;
        Some((dates.as_slice(), values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "dates": {"Riyadh": ["2017-01-01", "2017-01-02"], "Jeddah": ["2017-01-01"]},
        "values": {
            "Riyadh": {"GHI (Wh/m2)": [410.5, 433.0]},
            "Jeddah": {"GHI (Wh/m2)": [380.0]}
        },
        "summary_stats": {
            "GHI (Wh/m2)_mean": {"Riyadh": 421.75, "Jeddah": 380.0},
            "GHI (Wh/m2)_min": {"Riyadh": 410.5, "Jeddah": null},
            "GHI (Wh/m2)_max": {"Riyadh": 433.0},
            "GHI (Wh/m2)_std": {"Riyadh": 15.91, "Jeddah": null}
        }
    }"#;

    #[test]
    fn request_serializes_year_as_string_or_null() {
        let stations = vec!["Riyadh".to_string()];
        let params = vec!["GHI (Wh/m2)".to_string()];
        let with_year = serde_json::to_value(ComparisonRequest::new(&stations, &params, Some(2018))).unwrap();
        assert_eq!(with_year["year"], Value::String("2018".to_string()));
        let all_years = serde_json::to_value(ComparisonRequest::new(&stations, &params, None)).unwrap();
        assert_eq!(all_years["year"], Value::Null);
    }

    #[test]
    fn lookups_distinguish_missing_and_null() {
        let result: ComparisonResult = serde_json::from_str(BODY).unwrap();
        let stats = &result.summary_stats;
        assert_eq!(stats.get("GHI (Wh/m2)", Stat::Mean, "Jeddah"), Some(380.0));
        assert_eq!(stats.get("GHI (Wh/m2)", Stat::Min, "Jeddah"), None);
        assert_eq!(stats.get("GHI (Wh/m2)", Stat::Max, "Jeddah"), None);
        assert_eq!(stats.get("DNI (Wh/m2)", Stat::Mean, "Riyadh"), None);
    }

    #[test]
    fn series_pairs_dates_with_values() {
        let result: ComparisonResult = serde_json::from_str(BODY).unwrap();
        let (dates, values) = result.series("Riyadh", "GHI (Wh/m2)").unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(values[1], Some(433.0));
        assert!(result.series("Dammam", "GHI (Wh/m2)").is_none());
    }

    #[test]
    fn parameters_come_from_mean_keys_in_order() {
        let analysis: DataAnalysis = serde_json::from_str(
            r#"{"summary_stats": {
                "Wind Speed at 3m (m/s)_mean": {"A": 3.1},
                "Wind Speed at 3m (m/s)_std": {"A": 1.0},
                "DHI (Wh/m2)_mean": {"A": 120.0},
                "broken": 7
            }}"#,
        )
        .unwrap();
        assert_eq!(
            analysis.summary_stats.parameters(),
            vec!["Wind Speed at 3m (m/s)".to_string(), "DHI (Wh/m2)".to_string()]
        );
    }
}
