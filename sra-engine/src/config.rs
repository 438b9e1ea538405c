//! Dashboard configurations.
//!
//! The minimal and extended dashboards share every pipeline; they differ
//! only in the values below.

use serde::Serialize;
use sra_core::prediction::{FeatureSet, EXTENDED_FEATURES, MINIMAL_FEATURES};
use sra_core::thresholds::Thresholds;

/// Plotly's default colour cycle.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Thresholds used until (or unless) the backend provides its own.
pub const DEFAULT_LOW_GHI: f64 = 300.0;
pub const DEFAULT_HIGH_GHI: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Minimal,
    Extended,
}

/// Where the prediction form's prefilled values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutofillSource {
    /// Mean values of the selected prediction station (station details endpoint).
    StationMeans,
    /// Dataset-wide feature means (average values endpoint).
    Averages,
}

/// One independent startup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    /// Station names; seeds every station select.
    Stations,
    /// Details (and, for station-means autofill, form values) of the
    /// selected station. Runs once the station list is in.
    FirstStation,
    Map,
    Thresholds,
    ParameterOptions,
    Averages,
}

impl Loader {
    /// The loader that has to wait for this one.
    pub fn follow_up(self) -> Option<Loader> {
        match self {
            Loader::Stations => Some(Loader::FirstStation),
            _ => None,
        }
    }
}

/// A map tile provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSource {
    pub url: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSources {
    pub primary: TileSource,
    pub fallback: TileSource,
}

impl Default for TileSources {
    fn default() -> Self {
        Self {
            primary: TileSource {
                url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "© OpenStreetMap contributors".to_string(),
            },
            fallback: TileSource {
                url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
                attribution: "© OpenStreetMap contributors © CARTO".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub variant: Variant,
    pub feature_set: FeatureSet,
    /// Classification circles, thresholds and the render-mode toggle.
    pub classify_map: bool,
    /// Success/warning/danger styling of prediction results.
    pub classify_prediction: bool,
    pub autofill: AutofillSource,
    /// Years fetched for the "all years" aggregate chart.
    pub known_years: Vec<i32>,
    pub default_thresholds: Thresholds,
    pub palette: Vec<String>,
    pub tiles: TileSources,
    pub map_center: (f64, f64),
    pub map_zoom: u8,
}

impl DashboardConfig {
    fn base(variant: Variant, feature_set: FeatureSet) -> Self {
        Self {
            variant,
            feature_set,
            classify_map: false,
            classify_prediction: false,
            autofill: AutofillSource::StationMeans,
            known_years: (2015..=2019).collect(),
            default_thresholds: Thresholds {
                low: DEFAULT_LOW_GHI,
                high: DEFAULT_HIGH_GHI,
            },
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            tiles: TileSources::default(),
            map_center: (24.0, 45.0),
            map_zoom: 6,
        }
    }

    /// Markers only, six-field form prefilled from the prediction station.
    pub fn minimal() -> Self {
        Self::base(Variant::Minimal, MINIMAL_FEATURES)
    }

    /// Classification circles, 21-field form, dataset averages, classified results.
    pub fn extended() -> Self {
        Self {
            classify_map: true,
            classify_prediction: true,
            autofill: AutofillSource::Averages,
            ..Self::base(Variant::Extended, EXTENDED_FEATURES)
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Minimal => Self::minimal(),
            Variant::Extended => Self::extended(),
        }
    }

    /// Loaders started together on page load. Follow-ups are not listed.
    pub fn startup_loaders(&self) -> Vec<Loader> {
        let mut loaders = vec![Loader::Stations, Loader::Map];
        if self.classify_map || self.classify_prediction {
            loaders.push(Loader::Thresholds);
        }
        loaders.push(Loader::ParameterOptions);
        if self.autofill == AutofillSource::Averages {
            loaders.push(Loader::Averages);
        }
        loaders
    }

    /// Colour of the i-th series, cycling through the palette.
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_only_where_expected() {
        let minimal = DashboardConfig::minimal();
        let extended = DashboardConfig::extended();
        assert!(!minimal.classify_map && extended.classify_map);
        assert_eq!(minimal.feature_set.len(), 6);
        assert_eq!(extended.feature_set.len(), 21);
        assert_eq!(minimal.known_years, extended.known_years);
        assert_eq!(minimal.palette, extended.palette);
    }

    #[test]
    fn palette_cycles() {
        let config = DashboardConfig::minimal();
        assert_eq!(config.color(0), "#1f77b4");
        assert_eq!(config.color(10), "#1f77b4");
        assert_eq!(config.color(13), "#d62728");
    }

    #[test]
    fn startup_loaders_follow_variant() {
        assert_eq!(
            DashboardConfig::minimal().startup_loaders(),
            vec![Loader::Stations, Loader::Map, Loader::ParameterOptions]
        );
        assert_eq!(
            DashboardConfig::extended().startup_loaders(),
            vec![
                Loader::Stations,
                Loader::Map,
                Loader::Thresholds,
                Loader::ParameterOptions,
                Loader::Averages,
            ]
        );
    }

    #[test]
    fn only_the_station_list_has_a_follow_up() {
        assert_eq!(Loader::Stations.follow_up(), Some(Loader::FirstStation));
        assert_eq!(Loader::FirstStation.follow_up(), None);
        assert_eq!(Loader::Map.follow_up(), None);
    }

    #[test]
    fn default_thresholds_are_ordered() {
        let t = DashboardConfig::extended().default_thresholds;
        assert!(t.low <= t.high);
    }
}
