//! Station Directory Loader, Threshold Provider and parameter options.

use crate::config::AutofillSource;
use crate::dashboard::Dashboard;
use crate::generation::Channel;
use crate::render::{Panel, RenderCommand};
use log::{error, info, warn};
use sra_core::backend::Backend;

impl<B: Backend> Dashboard<B> {
    /// Seed the station selects and select the first station. Its details
    /// are loaded separately by [`Dashboard::load_selected_station`].
    pub async fn load_stations(&self) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::StationNames);
        let result = self.backend().station_names().await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        let stations = match result {
            Ok(names) => names.stations,
            Err(e) => {
                error!("Failed to load station list: {}", e);
                return vec![RenderCommand::error(
                    Panel::StationDetails,
                    format!("Error loading stations: {e}"),
                )];
            }
        };
        info!("Loaded {} stations", stations.len());

        let first = stations.first().cloned();
        self.with_state(|state| {
            state.stations = stations.clone();
            state.selection.station = first.clone();
            state.selection.prediction_station = first.clone();
        });

        if first.is_none() {
            warn!("Station list is empty");
        }
        vec![RenderCommand::StationOptions {
            stations,
            selected: first,
        }]
    }

    /// Load the selected station's details and, with station-means
    /// autofill, prefill the form from the prediction station.
    pub async fn load_selected_station(&self) -> Vec<RenderCommand> {
        let (station, prediction_station) = self.with_state(|state| {
            (
                state.selection.station.clone(),
                state.selection.prediction_station.clone(),
            )
        });
        let mut commands = match station {
            Some(station) => self.show_details(&station).await,
            None => Vec::new(),
        };
        if self.config().autofill == AutofillSource::StationMeans {
            if let Some(station) = prediction_station {
                commands.extend(self.autofill_station_means(&station).await);
            }
        }
        commands
    }

    /// Fetch thresholds. On failure the current values stay in force.
    pub async fn load_thresholds(&self) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::Thresholds);
        let result = self.backend().thresholds().await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        match result {
            Ok(thresholds) => {
                info!(
                    "GHI thresholds low={} high={}",
                    thresholds.low, thresholds.high
                );
                let classify = self.config().classify_map;
                let recolor = self.with_state(|state| {
                    state.thresholds = thresholds;
                    if classify {
                        state.map.recolor(&thresholds)
                    } else {
                        Vec::new()
                    }
                });
                recolor.into_iter().map(RenderCommand::Map).collect()
            }
            Err(e) => {
                let kept = self.state().thresholds;
                warn!(
                    "Keeping GHI thresholds low={} high={}: {}",
                    kept.low, kept.high, e
                );
                vec![RenderCommand::warning(
                    Panel::Map,
                    format!(
                        "Could not load GHI thresholds, using low={} high={}",
                        kept.low, kept.high
                    ),
                )]
            }
        }
    }

    /// Populate the comparison and summary parameter selects from the
    /// data-analysis statistics.
    pub async fn load_parameter_options(&self) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::ParameterOptions);
        let result = self.backend().data_analysis().await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        let parameters = match result {
            Ok(stats) => stats.parameters(),
            Err(e) => {
                error!("Failed to load parameter options: {}", e);
                return vec![RenderCommand::error(
                    Panel::Comparison,
                    format!("Error loading parameters: {e}"),
                )];
            }
        };
        if parameters.is_empty() {
            warn!("Data analysis returned no parameters");
        }

        let first = parameters.first().cloned();
        let compare_selected: Vec<String> = first.iter().cloned().collect();
        self.with_state(|state| {
            state.summary_params = parameters.clone();
            state.selection.compare_params = compare_selected.clone();
            state.selection.summary_param = first.clone();
        });

        vec![
            RenderCommand::CompareParamOptions {
                parameters: parameters.clone(),
                selected: compare_selected,
            },
            RenderCommand::SummaryParamOptions {
                parameters,
                selected: first,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DashboardConfig;
    use crate::dashboard::Dashboard;
    use crate::render::{MapCommand, Panel, RenderCommand, StatusLevel};
    use crate::testing::{self, MockBackend};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use sra_core::backend::Endpoint;
    use sra_core::error::ApiError;
    use sra_core::thresholds::GhiClass;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn first_station_is_selected_and_loaded() {
        let dashboard = Dashboard::new(testing::seeded_backend(), DashboardConfig::extended());
        let commands = block_on(dashboard.load_stations());

        assert_eq!(
            commands,
            vec![RenderCommand::StationOptions {
                stations: vec!["Riyadh".to_string(), "Jeddah".to_string()],
                selected: Some("Riyadh".to_string()),
            }]
        );
        let commands = block_on(dashboard.load_selected_station());
        assert!(commands
            .iter()
            .any(|c| matches!(c, RenderCommand::StationInfo { station, .. } if station == "Riyadh")));
    }

    #[test]
    fn station_selects_are_seeded_before_details_arrive() {
        let backend = testing::seeded_backend();
        let gate = backend.gate(Endpoint::StationDetails);
        let dashboard = Dashboard::new(backend, DashboardConfig::minimal());

        let mut pool = LocalPool::new();
        let seeded: Rc<RefCell<Option<Vec<RenderCommand>>>> = Rc::default();
        let (d, out) = (dashboard.clone(), Rc::clone(&seeded));
        pool.spawner()
            .spawn_local(async move {
                *out.borrow_mut() = Some(d.load_stations().await);
                d.load_selected_station().await;
            })
            .unwrap();
        pool.run_until_stalled();

        // The details request is held back, the station list is not.
        assert_eq!(dashboard.backend().calls(Endpoint::StationDetails), 1);
        assert!(matches!(
            seeded.borrow().as_deref(),
            Some([RenderCommand::StationOptions { selected: Some(s), .. }]) if s == "Riyadh"
        ));
        assert!(dashboard.state().detail.is_none());

        gate.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(
            dashboard.state().detail.as_ref().map(|d| d.station.as_str()),
            Some("Riyadh")
        );
    }

    #[test]
    fn empty_station_list_loads_nothing() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::StationNames, r#"{"stations": []}"#);
        let dashboard = Dashboard::new(backend, DashboardConfig::minimal());
        let commands = block_on(dashboard.load_stations());
        assert_eq!(commands.len(), 1);
        assert!(block_on(dashboard.load_selected_station()).is_empty());
        assert_eq!(dashboard.backend().calls(Endpoint::StationDetails), 0);
    }

    #[test]
    fn threshold_failure_keeps_defaults() {
        let backend = MockBackend::new();
        backend.fail(
            Endpoint::Thresholds,
            ApiError::Status {
                endpoint: Endpoint::Thresholds,
                status: 500,
                detail: "No dataset loaded".to_string(),
            },
        );
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());
        let commands = block_on(dashboard.load_thresholds());

        assert!(matches!(
            commands[0],
            RenderCommand::Status {
                panel: Panel::Map,
                level: StatusLevel::Warning,
                ..
            }
        ));
        let thresholds = dashboard.state().thresholds;
        assert_eq!((thresholds.low, thresholds.high), (300.0, 600.0));
    }

    #[test]
    fn threshold_failure_keeps_previous_fetch() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::Thresholds, r#"{"low": 250.0, "high": 640.0}"#);
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());
        block_on(dashboard.load_thresholds());

        dashboard
            .backend()
            .fail(Endpoint::Thresholds, ApiError::transport(Endpoint::Thresholds, "offline"));
        block_on(dashboard.load_thresholds());
        assert_eq!(dashboard.state().thresholds.low, 250.0);
    }

    #[test]
    fn late_thresholds_recolor_circles() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::MapData, testing::MAP_DATA);
        backend.respond(Endpoint::Thresholds, r#"{"low": 100.0, "high": 450.0}"#);
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());
        block_on(dashboard.load_map());

        let commands = block_on(dashboard.load_thresholds());
        assert_eq!(
            commands,
            vec![
                RenderCommand::Map(MapCommand::SetCircleColor {
                    station: "Riyadh".to_string(),
                    class: GhiClass::Positive,
                    color: GhiClass::Positive.color().to_string(),
                }),
                RenderCommand::Map(MapCommand::SetCircleColor {
                    station: "Jeddah".to_string(),
                    class: GhiClass::Positive,
                    color: GhiClass::Positive.color().to_string(),
                }),
            ]
        );
    }

    #[test]
    fn parameter_options_preselect_first() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::DataAnalysis, testing::DATA_ANALYSIS);
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());
        let commands = block_on(dashboard.load_parameter_options());

        assert_eq!(
            commands[0],
            RenderCommand::CompareParamOptions {
                parameters: vec!["GHI (Wh/m2)".to_string(), "DHI (Wh/m2)".to_string()],
                selected: vec!["GHI (Wh/m2)".to_string()],
            }
        );
        assert_eq!(
            dashboard.state().selection.summary_param.as_deref(),
            Some("GHI (Wh/m2)")
        );
    }
}
