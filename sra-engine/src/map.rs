//! Map Layer Manager.
//!
//! Two layer groups exist on the map: one marker per station and one
//! classification circle per station. Only one group is attached at a
//! time. The minimal dashboard never creates circles and never toggles.

use crate::config::TileSources;
use crate::dashboard::Dashboard;
use crate::generation::Channel;
use crate::render::{MapCommand, MarkerIcon, Panel, RenderCommand};
use log::{debug, error, info, warn};
use serde::Serialize;
use sra_core::backend::Backend;
use sra_core::station::Station;
use sra_core::thresholds::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Markers,
    Circles,
}

impl RenderMode {
    pub fn other(self) -> Self {
        match self {
            RenderMode::Markers => RenderMode::Circles,
            RenderMode::Circles => RenderMode::Markers,
        }
    }
}

/// Which tile provider is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Primary,
    /// Switched after a tile error. Never switches back.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayers {
    stations: Vec<Station>,
    mode: RenderMode,
    tiles: TileState,
    hovered: Option<String>,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self {
            stations: Vec::new(),
            mode: RenderMode::Markers,
            tiles: TileState::Primary,
            hovered: None,
        }
    }
}

impl MapLayers {
    /// Stations currently placed on the map.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn tiles(&self) -> TileState {
        self.tiles
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    fn contains(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s.name == station)
    }

    /// Replace every marker and circle with the given stations.
    pub fn place(
        &mut self,
        stations: Vec<Station>,
        thresholds: &Thresholds,
        classify: bool,
    ) -> Vec<MapCommand> {
        let mut commands = vec![MapCommand::Clear];
        for station in &stations {
            commands.push(MapCommand::AddMarker {
                station: station.name.clone(),
                latitude: station.latitude,
                longitude: station.longitude,
                icon: MarkerIcon::Default,
                icon_url: MarkerIcon::Default.url().to_string(),
            });
            if classify {
                let class = thresholds.classify(station.avg_ghi);
                commands.push(MapCommand::AddCircle {
                    station: station.name.clone(),
                    latitude: station.latitude,
                    longitude: station.longitude,
                    avg_ghi: station.avg_ghi,
                    class,
                    color: class.color().to_string(),
                });
            }
        }
        if !classify {
            self.mode = RenderMode::Markers;
        }
        commands.push(MapCommand::AttachLayer { layer: self.mode });
        self.stations = stations;
        self.hovered = None;
        commands
    }

    /// Recolour existing circles against new thresholds.
    pub fn recolor(&self, thresholds: &Thresholds) -> Vec<MapCommand> {
        self.stations
            .iter()
            .map(|station| {
                let class = thresholds.classify(station.avg_ghi);
                MapCommand::SetCircleColor {
                    station: station.name.clone(),
                    class,
                    color: class.color().to_string(),
                }
            })
            .collect()
    }

    /// Swap the attached layer group.
    pub fn toggle(&mut self) -> Vec<MapCommand> {
        let detached = self.mode;
        self.mode = detached.other();
        vec![
            MapCommand::DetachLayer { layer: detached },
            MapCommand::AttachLayer { layer: self.mode },
        ]
    }

    pub fn hover(&mut self, station: &str, entered: bool) -> Vec<MapCommand> {
        if !self.contains(station) {
            return Vec::new();
        }
        let icon = if entered {
            self.hovered = Some(station.to_string());
            MarkerIcon::Highlighted
        } else {
            if self.hovered.as_deref() == Some(station) {
                self.hovered = None;
            }
            MarkerIcon::Default
        };
        vec![MapCommand::SetMarkerIcon {
            station: station.to_string(),
            icon,
            icon_url: icon.url().to_string(),
        }]
    }

    /// Switch to the fallback tiles on the first error only.
    pub fn tile_error(&mut self, tiles: &TileSources) -> Vec<MapCommand> {
        match self.tiles {
            TileState::Primary => {
                warn!("Primary tiles failed, switching to {}", tiles.fallback.url);
                self.tiles = TileState::Fallback;
                vec![
                    MapCommand::RemoveTiles {
                        url: tiles.primary.url.clone(),
                    },
                    MapCommand::SetTiles {
                        url: tiles.fallback.url.clone(),
                        attribution: tiles.fallback.attribution.clone(),
                    },
                ]
            }
            TileState::Fallback => {
                debug!("Ignoring tile error on fallback tiles");
                Vec::new()
            }
        }
    }
}

fn map_commands(commands: Vec<MapCommand>) -> Vec<RenderCommand> {
    commands.into_iter().map(RenderCommand::Map).collect()
}

impl<B: Backend> Dashboard<B> {
    /// Attach the primary tile layer.
    pub fn init_map(&self) -> Vec<RenderCommand> {
        let primary = &self.config().tiles.primary;
        vec![RenderCommand::Map(MapCommand::SetTiles {
            url: primary.url.clone(),
            attribution: primary.attribution.clone(),
        })]
    }

    /// Fetch map data and rebuild every marker and circle.
    ///
    /// Existing markers stay in place when the fetch fails.
    pub async fn load_map(&self) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::MapData);
        let result = self.backend().map_data().await;
        if !self.accept(ticket) {
            return Vec::new();
        }

        let data = match result {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to load map data: {}", e);
                return vec![RenderCommand::error(
                    Panel::Map,
                    format!("Error loading map data: {e}"),
                )];
            }
        };

        let stations = data.placeable_stations();
        info!(
            "Placing {} of {} map stations",
            stations.len(),
            data.entries.len()
        );
        let classify = self.config().classify_map;
        let commands = self.with_state(|state| {
            let thresholds = state.thresholds;
            state.map.place(stations, &thresholds, classify)
        });
        let mut out = vec![RenderCommand::ClearStatus { panel: Panel::Map }];
        out.extend(map_commands(commands));
        out
    }

    pub fn hover_marker(&self, station: &str, entered: bool) -> Vec<RenderCommand> {
        map_commands(self.with_state(|state| state.map.hover(station, entered)))
    }

    /// Select the clicked station and run the detail pipeline.
    pub async fn click_marker(&self, station: &str) -> Vec<RenderCommand> {
        let mut commands = vec![RenderCommand::Map(MapCommand::FocusStation {
            station: station.to_string(),
        })];
        commands.extend(self.show_details(station).await);
        commands
    }

    pub fn toggle_render_mode(&self) -> Vec<RenderCommand> {
        if !self.config().classify_map {
            debug!("Render mode toggle ignored: no classification layer");
            return Vec::new();
        }
        map_commands(self.with_state(|state| state.map.toggle()))
    }

    pub fn tile_error(&self) -> Vec<RenderCommand> {
        let tiles = self.config().tiles.clone();
        map_commands(self.with_state(|state| state.map.tile_error(&tiles)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::testing::{self, MockBackend};
    use futures::executor::block_on;
    use sra_core::backend::Endpoint;
    use sra_core::error::ApiError;
    use sra_core::thresholds::GhiClass;

    fn station(name: &str, avg_ghi: f64) -> Station {
        Station {
            name: name.to_string(),
            latitude: 24.7,
            longitude: 46.7,
            avg_ghi,
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds::new(300.0, 600.0).unwrap()
    }

    fn circle_classes(commands: &[MapCommand]) -> Vec<(String, GhiClass)> {
        commands
            .iter()
            .filter_map(|c| match c {
                MapCommand::AddCircle { station, class, .. } => Some((station.clone(), *class)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn circles_follow_boundary_rule() {
        let mut layers = MapLayers::default();
        let commands = layers.place(
            vec![station("High", 600.0), station("Low", 300.0), station("Dim", 120.0)],
            &thresholds(),
            true,
        );
        assert_eq!(
            circle_classes(&commands),
            vec![
                ("High".to_string(), GhiClass::Positive),
                ("Low".to_string(), GhiClass::Warning),
                ("Dim".to_string(), GhiClass::Negative),
            ]
        );
        assert_eq!(commands.first(), Some(&MapCommand::Clear));
        assert_eq!(
            commands.last(),
            Some(&MapCommand::AttachLayer {
                layer: RenderMode::Markers
            })
        );
    }

    #[test]
    fn minimal_places_markers_only() {
        let mut layers = MapLayers::default();
        let commands = layers.place(vec![station("A", 500.0)], &thresholds(), false);
        assert!(circle_classes(&commands).is_empty());
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn toggling_twice_restores_layers() {
        let mut layers = MapLayers::default();
        layers.place(vec![station("A", 500.0)], &thresholds(), true);
        let first = layers.toggle();
        assert_eq!(layers.mode(), RenderMode::Circles);
        let second = layers.toggle();
        assert_eq!(layers.mode(), RenderMode::Markers);
        assert_eq!(
            first,
            vec![
                MapCommand::DetachLayer {
                    layer: RenderMode::Markers
                },
                MapCommand::AttachLayer {
                    layer: RenderMode::Circles
                },
            ]
        );
        assert_eq!(
            second,
            vec![
                MapCommand::DetachLayer {
                    layer: RenderMode::Circles
                },
                MapCommand::AttachLayer {
                    layer: RenderMode::Markers
                },
            ]
        );
    }

    #[test]
    fn tile_fallback_happens_once() {
        let tiles = TileSources::default();
        let mut layers = MapLayers::default();
        let first = layers.tile_error(&tiles);
        assert_eq!(first.len(), 2);
        assert_eq!(layers.tiles(), TileState::Fallback);
        assert!(layers.tile_error(&tiles).is_empty());
        assert!(layers.tile_error(&tiles).is_empty());
    }

    #[test]
    fn hover_swaps_icon_and_back() {
        let mut layers = MapLayers::default();
        layers.place(vec![station("A", 500.0)], &thresholds(), false);
        let on = layers.hover("A", true);
        assert!(matches!(
            on[0],
            MapCommand::SetMarkerIcon {
                icon: MarkerIcon::Highlighted,
                ..
            }
        ));
        assert_eq!(layers.hovered(), Some("A"));
        let off = layers.hover("A", false);
        assert!(matches!(
            off[0],
            MapCommand::SetMarkerIcon {
                icon: MarkerIcon::Default,
                ..
            }
        ));
        assert_eq!(layers.hovered(), None);
        assert!(layers.hover("Unknown", true).is_empty());
    }

    #[test]
    fn load_map_skips_incomplete_stations() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::MapData, testing::MAP_DATA);
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());

        let commands = block_on(dashboard.load_map());
        let markers = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Map(MapCommand::AddMarker { .. })))
            .count();
        let circles = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Map(MapCommand::AddCircle { .. })))
            .count();
        assert_eq!(markers, 2);
        assert_eq!(circles, 2);
        let placed: Vec<String> = dashboard
            .state()
            .map
            .stations()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(placed, vec!["Riyadh".to_string(), "Jeddah".to_string()]);
    }

    #[test]
    fn failed_reload_keeps_existing_markers() {
        let backend = MockBackend::new();
        backend.respond(Endpoint::MapData, testing::MAP_DATA);
        let dashboard = Dashboard::new(backend, DashboardConfig::extended());
        block_on(dashboard.load_map());

        dashboard
            .backend()
            .fail(Endpoint::MapData, ApiError::transport(Endpoint::MapData, "offline"));
        let commands = block_on(dashboard.load_map());
        assert!(!commands
            .iter()
            .any(|c| matches!(c, RenderCommand::Map(MapCommand::Clear))));
        assert!(matches!(commands[0], RenderCommand::Status { panel: Panel::Map, .. }));
        assert_eq!(dashboard.state().map.stations().len(), 2);
    }

    #[test]
    fn toggle_is_ignored_without_classification() {
        let dashboard = Dashboard::new(MockBackend::new(), DashboardConfig::minimal());
        assert!(dashboard.toggle_render_mode().is_empty());
        assert_eq!(dashboard.state().map.mode(), RenderMode::Markers);
    }
}
