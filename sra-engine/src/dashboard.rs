//! The dashboard handle and startup sequence.

use crate::config::{DashboardConfig, Loader};
use crate::generation::{Channel, Ticket};
use crate::render::RenderCommand;
use crate::state::AppState;
use futures::future::join_all;
use log::{debug, info};
use sra_core::backend::Backend;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Shared handle to the engine. Clones see the same state.
///
/// Every pipeline is an async method returning the render commands the
/// UI should apply, in order.
pub struct Dashboard<B> {
    backend: Rc<B>,
    config: Rc<DashboardConfig>,
    state: Rc<RefCell<AppState>>,
}

impl<B> Clone for Dashboard<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            config: Rc::clone(&self.config),
            state: Rc::clone(&self.state),
        }
    }
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B, config: DashboardConfig) -> Self {
        let state = AppState::new(&config);
        Self {
            backend: Rc::new(backend),
            config: Rc::new(config),
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    pub(crate) fn issue(&self, channel: Channel) -> Ticket {
        self.with_state(|state| state.generations.issue(channel))
    }

    pub(crate) fn invalidate(&self, channel: Channel) {
        self.with_state(|state| state.generations.invalidate(channel));
    }

    /// Whether a completed request may still touch the state.
    pub(crate) fn accept(&self, ticket: Ticket) -> bool {
        let current = self.state.borrow().generations.is_current(ticket);
        if !current {
            debug!(
                "Discarding stale {:?} response (generation {})",
                ticket.channel(),
                ticket.generation()
            );
        }
        current
    }

    /// Run one startup loader.
    pub async fn run_loader(&self, loader: Loader) -> Vec<RenderCommand> {
        match loader {
            Loader::Stations => self.load_stations().await,
            Loader::FirstStation => self.load_selected_station().await,
            Loader::Map => self.load_map().await,
            Loader::Thresholds => self.load_thresholds().await,
            Loader::ParameterOptions => self.load_parameter_options().await,
            Loader::Averages => self.autofill_averages().await,
        }
    }

    /// Run a loader, then its follow-up.
    async fn run_with_follow_up(&self, loader: Loader) -> Vec<RenderCommand> {
        let mut commands = self.run_loader(loader).await;
        if let Some(next) = loader.follow_up() {
            commands.extend(self.run_loader(next).await);
        }
        commands
    }

    /// Startup: tiles, then every startup loader in flight together.
    ///
    /// The browser spawns the same loaders one by one so each panel fills
    /// in as its response arrives; this collects them all.
    pub async fn bootstrap(&self) -> Vec<RenderCommand> {
        info!("Starting {:?} dashboard", self.config.variant);
        let mut commands = self.init_map();
        let runs = self
            .config
            .startup_loaders()
            .into_iter()
            .map(|loader| self.run_with_follow_up(loader));
        for loaded in join_all(runs).await {
            commands.extend(loaded);
        }
        commands
    }
}
