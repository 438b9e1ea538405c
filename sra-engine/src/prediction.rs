//! Prediction Form Client and form autofill.

use crate::config::AutofillSource;
use crate::dashboard::Dashboard;
use crate::generation::{Channel, Ticket};
use crate::render::{AlertLevel, FormValue, Panel, RenderCommand};
use crate::state::{FormState, PredictionStatus};
use log::{error, info, warn};
use serde_json::{Map, Value};
use sra_core::backend::Backend;
use sra_core::error::{ApiError, FormError};
use sra_core::prediction::{FeatureSet, PredictResponse};
use sra_data::numbers::{format_input, parse_finite};

/// A validated payload waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    ticket: Ticket,
    payload: Map<String, Value>,
}

impl PendingPrediction {
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

/// Build the flat `{feature: number}` payload, stopping at the first field
/// that is not a finite number.
pub fn build_payload(
    features: &FeatureSet,
    form: &FormState,
    station: Option<&str>,
) -> Result<Map<String, Value>, FormError> {
    let mut payload = Map::new();
    if let Some(key) = features.station_key {
        let station = station.ok_or(FormError::MissingStation)?;
        payload.insert(key.to_string(), Value::String(station.to_string()));
    }
    for field in features.fields {
        let raw = form.value(field.id);
        let value = parse_finite(raw).ok_or_else(|| FormError::InvalidNumber {
            field: field.id.to_string(),
            label: field.feature.to_string(),
            value: raw.to_string(),
        })?;
        payload.insert(field.feature.to_string(), Value::from(value));
    }
    Ok(payload)
}

impl<B: Backend> Dashboard<B> {
    pub fn set_field(&self, field: &str, value: impl Into<String>) {
        let value = value.into();
        self.with_state(|state| state.form.values.insert(field.to_string(), value));
    }

    /// Validate the form. On success the form is marked as submitting and
    /// the returned request is ready for [`Dashboard::send_prediction`].
    pub fn prepare_prediction(&self) -> Result<(PendingPrediction, RenderCommand), RenderCommand> {
        let features = self.config().feature_set;
        let built = self.with_state(|state| {
            build_payload(
                &features,
                &state.form,
                state.selection.prediction_station.as_deref(),
            )
        });
        match built {
            Ok(payload) => {
                let ticket = self.issue(Channel::Prediction);
                self.with_state(|state| state.form.status = PredictionStatus::Submitting);
                Ok((
                    PendingPrediction { ticket, payload },
                    RenderCommand::PredictionSubmitting,
                ))
            }
            Err(e) => {
                warn!("Prediction form rejected: {}", e);
                Err(RenderCommand::error(Panel::Prediction, e.to_string()))
            }
        }
    }

    pub async fn send_prediction(&self, pending: PendingPrediction) -> Vec<RenderCommand> {
        let response = self.backend().predict(&pending.payload).await;
        if !self.accept(pending.ticket) {
            return Vec::new();
        }

        let outcome = match response {
            Ok(PredictResponse::Prediction(value)) => Ok(value),
            Ok(PredictResponse::Rejected(reason)) => Err(ApiError::Backend(reason)),
            Err(e) => Err(e),
        };
        let (status, command) = match outcome {
            Ok(value) => {
                info!("Predicted GHI {:.2}", value);
                let level = if self.config().classify_prediction {
                    AlertLevel::from(self.state().thresholds.classify(value))
                } else {
                    AlertLevel::Success
                };
                let command = RenderCommand::PredictionResult {
                    level,
                    message: format!("Predicted GHI: {value:.2} Wh/m²"),
                };
                (PredictionStatus::Succeeded, command)
            }
            Err(ApiError::Backend(detail)) | Err(ApiError::Status { detail, .. }) => {
                warn!("Prediction rejected: {}", detail);
                let command = RenderCommand::PredictionResult {
                    level: AlertLevel::Danger,
                    message: format!("Prediction Error: {detail}"),
                };
                (PredictionStatus::Failed, command)
            }
            Err(e) => {
                error!("Prediction request failed: {}", e);
                let command =
                    RenderCommand::error(Panel::Prediction, format!("Prediction request failed: {e}"));
                (PredictionStatus::Failed, command)
            }
        };
        self.with_state(|state| state.form.status = status);
        vec![command]
    }

    /// Validate, then send. A validation failure issues no request.
    pub async fn submit_prediction(&self) -> Vec<RenderCommand> {
        match self.prepare_prediction() {
            Ok((pending, submitting)) => {
                let mut commands = vec![submitting];
                commands.extend(self.send_prediction(pending).await);
                commands
            }
            Err(command) => vec![command],
        }
    }

    /// Write `{feature: mean}` values into the matching form fields.
    /// Unknown features and null values leave the form untouched.
    fn apply_autofill(&self, values: &[(String, Option<f64>)]) -> Vec<RenderCommand> {
        let features = self.config().feature_set;
        let filled: Vec<FormValue> = values
            .iter()
            .filter_map(|(feature, value)| {
                let field = features.field_for_feature(feature)?;
                let value = value.filter(|v| v.is_finite())?;
                Some(FormValue {
                    field: field.id.to_string(),
                    value: format_input(value),
                })
            })
            .collect();
        if filled.is_empty() {
            return Vec::new();
        }
        self.with_state(|state| {
            for value in &filled {
                state
                    .form
                    .values
                    .insert(value.field.clone(), value.value.clone());
            }
        });
        vec![RenderCommand::FormValues { values: filled }]
    }

    /// Prefill the form with dataset-wide feature means.
    pub async fn autofill_averages(&self) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::Averages);
        let result = self.backend().average_values().await;
        if !self.accept(ticket) {
            return Vec::new();
        }
        match result {
            Ok(averages) => self.apply_autofill(&averages.0),
            Err(e) => {
                warn!("Failed to load average values: {}", e);
                vec![RenderCommand::warning(
                    Panel::Prediction,
                    format!("Could not load average values: {e}"),
                )]
            }
        }
    }

    /// Prefill the form with one station's mean values. Reuses the loaded
    /// detail snapshot when it covers the whole record of that station.
    pub(crate) async fn autofill_station_means(&self, station: &str) -> Vec<RenderCommand> {
        let ticket = self.issue(Channel::StationMeans);
        let loaded = self.with_state(|state| {
            state
                .detail
                .as_ref()
                .filter(|d| d.station == station && d.year.is_none())
                .map(|d| d.detail.mean_values.clone())
        });
        let result = match loaded {
            Some(means) => Ok(means),
            None => self
                .backend()
                .station_details(station, None)
                .await
                .map(|detail| detail.mean_values),
        };
        if !self.accept(ticket) {
            return Vec::new();
        }
        match result {
            Ok(means) => self.apply_autofill(&means),
            Err(e) => {
                warn!("Failed to load mean values for {}: {}", station, e);
                vec![RenderCommand::warning(
                    Panel::Prediction,
                    format!("Could not load mean values for {station}: {e}"),
                )]
            }
        }
    }

    pub async fn select_prediction_station(&self, station: &str) -> Vec<RenderCommand> {
        self.with_state(|state| state.selection.prediction_station = Some(station.to_string()));
        match self.config().autofill {
            AutofillSource::StationMeans => self.autofill_station_means(station).await,
            AutofillSource::Averages => Vec::new(),
        }
    }
}
