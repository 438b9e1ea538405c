//! GHI prediction form.

use super::{PanelStatus, StationSelector};
use crate::state::{UiEvent, UiState};
use dioxus::prelude::*;
use sra_engine::render::Panel;
use sra_engine::DashboardConfig;

/// One numeric input per model feature, an optional station select and
/// the result box.
#[component]
pub fn PredictionForm() -> Element {
    let mut state = use_context::<UiState>();
    let config = use_context::<DashboardConfig>();
    let events = use_coroutine_handle::<UiEvent>();
    let values = state.form_values.read().clone();
    let submitting = (state.submitting)();
    let result = (state.prediction_result)();
    let fields = config.feature_set.fields;
    let with_station = config.feature_set.station_key.is_some();

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        events.send(UiEvent::SubmitPrediction);
    };

    rsx! {
        form {
            id: "predictionForm",
            onsubmit: on_submit,
            if with_station {
                StationSelector { prediction: true }
            }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 8px;",
                for field in fields.iter() {
                    label {
                        key: "{field.id}",
                        style: "display: flex; flex-direction: column; font-size: 12px;",
                        "{field.feature}"
                        input {
                            id: "{field.id}",
                            r#type: "number",
                            step: "any",
                            value: values.get(field.id).cloned().unwrap_or_default(),
                            oninput: move |evt: Event<FormData>| {
                                let value = evt.value();
                                state.form_values.write().insert(field.id.to_string(), value.clone());
                                events.send(UiEvent::SetField {
                                    field: field.id.to_string(),
                                    value,
                                });
                            },
                        }
                    }
                }
            }
            button {
                r#type: "submit",
                disabled: submitting,
                style: "margin-top: 12px; padding: 6px 16px;",
                if submitting { "Predicting..." } else { "Predict GHI" }
            }
        }
        div {
            id: "predictionResult",
            style: "margin-top: 8px;",
            PanelStatus { panel: Panel::Prediction }
            if let Some((level, message)) = result {
                div {
                    class: level.css_class(),
                    "{message}"
                }
            }
        }
    }
}
