//! Command implementations for the SRA CLI.
//!
//! Each subcommand drives one engine pipeline against a live backend and
//! prints the render commands it produces as plain text.

use clap::{Subcommand, ValueEnum};
use log::info;
use sra_core::client::HttpBackend;
use sra_engine::config::AutofillSource;
use sra_engine::render::{AlertLevel, StatusLevel};
use sra_engine::{Dashboard, DashboardConfig, RenderCommand, Variant};

pub mod report;

/// Dashboard variant whose configuration the commands run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Minimal,
    Extended,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Minimal => Variant::Minimal,
            VariantArg::Extended => Variant::Extended,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List station names
    Stations,

    /// Fetch the GHI classification thresholds
    Thresholds,

    /// Place the map stations and print the map commands
    Map,

    /// Station info and monthly (or yearly average) chart for one station
    Details {
        #[arg(short, long)]
        station: String,

        /// Omit for the average of every known year
        #[arg(short, long)]
        year: Option<i32>,

        /// Parameters to chart (defaults to the first one available)
        #[arg(short, long, value_delimiter = ',')]
        params: Vec<String>,
    },

    /// Compare parameters across stations
    Compare {
        #[arg(short, long, value_delimiter = ',', required = true)]
        stations: Vec<String>,

        #[arg(short, long, value_delimiter = ',', required = true)]
        params: Vec<String>,

        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Mean/min/max/std of one parameter across stations
    Summary {
        #[arg(short, long, value_delimiter = ',', required = true)]
        stations: Vec<String>,

        #[arg(short, long)]
        param: String,

        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Prefill the prediction form, apply overrides and predict GHI
    Predict {
        /// Station for models that take one, and whose means prefill the form
        #[arg(short, long)]
        station: Option<String>,

        /// Field override, e.g. `--set dhi=118.2`
        #[arg(long = "set", value_parser = parse_assignment)]
        overrides: Vec<(String, String)>,
    },

    /// Dataset-wide feature means as prediction form values
    Averages,
}

/// Parse a `field=value` override.
pub fn parse_assignment(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected field=value, got '{input}'")),
    }
}

pub async fn run(base_url: &str, variant: VariantArg, command: Command) -> anyhow::Result<()> {
    let config = DashboardConfig::for_variant(variant.into());
    let dashboard = Dashboard::new(HttpBackend::new(base_url), config);
    info!("Running against {} ({:?})", base_url, variant);

    let commands = match command {
        Command::Stations => dashboard.load_stations().await,
        Command::Thresholds => {
            let commands = dashboard.load_thresholds().await;
            let thresholds = dashboard.state().thresholds;
            println!("GHI thresholds: low={} high={}", thresholds.low, thresholds.high);
            commands
        }
        Command::Map => {
            let mut commands = dashboard.init_map();
            if dashboard.config().classify_map {
                commands.extend(dashboard.load_thresholds().await);
            }
            commands.extend(dashboard.load_map().await);
            commands
        }
        Command::Details {
            station,
            year,
            params,
        } => {
            dashboard.select_year(year).await;
            dashboard.show_details_with_params(&station, params).await
        }
        Command::Compare {
            stations,
            params,
            year,
        } => dashboard.compare(stations, params, year).await,
        Command::Summary {
            stations,
            param,
            year,
        } => {
            dashboard.select_summary_param(&param);
            dashboard
                .compare(stations, vec![param], year)
                .await
                .into_iter()
                .filter(|c| {
                    matches!(
                        c,
                        RenderCommand::SummaryTable(_) | RenderCommand::Status { .. }
                    )
                })
                .collect()
        }
        Command::Predict { station, overrides } => {
            let mut commands = match station.as_deref() {
                Some(station) => dashboard.select_prediction_station(station).await,
                None => Vec::new(),
            };
            if dashboard.config().autofill == AutofillSource::Averages {
                commands.extend(dashboard.autofill_averages().await);
            }
            for (field, value) in overrides {
                if dashboard.config().feature_set.field(&field).is_none() {
                    anyhow::bail!("unknown prediction field '{field}'");
                }
                dashboard.set_field(&field, value);
            }
            commands.extend(dashboard.submit_prediction().await);
            commands
        }
        Command::Averages => dashboard.autofill_averages().await,
    };

    for line in commands.iter().flat_map(report::describe) {
        println!("{line}");
    }

    if let Some(message) = first_error(&commands) {
        anyhow::bail!("{message}");
    }
    Ok(())
}

/// The first error status among `commands`, or a danger-level prediction.
fn first_error(commands: &[RenderCommand]) -> Option<&str> {
    commands.iter().find_map(|command| match command {
        RenderCommand::Status {
            level: StatusLevel::Error,
            message,
            ..
        } => Some(message.as_str()),
        RenderCommand::PredictionResult { level, message }
            if *level == AlertLevel::Danger && message.starts_with("Prediction Error") =>
        {
            Some(message.as_str())
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sra_engine::render::Panel;

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment("dhi=118.2"),
            Ok(("dhi".to_string(), "118.2".to_string()))
        );
        assert_eq!(
            parse_assignment(" note = a=b "),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_assignment("dhi").is_err());
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn error_status_fails_the_command() {
        let commands = vec![
            RenderCommand::warning(Panel::Map, "Could not load GHI thresholds"),
            RenderCommand::error(Panel::Comparison, "Error loading comparison: boom"),
        ];
        assert_eq!(first_error(&commands), Some("Error loading comparison: boom"));
    }

    #[test]
    fn low_prediction_is_not_an_error() {
        let commands = vec![RenderCommand::PredictionResult {
            level: AlertLevel::Danger,
            message: "Predicted GHI: 120.00 Wh/m²".to_string(),
        }];
        assert_eq!(first_error(&commands), None);

        let rejected = vec![RenderCommand::PredictionResult {
            level: AlertLevel::Danger,
            message: "Prediction Error: model not loaded".to_string(),
        }];
        assert_eq!(first_error(&rejected), Some("Prediction Error: model not loaded"));
    }

    #[test]
    fn variant_arg_maps_to_variant() {
        assert_eq!(Variant::from(VariantArg::Minimal), Variant::Minimal);
        assert_eq!(Variant::from(VariantArg::Extended), Variant::Extended);
    }
}
