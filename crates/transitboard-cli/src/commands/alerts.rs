use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use transitboard_core::render::NullTarget;
use transitboard_core::{Config, DashboardEvent, ExportFormat, FixedLocation, LocationFix, RefreshTrigger};

use super::{flush_notices, open_dashboard, runtime, CliResult};
use crate::terminal;

#[derive(Subcommand)]
pub enum AlertsAction {
    /// Refresh once and print the alerts matching the saved filter
    List {
        /// Print alerts as JSON
        #[arg(long)]
        json: bool,
        /// Latitude for "near me" filtering
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude for "near me" filtering
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Print alert counters as JSON
    Stats,
    /// Print one alert as JSON
    Show {
        /// Alert ID
        id: String,
    },
    /// Export the alerts matching the saved filter
    Export {
        /// json or csv
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Write to this file (or into this directory) instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run(action: AlertsAction, config: &Config) -> CliResult {
    let mut dashboard = open_dashboard(config, Box::new(NullTarget))?;
    let rt = runtime()?;
    let event = rt.block_on(dashboard.refresh_now(RefreshTrigger::Manual));
    if let DashboardEvent::RefreshFailed { message, .. } = &event {
        tracing::warn!(%message, "showing previous alerts");
    }

    match action {
        AlertsAction::List { json, lat, lng } => {
            if let (Some(lat), Some(lng)) = (lat, lng) {
                dashboard.locate(&FixedLocation(LocationFix::new(lat, lng)));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(dashboard.shown())?);
            } else {
                let view = dashboard.view(Utc::now());
                terminal::print_view(&mut std::io::stdout().lock(), &view)?;
            }
        }
        AlertsAction::Stats => {
            println!("{}", serde_json::to_string_pretty(&dashboard.stats())?);
        }
        AlertsAction::Show { id } => {
            let alert = dashboard
                .find(&id)
                .ok_or_else(|| format!("alert not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(alert)?);
        }
        AlertsAction::Export { format, output } => {
            let file = dashboard.export(format)?;
            match output {
                Some(path) => {
                    let path = if path.is_dir() { path.join(&file.filename) } else { path };
                    std::fs::write(&path, &file.content)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{}", file.content),
            }
        }
    }

    flush_notices(&mut dashboard);
    Ok(())
}
