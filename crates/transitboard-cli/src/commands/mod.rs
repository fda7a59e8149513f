pub mod alerts;
pub mod config;
pub mod filter;
pub mod prefs;
pub mod watch;

use clap::ValueEnum;
use transitboard_core::{
    Config, Dashboard, DashboardEvent, Database, PreferenceStore, RenderTarget, SimulatedSource,
};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// On/off argument for boolean settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

impl Switch {
    /// Whether applying this switch to `current` changes it.
    pub fn flips(self, current: bool) -> bool {
        match self {
            Switch::On => !current,
            Switch::Off => current,
            Switch::Toggle => true,
        }
    }
}

/// Dashboard over the on-disk preference store and the simulated feed.
pub fn open_dashboard(
    config: &Config,
    target: Box<dyn RenderTarget>,
) -> Result<Dashboard<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(Dashboard::new(
        config.clone(),
        Box::new(SimulatedSource::from_config(config)),
        target,
        PreferenceStore::new(db),
    ))
}

/// Single-threaded runtime for one-shot commands.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Move queued notices to stderr.
pub fn flush_notices(dashboard: &mut Dashboard<Database>) {
    for notice in dashboard.notifier_mut().drain() {
        eprintln!("[{}] {}", notice.kind, notice.message);
    }
}

pub fn print_event(event: &DashboardEvent) -> CliResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
