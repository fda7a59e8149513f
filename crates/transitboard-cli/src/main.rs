use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use transitboard_core::Config;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "transitboard", version, about = "Transit service alerts dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, inspect and export alerts
    Alerts {
        #[command(subcommand)]
        action: commands::alerts::AlertsAction,
    },
    /// Filter criteria
    Filter {
        #[command(subcommand)]
        action: commands::filter::FilterAction,
    },
    /// Display preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Live dashboard that refreshes on a timer
    Watch {
        /// Refresh interval in seconds (defaults to refresh.interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Log to stderr so stdout stays parseable. TRANSITBOARD_LOG wins over
/// the configured filter.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("TRANSITBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Alerts { action } => commands::alerts::run(action, &config),
        Commands::Filter { action } => commands::filter::run(action, &config),
        Commands::Prefs { action } => commands::prefs::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch { interval } => commands::watch::run(interval, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
