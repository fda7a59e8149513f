use clap::Subcommand;
use transitboard_core::render::NullTarget;
use transitboard_core::storage::{FontSize, Language, Theme};
use transitboard_core::Config;

use super::{flush_notices, open_dashboard, print_event, CliResult, Switch};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print display settings as JSON
    Show,
    /// Color theme: light, dark or toggle
    Theme { theme: String },
    /// Font size: small, normal or large
    Font { size: FontSize },
    /// Alert sounds
    Sound {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Interface language: en or es
    Language { language: Language },
    /// Forget every saved preference, filters included
    Clear,
}

pub fn run(action: PrefsAction, config: &Config) -> CliResult {
    let mut dashboard = open_dashboard(config, Box::new(NullTarget))?;
    let event = match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(dashboard.ui())?);
            return Ok(());
        }
        PrefsAction::Theme { theme } => match theme.as_str() {
            "toggle" => dashboard.toggle_theme(),
            other => dashboard.set_theme(other.parse::<Theme>()?),
        },
        PrefsAction::Font { size } => dashboard.set_font_size(size),
        PrefsAction::Sound { state } => {
            if state.flips(dashboard.ui().sound_enabled) {
                dashboard.toggle_sound()
            } else {
                dashboard.set_sound(dashboard.ui().sound_enabled)
            }
        }
        PrefsAction::Language { language } => dashboard.set_language(language),
        PrefsAction::Clear => dashboard.clear_preferences(),
    };

    print_event(&event)?;
    flush_notices(&mut dashboard);
    Ok(())
}
