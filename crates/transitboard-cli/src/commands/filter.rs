use chrono::Utc;
use clap::Subcommand;
use transitboard_core::render::NullTarget;
use transitboard_core::{
    Config, Dashboard, DashboardEvent, Database, LineGroup, LocationScope, RefreshTrigger,
    SeverityFilter, TimeScope,
};

use super::{flush_notices, open_dashboard, print_event, runtime, CliResult, Switch};

#[derive(Subcommand)]
pub enum FilterAction {
    /// Print the saved filter criteria as JSON
    Show,
    /// Change one or more criteria
    Set {
        /// Line group (all, 123, 456, 7, ACE, BDFM, G, JZ, L, NQR, S)
        #[arg(long)]
        line: Option<LineGroup>,
        /// Severity (all, critical, warning, info)
        #[arg(long)]
        severity: Option<SeverityFilter>,
        /// Time scope (all, active, rush, planned)
        #[arg(long)]
        time: Option<TimeScope>,
        /// Location (all, nearme, manhattan, brooklyn, queens, bronx)
        #[arg(long)]
        location: Option<LocationScope>,
    },
    /// Rush hour mode: only show rush-hour alerts
    Rush {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Restore default criteria
    Reset,
}

pub fn run(action: FilterAction, config: &Config) -> CliResult {
    let mut dashboard = open_dashboard(config, Box::new(NullTarget))?;
    if let FilterAction::Show = action {
        println!("{}", serde_json::to_string_pretty(dashboard.criteria())?);
        return Ok(());
    }

    // Refresh first so the reported match count is real.
    runtime()?.block_on(dashboard.refresh_now(RefreshTrigger::Manual));
    dashboard.notifier_mut().drain();
    let event = apply(&mut dashboard, action);

    print_event(&event)?;
    flush_notices(&mut dashboard);
    Ok(())
}

fn apply(dashboard: &mut Dashboard<Database>, action: FilterAction) -> DashboardEvent {
    match action {
        FilterAction::Show => DashboardEvent::CriteriaChanged {
            criteria: *dashboard.criteria(),
            shown: dashboard.shown().len(),
            at: Utc::now(),
        },
        FilterAction::Set {
            line,
            severity,
            time,
            location,
        } => {
            let mut criteria = *dashboard.criteria();
            if let Some(line) = line {
                criteria.line_group = line;
            }
            if let Some(severity) = severity {
                criteria.severity = severity;
            }
            if let Some(time) = time {
                criteria.time_scope = time;
            }
            if let Some(location) = location {
                criteria.location_scope = location;
            }
            dashboard.set_criteria(criteria)
        }
        FilterAction::Rush { state } => {
            if state.flips(dashboard.criteria().rush_hour_mode) {
                dashboard.toggle_rush_hour_mode()
            } else {
                let criteria = *dashboard.criteria();
                dashboard.set_criteria(criteria)
            }
        }
        FilterAction::Reset => dashboard.reset_filters(),
    }
}
