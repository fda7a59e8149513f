//! `transitboard watch`: the live dashboard.
//!
//! A one-second ticker drives the scheduler. Typing `r` and Enter asks for
//! a manual refresh; Ctrl-C exits.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use transitboard_core::{Config, Dashboard, DashboardEvent, Database};

use super::{flush_notices, open_dashboard, runtime, CliResult};
use crate::terminal::TerminalTarget;

const TICK: Duration = Duration::from_secs(1);

pub fn run(interval: Option<u64>, mut config: Config) -> CliResult {
    if let Some(secs) = interval {
        config.refresh.interval_secs = secs;
    }
    runtime()?.block_on(watch(config))
}

async fn watch(config: Config) -> CliResult {
    let target = TerminalTarget::new(std::io::stdout()).clear_between_frames(true);
    let mut dashboard = open_dashboard(&config, Box::new(target))?;
    tracing::info!(
        interval_secs = config.refresh_interval().as_secs(),
        "watching; type r + Enter to refresh, Ctrl-C to quit"
    );

    if let Some(event) = dashboard.start(Instant::now()).await {
        report(&mut dashboard, &event);
    }

    let mut ticker = tokio::time::interval(TICK);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = dashboard.tick(Instant::now()).await {
                    report(&mut dashboard, &event);
                }
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(input) if input.trim().eq_ignore_ascii_case("r") => {
                    let trigger = dashboard.scheduler().manual();
                    let event = dashboard.refresh_now(trigger).await;
                    report(&mut dashboard, &event);
                }
                Some(_) => {}
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    dashboard.suspend();
    Ok(())
}

fn report(dashboard: &mut Dashboard<Database>, event: &DashboardEvent) {
    match event {
        DashboardEvent::RefreshCoalesced { trigger, .. } => {
            tracing::debug!(%trigger, "refresh already running");
        }
        other => tracing::debug!(event = ?other, "dashboard event"),
    }
    flush_notices(dashboard);
}
