//! Alert filtering.
//!
//! [`filter`] is a pure function: it reads the clock and the location fix
//! from the [`FilterContext`] it is handed, never from ambient state.

mod criteria;

pub use criteria::{FilterCriteria, LineGroup, LocationScope, SeverityFilter, TimeScope};

use chrono::{DateTime, Utc};

use crate::alert::{Alert, Severity};
use crate::location::LocationFix;

/// Alerts closer than this many miles count as "near me".
pub const NEAR_ME_MILES: f64 = 1.0;

/// Everything outside the criteria that a filter pass depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterContext {
    pub now: DateTime<Utc>,
    pub location: Option<LocationFix>,
}

impl FilterContext {
    pub fn new(now: DateTime<Utc>, location: Option<LocationFix>) -> Self {
        Self { now, location }
    }

    /// Context at the current instant without a location fix.
    pub fn now() -> Self {
        Self::new(Utc::now(), None)
    }
}

/// Narrow `alerts` to those matching every predicate, keeping input order.
pub fn filter(alerts: &[Alert], criteria: &FilterCriteria, ctx: &FilterContext) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|alert| matches(alert, criteria, ctx))
        .cloned()
        .collect()
}

/// Whether a single alert passes all predicates.
pub fn matches(alert: &Alert, criteria: &FilterCriteria, ctx: &FilterContext) -> bool {
    matches_line_group(alert, criteria.line_group)
        && matches_severity(alert, criteria.severity)
        && matches_time_scope(alert, criteria.time_scope, ctx.now)
        && matches_location(alert, criteria.location_scope, ctx.location.as_ref())
        && matches_rush_hour_mode(alert, criteria.rush_hour_mode)
}

fn matches_line_group(alert: &Alert, group: LineGroup) -> bool {
    group == LineGroup::All || alert.lines.iter().any(|line| group.contains(line))
}

fn matches_severity(alert: &Alert, severity: SeverityFilter) -> bool {
    severity.severity().map_or(true, |s| s == alert.severity)
}

fn matches_time_scope(alert: &Alert, scope: TimeScope, now: DateTime<Utc>) -> bool {
    match scope {
        TimeScope::All => true,
        TimeScope::Active => alert.is_active_at(now),
        TimeScope::RushHourOnly => alert.is_rush_hour,
        // Planned work is not modeled separately; info alerts stand in for it.
        TimeScope::PlannedOnly => alert.severity == Severity::Info,
    }
}

fn matches_location(alert: &Alert, scope: LocationScope, fix: Option<&LocationFix>) -> bool {
    match scope {
        LocationScope::All => true,
        LocationScope::NearMe => fix.is_some() && alert.walking_distance < NEAR_ME_MILES,
        LocationScope::Borough(borough) => alert.location == borough,
    }
}

fn matches_rush_hour_mode(alert: &Alert, enabled: bool) -> bool {
    !enabled || alert.is_rush_hour
}
