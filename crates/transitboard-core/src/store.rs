//! Current alert collection and its derived statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::alert::{Alert, Severity, LINE_CATALOG};

/// Counters shown above the alert list.
///
/// Computed over the full collection, not the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertStats {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub rush_hour: usize,
    /// Catalog lines no critical alert references.
    pub good_service_lines: usize,
}

impl AlertStats {
    pub fn compute(alerts: &[Alert]) -> Self {
        let count = |severity: Severity| alerts.iter().filter(|a| a.severity == severity).count();

        let disrupted: HashSet<&str> = alerts
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .flat_map(|a| a.lines.iter().map(String::as_str))
            .collect();
        let good_service_lines = LINE_CATALOG
            .iter()
            .filter(|(line, _)| !disrupted.contains(line))
            .count();

        Self {
            critical: count(Severity::Critical),
            warning: count(Severity::Warning),
            info: count(Severity::Info),
            rush_hour: alerts.iter().filter(|a| a.is_rush_hour).count(),
            good_service_lines,
        }
    }
}

/// Holds the alert list between refreshes.
#[derive(Debug, Clone)]
pub struct AlertStore {
    alerts: Vec<Alert>,
    stats: AlertStats,
    last_refreshed: Option<DateTime<Utc>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            stats: AlertStats::compute(&[]),
            last_refreshed: None,
        }
    }

    /// Swap in a fresh collection. Invalid records are dropped.
    ///
    /// Returns the number of records dropped.
    pub fn replace(&mut self, alerts: Vec<Alert>, at: DateTime<Utc>) -> usize {
        let before = alerts.len();
        let kept: Vec<Alert> = alerts
            .into_iter()
            .filter(|alert| match alert.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(alert_id = %alert.id, error = %e, "dropping invalid alert");
                    false
                }
            })
            .collect();
        let dropped = before - kept.len();

        self.stats = AlertStats::compute(&kept);
        self.alerts = kept;
        self.last_refreshed = Some(at);
        dropped
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn stats(&self) -> AlertStats {
        self.stats
    }

    pub fn find(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::sample_alerts;

    #[test]
    fn sample_stats() {
        let stats = AlertStats::compute(&sample_alerts(Utc::now()));
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.warning, 3);
        assert_eq!(stats.info, 2);
        assert_eq!(stats.rush_hour, 3);
        assert_eq!(stats.good_service_lines, LINE_CATALOG.len() - 3);
    }

    #[test]
    fn empty_store_has_all_lines_in_good_service() {
        let store = AlertStore::new();
        assert!(store.is_empty());
        assert_eq!(store.stats().good_service_lines, 23);
        assert!(store.last_refreshed().is_none());
    }

    #[test]
    fn uncatalogued_critical_lines_do_not_reduce_good_service() {
        let mut alerts = sample_alerts(Utc::now());
        alerts[0].lines = vec!["X".into(), "4".into()];
        let stats = AlertStats::compute(&alerts);
        assert_eq!(stats.good_service_lines, 22);
    }

    #[test]
    fn replace_drops_invalid_records() {
        let now = Utc::now();
        let mut alerts = sample_alerts(now);
        alerts[1].affected_stations.clear();

        let mut store = AlertStore::new();
        assert_eq!(store.replace(alerts, now), 1);
        assert_eq!(store.len(), 5);
        assert!(store.find("2").is_none());
        assert_eq!(store.find("3").map(|a| a.lines.len()), Some(2));
        assert_eq!(store.last_refreshed(), Some(now));
    }

    #[test]
    fn replace_is_wholesale() {
        let now = Utc::now();
        let mut store = AlertStore::new();
        store.replace(sample_alerts(now), now);
        store.replace(sample_alerts(now).into_iter().take(2).collect(), now);
        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().critical, 1);
        assert_eq!(store.stats().warning, 1);
    }
}
