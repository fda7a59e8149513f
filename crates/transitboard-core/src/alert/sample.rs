//! The simulated alert feed.

use chrono::{DateTime, Duration, Utc};

use super::{Alert, Borough, Severity};

struct Row {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    lines: &'static [&'static str],
    severity: Severity,
    age_min: i64,
    stations: &'static [&'static str],
    resolves_in_min: Option<i64>,
    rush_hour: bool,
    location: Borough,
    reliability: u8,
    miles: f64,
}

const ROWS: [Row; 6] = [
    Row {
        id: "1",
        title: "Service Disruption on 4, 5, 6 Lines",
        description: "Due to signal problems at Union Square, expect delays in both directions. \
                      Trains are operating with increased travel time of 15-20 minutes.",
        lines: &["4", "5", "6"],
        severity: Severity::Critical,
        age_min: 30,
        stations: &["Union Sq", "14 St", "Astor Pl"],
        resolves_in_min: Some(60),
        rush_hour: true,
        location: Borough::Manhattan,
        reliability: 65,
        miles: 0.3,
    },
    Row {
        id: "2",
        title: "Weekend Service Changes",
        description: "L train is not running between 14 St-Union Sq and 8 Av due to planned \
                      maintenance work. Free shuttle bus service is available.",
        lines: &["L"],
        severity: Severity::Warning,
        age_min: 60,
        stations: &["14 St-Union Sq", "8 Av", "6 Av"],
        resolves_in_min: Some(240),
        rush_hour: false,
        location: Borough::Manhattan,
        reliability: 45,
        miles: 0.5,
    },
    Row {
        id: "3",
        title: "Express Service Running Local",
        description: "N and Q trains are running local in Manhattan due to track work. \
                      Allow extra travel time.",
        lines: &["N", "Q"],
        severity: Severity::Warning,
        age_min: 15,
        stations: &["Times Sq", "Herald Sq", "Union Sq"],
        resolves_in_min: Some(120),
        rush_hour: true,
        location: Borough::Manhattan,
        reliability: 75,
        miles: 0.2,
    },
    Row {
        id: "4",
        title: "Station Accessibility Update",
        description: "Elevator at 59 St-Columbus Circle is back in service. \
                      All station levels are now accessible.",
        lines: &["A", "B", "C", "D"],
        severity: Severity::Info,
        age_min: 10,
        stations: &["59 St-Columbus Circle"],
        resolves_in_min: None,
        rush_hour: false,
        location: Borough::Manhattan,
        reliability: 95,
        miles: 0.8,
    },
    Row {
        id: "5",
        title: "Rush Hour Express Service",
        description: "Additional 6 express trains are running during evening rush hours \
                      to reduce crowding.",
        lines: &["6"],
        severity: Severity::Info,
        age_min: 20,
        stations: &["Multiple stations"],
        resolves_in_min: Some(30),
        rush_hour: true,
        location: Borough::Manhattan,
        reliability: 85,
        miles: 0.1,
    },
    Row {
        id: "6",
        title: "Brooklyn Service Alert",
        description: "F train experiencing minor delays due to train traffic ahead. \
                      Expect 5-10 minute delays.",
        lines: &["F"],
        severity: Severity::Warning,
        age_min: 45,
        stations: &["Jay St", "Borough Hall", "Court St"],
        resolves_in_min: Some(30),
        rush_hour: false,
        location: Borough::Brooklyn,
        reliability: 80,
        miles: 1.2,
    },
];

/// The six sample alerts, timestamped relative to `now`.
pub fn sample_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    ROWS.iter()
        .map(|row| Alert {
            id: row.id.to_string(),
            title: row.title.to_string(),
            description: row.description.to_string(),
            lines: row.lines.iter().map(|l| l.to_string()).collect(),
            severity: row.severity,
            timestamp: now - Duration::minutes(row.age_min),
            affected_stations: row.stations.iter().map(|s| s.to_string()).collect(),
            estimated_resolution: row.resolves_in_min.map(|m| now + Duration::minutes(m)),
            is_rush_hour: row.rush_hour,
            location: row.location,
            service_reliability: row.reliability,
            walking_distance: row.miles,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_valid_alerts_with_unique_ids() {
        let alerts = sample_alerts(Utc::now());
        assert_eq!(alerts.len(), 6);
        assert!(alerts.iter().all(|a| a.validate().is_ok()));
        let mut ids: Vec<_> = alerts.iter().map(|a| a.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn times_are_relative_to_now() {
        let now = Utc::now();
        let alerts = sample_alerts(now);
        assert_eq!(alerts[0].timestamp, now - Duration::minutes(30));
        assert_eq!(alerts[0].estimated_resolution, Some(now + Duration::hours(1)));
        assert_eq!(alerts[3].estimated_resolution, None);
    }
}
