//! Property-based tests for the filter engine.
//!
//! Arbitrary alert lists and criteria must always produce an in-order
//! subset, and filtering twice must change nothing.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use transitboard_core::filter::{filter, FilterContext};
use transitboard_core::{
    Alert, Borough, FilterCriteria, LineGroup, LocationFix, LocationScope, Severity,
    SeverityFilter, TimeScope,
};

// ──────────────────── strategies ────────────────────

fn arb_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "1", "2", "3", "4", "5", "6", "7", "A", "C", "E", "B", "D", "F", "M", "G", "J", "Z", "L",
        "N", "Q", "R", "W", "S", "X",
    ])
    .prop_map(|s| s.to_string())
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arb_borough() -> impl Strategy<Value = Borough> {
    prop::sample::select(Borough::ALL.to_vec())
}

fn arb_alert() -> impl Strategy<Value = Alert> {
    (
        prop::collection::vec(arb_line(), 1..4),
        arb_severity(),
        prop::option::of(-240i64..240),
        any::<bool>(),
        arb_borough(),
        0u8..=100,
        0.0f64..3.0,
    )
        .prop_map(|(lines, severity, resolves_in, rush, location, reliability, miles)| {
            let base = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
            Alert {
                id: String::new(),
                title: "generated".into(),
                description: String::new(),
                lines,
                severity,
                timestamp: base - Duration::minutes(30),
                affected_stations: vec!["Somewhere".into()],
                estimated_resolution: resolves_in.map(|m| base + Duration::minutes(m)),
                is_rush_hour: rush,
                location,
                service_reliability: reliability,
                walking_distance: miles,
            }
        })
}

fn arb_alerts() -> impl Strategy<Value = Vec<Alert>> {
    prop::collection::vec(arb_alert(), 0..20).prop_map(|mut alerts| {
        for (i, alert) in alerts.iter_mut().enumerate() {
            alert.id = i.to_string();
        }
        alerts
    })
}

fn arb_location_scope() -> impl Strategy<Value = LocationScope> {
    prop_oneof![
        Just(LocationScope::All),
        Just(LocationScope::NearMe),
        arb_borough().prop_map(LocationScope::Borough),
    ]
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::select(LineGroup::ALL.to_vec()),
        prop::sample::select(vec![
            SeverityFilter::All,
            SeverityFilter::Critical,
            SeverityFilter::Warning,
            SeverityFilter::Info,
        ]),
        prop::sample::select(vec![
            TimeScope::All,
            TimeScope::Active,
            TimeScope::RushHourOnly,
            TimeScope::PlannedOnly,
        ]),
        arb_location_scope(),
        any::<bool>(),
    )
        .prop_map(|(line_group, severity, time_scope, location_scope, rush_hour_mode)| {
            FilterCriteria {
                line_group,
                severity,
                time_scope,
                location_scope,
                rush_hour_mode,
            }
        })
}

fn arb_context() -> impl Strategy<Value = FilterContext> {
    any::<bool>().prop_map(|located| {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        FilterContext::new(now, located.then(|| LocationFix::new(40.75, -73.98)))
    })
}

// ──────────────────── properties ────────────────────

proptest! {
    #[test]
    fn output_is_ordered_subset(
        alerts in arb_alerts(),
        criteria in arb_criteria(),
        ctx in arb_context(),
    ) {
        let shown = filter(&alerts, &criteria, &ctx);
        prop_assert!(shown.len() <= alerts.len());

        // Every kept alert appears in the input, after the previous one.
        let mut cursor = alerts.iter();
        for kept in &shown {
            prop_assert!(cursor.any(|a| a == kept), "alert {} out of order or foreign", kept.id);
        }
    }

    #[test]
    fn default_criteria_keep_everything(alerts in arb_alerts(), ctx in arb_context()) {
        prop_assert_eq!(filter(&alerts, &FilterCriteria::default(), &ctx), alerts);
    }

    #[test]
    fn filtering_is_idempotent(
        alerts in arb_alerts(),
        criteria in arb_criteria(),
        ctx in arb_context(),
    ) {
        let once = filter(&alerts, &criteria, &ctx);
        let twice = filter(&once, &criteria, &ctx);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rush_mode_never_shows_off_peak(alerts in arb_alerts(), ctx in arb_context()) {
        let criteria = FilterCriteria { rush_hour_mode: true, ..FilterCriteria::default() };
        prop_assert!(filter(&alerts, &criteria, &ctx).iter().all(|a| a.is_rush_hour));
    }

    #[test]
    fn near_me_without_fix_is_empty(alerts in arb_alerts()) {
        let criteria = FilterCriteria {
            location_scope: LocationScope::NearMe,
            ..FilterCriteria::default()
        };
        let ctx = FilterContext::new(Utc::now(), None);
        prop_assert!(filter(&alerts, &criteria, &ctx).is_empty());
    }
}
