//! Service alert records.
//!
//! An [`Alert`] is immutable once created. The refresh cycle replaces the
//! whole collection at once, so nothing here supports in-place edits.

mod catalog;
mod sample;

pub use catalog::{is_catalog_line, line_color, LINE_CATALOG, UNKNOWN_LINE_COLOR};
pub use sample::sample_alerts;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Borough an alert is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Borough {
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
}

impl Borough {
    pub const ALL: [Borough; 4] = [
        Borough::Manhattan,
        Borough::Brooklyn,
        Borough::Queens,
        Borough::Bronx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Borough::Manhattan => "manhattan",
            Borough::Brooklyn => "brooklyn",
            Borough::Queens => "queens",
            Borough::Bronx => "bronx",
        }
    }

    /// Display label ("Manhattan").
    pub fn label(&self) -> &'static str {
        match self {
            Borough::Manhattan => "Manhattan",
            Borough::Brooklyn => "Brooklyn",
            Borough::Queens => "Queens",
            Borough::Bronx => "Bronx",
        }
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Borough {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Borough::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("unknown borough: {s}"))
    }
}

/// A single transit service alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Line tokens ("4", "N", ...). Never empty.
    pub lines: Vec<String>,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    /// Never empty.
    pub affected_stations: Vec<String>,
    /// `None` means no known resolution time.
    pub estimated_resolution: Option<DateTime<Utc>>,
    pub is_rush_hour: bool,
    pub location: Borough,
    /// Percentage in 0..=100.
    pub service_reliability: u8,
    /// Miles from the rider.
    pub walking_distance: f64,
}

impl Alert {
    /// Check the record invariants.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyCollection(format!(
                "alert {} has no lines",
                self.id
            )));
        }
        if self.affected_stations.is_empty() {
            return Err(ValidationError::EmptyCollection(format!(
                "alert {} has no affected stations",
                self.id
            )));
        }
        if self.service_reliability > 100 {
            return Err(ValidationError::OutOfRange {
                field: "service_reliability".into(),
                value: f64::from(self.service_reliability),
                min: 0.0,
                max: 100.0,
            });
        }
        if !self.walking_distance.is_finite() || self.walking_distance < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "walking_distance".into(),
                value: self.walking_distance,
                min: 0.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }

    /// Whether the alert is still unresolved at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.estimated_resolution.map_or(true, |until| until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> Alert {
        sample_alerts(Utc::now()).remove(0)
    }

    #[test]
    fn sample_alert_is_valid() {
        assert!(alert().validate().is_ok());
    }

    #[test]
    fn empty_lines_rejected() {
        let mut a = alert();
        a.lines.clear();
        assert!(matches!(a.validate(), Err(ValidationError::EmptyCollection(_))));
    }

    #[test]
    fn empty_stations_rejected() {
        let mut a = alert();
        a.affected_stations.clear();
        assert!(matches!(a.validate(), Err(ValidationError::EmptyCollection(_))));
    }

    #[test]
    fn reliability_above_hundred_rejected() {
        let mut a = alert();
        a.service_reliability = 101;
        assert!(matches!(a.validate(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn negative_distance_rejected() {
        let mut a = alert();
        a.walking_distance = -0.1;
        assert!(a.validate().is_err());
        a.walking_distance = f64::NAN;
        assert!(a.validate().is_err());
    }

    #[test]
    fn active_depends_on_now() {
        let mut a = alert();
        let now = Utc::now();
        a.estimated_resolution = Some(now);
        assert!(!a.is_active_at(now));
        assert!(a.is_active_at(now - chrono::Duration::seconds(1)));
        a.estimated_resolution = None;
        assert!(a.is_active_at(now));
    }

    #[test]
    fn severity_and_borough_parse_their_own_output() {
        for s in Severity::ALL {
            assert_eq!(s.to_string().parse::<Severity>().unwrap(), s);
        }
        for b in Borough::ALL {
            assert_eq!(b.to_string().parse::<Borough>().unwrap(), b);
        }
        assert!("staten".parse::<Borough>().is_err());
    }
}
