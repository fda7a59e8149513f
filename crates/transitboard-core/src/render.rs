//! View model handed to whatever draws the dashboard.
//!
//! The filter never talks to a display. The dashboard builds a
//! [`DashboardView`] and passes it to an injected [`RenderTarget`].

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::alert::{line_color, Alert, Severity};
use crate::error::CoreError;
use crate::notify::Notice;
use crate::store::AlertStats;

pub const NO_ALERTS_TITLE: &str = "No Alerts Found";
pub const NO_ALERTS_MESSAGE: &str =
    "No service alerts match your current filters. Try adjusting your criteria or check back later.";

/// Coarse service-reliability band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl Reliability {
    pub fn from_percentage(pct: u8) -> Self {
        match pct {
            90.. => Reliability::Excellent,
            75..=89 => Reliability::Good,
            60..=74 => Reliability::Fair,
            40..=59 => Reliability::Poor,
            _ => Reliability::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reliability::Excellent => "Excellent",
            Reliability::Good => "Good",
            Reliability::Fair => "Fair",
            Reliability::Poor => "Poor",
            Reliability::VeryPoor => "Very Poor",
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBadge {
    pub line: String,
    pub color: String,
}

/// One alert, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub lines: Vec<LineBadge>,
    pub rush_hour: bool,
    pub stations: String,
    pub reliability: Reliability,
    pub estimated_resolution: Option<String>,
    pub distance: String,
    pub updated: String,
    pub borough: String,
}

impl AlertCard {
    pub fn from_alert(alert: &Alert, now: DateTime<Utc>) -> Self {
        Self {
            id: alert.id.clone(),
            title: alert.title.clone(),
            description: alert.description.clone(),
            severity: alert.severity,
            lines: alert
                .lines
                .iter()
                .map(|line| LineBadge {
                    line: line.clone(),
                    color: line_color(line).to_string(),
                })
                .collect(),
            rush_hour: alert.is_rush_hour,
            stations: alert.affected_stations.join(", "),
            reliability: Reliability::from_percentage(alert.service_reliability),
            estimated_resolution: alert
                .estimated_resolution
                .map(|at| format_clock_time(&at.with_timezone(&Local))),
            distance: format_miles(alert.walking_distance),
            updated: format_age(alert.timestamp, now),
            borough: alert.location.label().to_string(),
        }
    }
}

/// Everything a render target needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub cards: Vec<AlertCard>,
    pub stats: AlertStats,
    pub notices: Vec<Notice>,
    pub rendered_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn build(shown: &[Alert], stats: AlertStats, notices: Vec<Notice>, now: DateTime<Utc>) -> Self {
        Self {
            cards: shown.iter().map(|a| AlertCard::from_alert(a, now)).collect(),
            stats,
            notices,
            rendered_at: now,
        }
    }

    /// True when the "no alerts" placeholder should be drawn instead of cards.
    pub fn shows_placeholder(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The display layer.
pub trait RenderTarget {
    /// Draw one frame.
    ///
    /// # Errors
    /// Failures are logged by the caller and never abort a refresh.
    fn render(&mut self, view: &DashboardView) -> Result<(), CoreError>;
}

/// Keeps every frame it is given. Useful for tests and headless runs.
#[derive(Debug, Default)]
pub struct ViewRecorder {
    pub frames: Vec<DashboardView>,
}

impl ViewRecorder {
    pub fn last(&self) -> Option<&DashboardView> {
        self.frames.last()
    }
}

impl RenderTarget for ViewRecorder {
    fn render(&mut self, view: &DashboardView) -> Result<(), CoreError> {
        self.frames.push(view.clone());
        Ok(())
    }
}

/// Draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTarget;

impl RenderTarget for NullTarget {
    fn render(&mut self, _view: &DashboardView) -> Result<(), CoreError> {
        Ok(())
    }
}

/// "Just now", "12 min ago", "3 hours ago", or the date.
pub fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hours ago");
    }
    at.format("%m/%d/%Y").to_string()
}

/// 12-hour clock time, e.g. "3:05 PM".
pub fn format_clock_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%-I:%M %p").to_string()
}

pub fn format_miles(miles: f64) -> String {
    format!("{miles:.1} miles")
}
