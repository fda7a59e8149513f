//! JSON and CSV export of the currently shown alerts.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::alert::{Alert, Borough, Severity};
use crate::error::{CoreError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn filename(&self) -> String {
        format!("subway-alerts.{}", self.extension())
    }

    /// Serialize `alerts` in this format.
    pub fn render(&self, alerts: &[Alert]) -> Result<String, CoreError> {
        match self {
            ExportFormat::Json => to_json(alerts),
            ExportFormat::Csv => Ok(to_csv(alerts)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("JSON"),
            ExportFormat::Csv => f.write_str("CSV"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ValidationError::InvalidValue {
                field: "format".into(),
                message: format!("unknown export format '{other}' (expected json or csv)"),
            }),
        }
    }
}

/// One exported row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub title: String,
    pub description: String,
    pub lines: String,
    pub severity: Severity,
    pub timestamp: String,
    pub affected_stations: String,
    pub is_rush_hour: bool,
    pub location: Borough,
    pub service_reliability: u8,
}

const CSV_HEADER: [&str; 9] = [
    "title",
    "description",
    "lines",
    "severity",
    "timestamp",
    "affectedStations",
    "isRushHour",
    "location",
    "serviceReliability",
];

impl From<&Alert> for ExportRecord {
    fn from(alert: &Alert) -> Self {
        Self {
            title: alert.title.clone(),
            description: alert.description.clone(),
            lines: alert.lines.join(", "),
            severity: alert.severity,
            timestamp: alert.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            affected_stations: alert.affected_stations.join(", "),
            is_rush_hour: alert.is_rush_hour,
            location: alert.location,
            service_reliability: alert.service_reliability,
        }
    }
}

impl ExportRecord {
    fn csv_fields(&self) -> [String; 9] {
        [
            self.title.clone(),
            self.description.clone(),
            self.lines.clone(),
            self.severity.as_str().to_string(),
            self.timestamp.clone(),
            self.affected_stations.clone(),
            self.is_rush_hour.to_string(),
            self.location.as_str().to_string(),
            self.service_reliability.to_string(),
        ]
    }
}

pub fn records(alerts: &[Alert]) -> Vec<ExportRecord> {
    alerts.iter().map(ExportRecord::from).collect()
}

/// Pretty-printed JSON array.
pub fn to_json(alerts: &[Alert]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(&records(alerts))?)
}

/// Header row, then one fully quoted row per alert. No alerts, no output.
pub fn to_csv(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return String::new();
    }
    let mut rows = Vec::with_capacity(alerts.len() + 1);
    rows.push(CSV_HEADER.join(","));
    for record in records(alerts) {
        let row: Vec<String> = record.csv_fields().iter().map(|f| quote(f)).collect();
        rows.push(row.join(","));
    }
    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::sample_alerts;
    use chrono::Utc;

    #[test]
    fn format_names() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.filename(), "subway-alerts.json");
        assert_eq!(ExportFormat::Csv.to_string(), "CSV");
    }

    #[test]
    fn json_uses_camel_case_rows() {
        let alerts = sample_alerts(Utc::now());
        let out = to_json(&alerts[..1]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let row = &parsed[0];
        assert_eq!(row["lines"], "4, 5, 6");
        assert_eq!(row["severity"], "critical");
        assert_eq!(row["affectedStations"], "Union Sq, 14 St, Astor Pl");
        assert_eq!(row["isRushHour"], true);
        assert_eq!(row["location"], "manhattan");
        assert_eq!(row["serviceReliability"], 65);
        assert!(out.contains('\n'));
    }

    #[test]
    fn csv_quotes_every_field() {
        let mut alerts = sample_alerts(Utc::now());
        alerts.truncate(2);
        alerts[1].title = "The \"L\" is out".into();
        let out = to_csv(&alerts);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("\"Service Disruption on 4, 5, 6 Lines\","));
        assert!(lines[1].ends_with(",\"true\",\"manhattan\",\"65\""));
        assert!(lines[2].starts_with("\"The \"\"L\"\" is out\","));
    }

    #[test]
    fn empty_exports() {
        assert_eq!(to_csv(&[]), "");
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
