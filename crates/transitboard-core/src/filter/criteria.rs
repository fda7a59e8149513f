//! Filter criteria and their option types.
//!
//! Every option round-trips through its wire token (`FromStr`/`Display`),
//! which is also what the preference record stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::alert::{Borough, Severity};

/// Named bundle of line tokens offered as one filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineGroup {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "123")]
    L123,
    #[serde(rename = "456")]
    L456,
    #[serde(rename = "7")]
    L7,
    #[serde(rename = "ACE")]
    Ace,
    #[serde(rename = "BDFM")]
    Bdfm,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "JZ")]
    Jz,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "NQR")]
    Nqr,
    #[serde(rename = "S")]
    S,
}

impl LineGroup {
    pub const ALL: [LineGroup; 11] = [
        LineGroup::All,
        LineGroup::L123,
        LineGroup::L456,
        LineGroup::L7,
        LineGroup::Ace,
        LineGroup::Bdfm,
        LineGroup::G,
        LineGroup::Jz,
        LineGroup::L,
        LineGroup::Nqr,
        LineGroup::S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineGroup::All => "all",
            LineGroup::L123 => "123",
            LineGroup::L456 => "456",
            LineGroup::L7 => "7",
            LineGroup::Ace => "ACE",
            LineGroup::Bdfm => "BDFM",
            LineGroup::G => "G",
            LineGroup::Jz => "JZ",
            LineGroup::L => "L",
            LineGroup::Nqr => "NQR",
            LineGroup::S => "S",
        }
    }

    /// Line tokens in the bundle. Empty for `All`, which matches everything.
    ///
    /// W rides under NQR; it has no bundle of its own.
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            LineGroup::All => &[],
            LineGroup::L123 => &["1", "2", "3"],
            LineGroup::L456 => &["4", "5", "6"],
            LineGroup::L7 => &["7"],
            LineGroup::Ace => &["A", "C", "E"],
            LineGroup::Bdfm => &["B", "D", "F", "M"],
            LineGroup::G => &["G"],
            LineGroup::Jz => &["J", "Z"],
            LineGroup::L => &["L"],
            LineGroup::Nqr => &["N", "Q", "R", "W"],
            LineGroup::S => &["S"],
        }
    }

    pub fn contains(&self, line: &str) -> bool {
        self.members().contains(&line)
    }
}

impl fmt::Display for LineGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LineGroup::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown line group: {s}"))
    }
}

/// Severity option: a specific severity or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityFilter {
    #[default]
    All,
    Critical,
    Warning,
    Info,
}

impl SeverityFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityFilter::All => "all",
            SeverityFilter::Critical => "critical",
            SeverityFilter::Warning => "warning",
            SeverityFilter::Info => "info",
        }
    }

    /// The single severity this option selects, if any.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            SeverityFilter::All => None,
            SeverityFilter::Critical => Some(Severity::Critical),
            SeverityFilter::Warning => Some(Severity::Warning),
            SeverityFilter::Info => Some(Severity::Info),
        }
    }
}

impl From<Severity> for SeverityFilter {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => SeverityFilter::Critical,
            Severity::Warning => SeverityFilter::Warning,
            Severity::Info => SeverityFilter::Info,
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(SeverityFilter::All);
        }
        s.parse::<Severity>().map(SeverityFilter::from)
    }
}

/// Time-scope option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeScope {
    #[default]
    #[serde(rename = "all")]
    All,
    /// Unresolved at filter time.
    #[serde(rename = "active")]
    Active,
    /// Rush-hour flagged alerts.
    #[serde(rename = "rush")]
    RushHourOnly,
    /// Planned work. Currently means `severity == info`.
    #[serde(rename = "planned")]
    PlannedOnly,
}

impl TimeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeScope::All => "all",
            TimeScope::Active => "active",
            TimeScope::RushHourOnly => "rush",
            TimeScope::PlannedOnly => "planned",
        }
    }
}

impl fmt::Display for TimeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TimeScope::All),
            "active" => Ok(TimeScope::Active),
            "rush" | "rushHourOnly" => Ok(TimeScope::RushHourOnly),
            "planned" | "plannedOnly" => Ok(TimeScope::PlannedOnly),
            other => Err(format!("unknown time scope: {other}")),
        }
    }
}

/// Location option: everywhere, near the rider, or one borough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LocationScope {
    #[default]
    All,
    NearMe,
    Borough(Borough),
}

impl LocationScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationScope::All => "all",
            LocationScope::NearMe => "nearme",
            LocationScope::Borough(b) => b.as_str(),
        }
    }
}

impl fmt::Display for LocationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LocationScope::All),
            "nearme" => Ok(LocationScope::NearMe),
            other => other
                .parse::<Borough>()
                .map(LocationScope::Borough)
                .map_err(|_| format!("unknown location scope: {other}")),
        }
    }
}

impl TryFrom<String> for LocationScope {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocationScope> for String {
    fn from(scope: LocationScope) -> Self {
        scope.as_str().to_string()
    }
}

/// The session's filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub line_group: LineGroup,
    pub severity: SeverityFilter,
    pub time_scope: TimeScope,
    pub location_scope: LocationScope,
    /// Global toggle: only rush-hour alerts, on top of everything else.
    pub rush_hour_mode: bool,
}

impl FilterCriteria {
    /// True when no predicate narrows the alert list.
    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }
}
