use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::filter::FilterCriteria;
use crate::scheduler::RefreshTrigger;
use crate::storage::UiSettings;

/// Every dashboard state change produces an Event.
/// The CLI prints them; a GUI would poll for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    Refreshed {
        trigger: RefreshTrigger,
        /// Alerts held after the refresh.
        total: usize,
        /// Alerts passing the current filter.
        shown: usize,
        at: DateTime<Utc>,
    },
    /// The source failed; the previous alerts are still shown.
    RefreshFailed {
        trigger: RefreshTrigger,
        message: String,
        at: DateTime<Utc>,
    },
    /// A trigger arrived while another refresh held the slot.
    RefreshCoalesced {
        trigger: RefreshTrigger,
        at: DateTime<Utc>,
    },
    CriteriaChanged {
        criteria: FilterCriteria,
        shown: usize,
        at: DateTime<Utc>,
    },
    UiSettingsChanged {
        settings: UiSettings,
        at: DateTime<Utc>,
    },
    LocationAcquired {
        at: DateTime<Utc>,
    },
    LocationFailed {
        message: String,
        at: DateTime<Utc>,
    },
    PreferencesCleared {
        at: DateTime<Utc>,
    },
    Exported {
        format: ExportFormat,
        count: usize,
        at: DateTime<Utc>,
    },
}
