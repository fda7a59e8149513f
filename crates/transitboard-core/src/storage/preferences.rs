//! Persisted UI preferences.
//!
//! The whole record lives as one JSON object under [`PREFERENCES_KEY`].
//! Reading is forgiving: a missing or unrecognised field falls back to its
//! own default, and an unreadable record reads as "nothing saved".

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kv::KvStore;
use crate::error::CoreError;
use crate::filter::{FilterCriteria, LineGroup, LocationScope, SeverityFilter, TimeScope};

/// Storage key of the preference record.
pub const PREFERENCES_KEY: &str = "subway_alerts_preferences";

/// Saved preferences younger than this are announced on startup.
pub const RESTORE_NOTICE_WINDOW_MIN: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(FontSize::Small),
            "normal" => Ok(FontSize::Normal),
            "large" => Ok(FontSize::Large),
            other => Err(format!("unknown font size: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Display settings that ride along with the filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiSettings {
    pub sound_enabled: bool,
    pub theme: Theme,
    pub font_size: FontSize,
    pub language: Language,
}

/// Everything the preference store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub criteria: FilterCriteria,
    pub ui: UiSettings,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Preferences {
    /// Whole minutes since the record was saved, if that is under an hour.
    pub fn restored_minutes_ago(&self, now: DateTime<Utc>) -> Option<i64> {
        let minutes = (now - self.last_updated?).num_minutes();
        (0..RESTORE_NOTICE_WINDOW_MIN).contains(&minutes).then_some(minutes)
    }
}

/// On-disk shape. Flat, camelCase, every field independently optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceRecord {
    #[serde(default, deserialize_with = "or_default")]
    line_filter: LineGroup,
    #[serde(default, deserialize_with = "or_default")]
    severity_filter: SeverityFilter,
    #[serde(default, deserialize_with = "or_default")]
    time_filter: TimeScope,
    #[serde(default, deserialize_with = "or_default")]
    location_filter: LocationScope,
    #[serde(default, deserialize_with = "or_default")]
    rush_hour_mode: bool,
    #[serde(default, deserialize_with = "or_default")]
    sound_enabled: bool,
    #[serde(default, deserialize_with = "or_default")]
    theme: Theme,
    #[serde(default, deserialize_with = "or_default")]
    font_size: FontSize,
    #[serde(default, deserialize_with = "or_default")]
    language: Language,
    #[serde(default, deserialize_with = "or_default")]
    last_updated: Option<DateTime<Utc>>,
}

/// Deserialize a field, substituting its default for anything unreadable.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl From<&Preferences> for PreferenceRecord {
    fn from(p: &Preferences) -> Self {
        Self {
            line_filter: p.criteria.line_group,
            severity_filter: p.criteria.severity,
            time_filter: p.criteria.time_scope,
            location_filter: p.criteria.location_scope,
            rush_hour_mode: p.criteria.rush_hour_mode,
            sound_enabled: p.ui.sound_enabled,
            theme: p.ui.theme,
            font_size: p.ui.font_size,
            language: p.ui.language,
            last_updated: p.last_updated,
        }
    }
}

impl From<PreferenceRecord> for Preferences {
    fn from(r: PreferenceRecord) -> Self {
        Self {
            criteria: FilterCriteria {
                line_group: r.line_filter,
                severity: r.severity_filter,
                time_scope: r.time_filter,
                location_scope: r.location_filter,
                rush_hour_mode: r.rush_hour_mode,
            },
            ui: UiSettings {
                sound_enabled: r.sound_enabled,
                theme: r.theme,
                font_size: r.font_size,
                language: r.language,
            },
            last_updated: r.last_updated,
        }
    }
}

/// Reads and writes [`Preferences`] through a key-value backend.
pub struct PreferenceStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> PreferenceStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Persist the record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, prefs: &Preferences) -> Result<(), CoreError> {
        let json = serde_json::to_string(&PreferenceRecord::from(prefs))?;
        self.kv.kv_set(PREFERENCES_KEY, &json)?;
        Ok(())
    }

    /// Read the saved record. Never fails: anything unreadable is `None`.
    pub fn load(&self) -> Option<Preferences> {
        let raw = match self.kv.kv_get(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "could not read saved preferences");
                return None;
            }
        };
        match serde_json::from_str::<PreferenceRecord>(&raw) {
            Ok(record) => Some(record.into()),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unreadable preferences");
                None
            }
        }
    }

    pub fn load_or_default(&self) -> Preferences {
        self.load().unwrap_or_default()
    }

    /// Forget the saved record.
    ///
    /// # Errors
    /// Returns an error if the backend refuses the delete.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.kv.kv_remove(PREFERENCES_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Borough;
    use crate::storage::kv::MemoryKv;
    use chrono::Duration;

    fn store() -> PreferenceStore<MemoryKv> {
        PreferenceStore::new(MemoryKv::new())
    }

    #[test]
    fn nothing_saved_loads_none() {
        assert!(store().load().is_none());
        assert_eq!(store().load_or_default(), Preferences::default());
    }

    #[test]
    fn documented_defaults() {
        let p = Preferences::default();
        assert_eq!(p.criteria.line_group, LineGroup::All);
        assert_eq!(p.criteria.severity, SeverityFilter::All);
        assert_eq!(p.criteria.time_scope, TimeScope::All);
        assert_eq!(p.criteria.location_scope, LocationScope::All);
        assert!(!p.criteria.rush_hour_mode);
        assert!(!p.ui.sound_enabled);
        assert_eq!(p.ui.theme, Theme::Light);
        assert_eq!(p.ui.font_size, FontSize::Normal);
        assert_eq!(p.ui.language, Language::En);
    }

    #[test]
    fn save_then_load() {
        let store = store();
        let prefs = Preferences {
            criteria: FilterCriteria {
                line_group: LineGroup::Ace,
                severity: SeverityFilter::Critical,
                time_scope: TimeScope::RushHourOnly,
                location_scope: LocationScope::Borough(Borough::Queens),
                rush_hour_mode: true,
            },
            ui: UiSettings {
                sound_enabled: true,
                theme: Theme::Dark,
                font_size: FontSize::Large,
                language: Language::Es,
            },
            last_updated: Some(Utc::now()),
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load(), Some(prefs));
    }

    #[test]
    fn wire_format_uses_flat_camel_case_keys() {
        let store = store();
        store.save(&Preferences::default()).unwrap();
        let raw = store.backend().kv_get(PREFERENCES_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["lineFilter"], "all");
        assert_eq!(json["timeFilter"], "all");
        assert_eq!(json["rushHourMode"], false);
        assert_eq!(json["fontSize"], "normal");
    }

    #[test]
    fn corrupted_record_loads_as_nothing() {
        let store = store();
        store.backend().kv_set(PREFERENCES_KEY, "{not json").unwrap();
        assert!(store.load().is_none());
        assert_eq!(store.load_or_default(), Preferences::default());

        store.backend().kv_set(PREFERENCES_KEY, "42").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let store = store();
        store
            .backend()
            .kv_set(
                PREFERENCES_KEY,
                r#"{"lineFilter":"XYZ","severityFilter":"warning","theme":42,"timeFilter":null,"extra":"ignored"}"#,
            )
            .unwrap();
        let prefs = store.load().unwrap();
        assert_eq!(prefs.criteria.line_group, LineGroup::All);
        assert_eq!(prefs.criteria.severity, SeverityFilter::Warning);
        assert_eq!(prefs.criteria.time_scope, TimeScope::All);
        assert_eq!(prefs.ui.theme, Theme::Light);
        assert_eq!(prefs.ui.language, Language::En);
    }

    #[test]
    fn clear_removes_record() {
        let store = store();
        store.save(&Preferences::default()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn restore_notice_only_within_the_hour() {
        let now = Utc::now();
        let mut prefs = Preferences::default();
        assert_eq!(prefs.restored_minutes_ago(now), None);
        prefs.last_updated = Some(now - Duration::minutes(12));
        assert_eq!(prefs.restored_minutes_ago(now), Some(12));
        prefs.last_updated = Some(now - Duration::minutes(60));
        assert_eq!(prefs.restored_minutes_ago(now), None);
    }
}
