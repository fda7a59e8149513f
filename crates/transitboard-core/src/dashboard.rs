//! The dashboard context.
//!
//! [`Dashboard`] owns every piece of session state and runs the refresh
//! cycle. Collaborators are handed in through [`Dashboard::new`]; nothing
//! here reaches for globals.
//!
//! Refresh steps always run in the same order:
//!
//! ```text
//! reload -> filter -> render -> stats -> notify
//! ```

use chrono::{DateTime, Utc};
use std::time::Instant;

use crate::alert::{Alert, Severity};
use crate::error::{CoreError, LocationError};
use crate::events::DashboardEvent;
use crate::export::ExportFormat;
use crate::filter::{self, FilterContext, FilterCriteria, LocationScope};
use crate::location::{LocationFix, LocationProvider};
use crate::notify::{Notice, Notifier};
use crate::render::{DashboardView, RenderTarget};
use crate::scheduler::{RefreshPermit, RefreshTrigger, Scheduler};
use crate::source::AlertSource;
use crate::storage::{Config, FontSize, KvStore, Language, PreferenceStore, Preferences, Theme, UiSettings};
use crate::store::{AlertStats, AlertStore};

pub const REFRESHED_MESSAGE: &str = "Alerts refreshed successfully!";
pub const RUSH_MODE_ON_MESSAGE: &str = "Rush Hour Mode ON";
pub const RUSH_MODE_OFF_MESSAGE: &str = "Rush Hour Mode OFF";
pub const SOUNDS_ENABLED_MESSAGE: &str = "Sounds enabled";
pub const SOUNDS_DISABLED_MESSAGE: &str = "Sounds disabled";
pub const PREFERENCES_CLEARED_MESSAGE: &str = "All preferences cleared!";
pub const LOCATION_FOUND_MESSAGE: &str = "Location found! Filtering nearby alerts.";
pub const LOCATION_ERROR_MESSAGE: &str = "Could not get location. Please enable location services.";
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Location not supported on this device.";

/// Result of [`Dashboard::export`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub content: String,
    pub event: DashboardEvent,
}

pub struct Dashboard<K: KvStore> {
    config: Config,
    source: Box<dyn AlertSource>,
    target: Box<dyn RenderTarget>,
    prefs: PreferenceStore<K>,
    store: AlertStore,
    notifier: Notifier,
    scheduler: Scheduler,
    criteria: FilterCriteria,
    ui: UiSettings,
    location: Option<LocationFix>,
    shown: Vec<Alert>,
}

impl<K: KvStore> Dashboard<K> {
    /// Build a dashboard and hydrate criteria and UI settings from saved
    /// preferences.
    pub fn new(
        config: Config,
        source: Box<dyn AlertSource>,
        target: Box<dyn RenderTarget>,
        prefs: PreferenceStore<K>,
    ) -> Self {
        let now = Utc::now();
        let mut notifier = Notifier::new(config.notice_duration());
        let saved = prefs.load();
        if let Some(minutes) = saved.as_ref().and_then(|p| p.restored_minutes_ago(now)) {
            notifier.info(format!("Settings restored from {minutes} minutes ago"), now);
        }
        let saved = saved.unwrap_or_default();
        tracing::debug!(criteria = ?saved.criteria, "preferences hydrated");

        Self {
            scheduler: Scheduler::new(config.refresh_interval()),
            config,
            source,
            target,
            prefs,
            store: AlertStore::new(),
            notifier,
            criteria: saved.criteria,
            ui: saved.ui,
            location: None,
            shown: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn ui(&self) -> &UiSettings {
        &self.ui
    }

    pub fn location(&self) -> Option<LocationFix> {
        self.location
    }

    /// Every alert currently held.
    pub fn alerts(&self) -> &[Alert] {
        self.store.alerts()
    }

    /// Alerts passing the current criteria.
    pub fn shown(&self) -> &[Alert] {
        &self.shown
    }

    pub fn stats(&self) -> AlertStats {
        self.store.stats()
    }

    pub fn find(&self, id: &str) -> Option<&Alert> {
        self.store.find(id)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.store.last_refreshed()
    }

    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        DashboardView::build(
            &self.shown,
            self.store.stats(),
            self.notifier.active(now).cloned().collect(),
            now,
        )
    }

    // ── Refresh cycle ────────────────────────────────────────────────

    /// Arm the timer and run the startup refresh.
    pub async fn start(&mut self, now: Instant) -> Option<DashboardEvent> {
        let trigger = self.scheduler.start(now)?;
        Some(self.refresh_now(trigger).await)
    }

    /// Drive the timer. Refreshes when the interval has elapsed.
    ///
    /// Every tick also drops notices whose display time is over.
    pub async fn tick(&mut self, now: Instant) -> Option<DashboardEvent> {
        self.expire_notices(Utc::now());
        let trigger = self.scheduler.tick(now)?;
        Some(self.refresh_now(trigger).await)
    }

    /// Stop the timer while nobody is looking.
    pub fn suspend(&mut self) -> bool {
        self.scheduler.suspend()
    }

    /// Restart the timer and refresh straight away.
    pub async fn resume(&mut self, now: Instant) -> Option<DashboardEvent> {
        let trigger = self.scheduler.resume(now)?;
        Some(self.refresh_now(trigger).await)
    }

    /// Refresh unless another refresh holds the slot.
    pub async fn refresh_now(&mut self, trigger: RefreshTrigger) -> DashboardEvent {
        match self.scheduler.begin(trigger) {
            Some(permit) => self.refresh(permit).await,
            None => DashboardEvent::RefreshCoalesced {
                trigger,
                at: Utc::now(),
            },
        }
    }

    /// Run one refresh cycle under `permit`.
    ///
    /// A failing source leaves the previous alerts in place.
    pub async fn refresh(&mut self, permit: RefreshPermit) -> DashboardEvent {
        let trigger = permit.trigger();
        tracing::debug!(%trigger, source = self.source.name(), "refresh started");

        let fetched = self.source.fetch().await;
        let now = Utc::now();
        self.expire_notices(now);

        let event = match fetched {
            Ok(alerts) => {
                let dropped = self.store.replace(alerts, now);
                self.apply_filter(now);
                self.render(now);
                let stats = self.store.stats();
                tracing::info!(
                    %trigger,
                    total = self.store.len(),
                    shown = self.shown.len(),
                    dropped,
                    critical = stats.critical,
                    "alerts refreshed"
                );

                for alert in self.store.alerts().iter().filter(|a| a.severity == Severity::Critical) {
                    self.notifier.warning(format!("Critical: {}", alert.title), now);
                }
                self.notifier.success(REFRESHED_MESSAGE, now);

                DashboardEvent::Refreshed {
                    trigger,
                    total: self.store.len(),
                    shown: self.shown.len(),
                    at: now,
                }
            }
            Err(e) => {
                tracing::info!(%trigger, error = %e, "refresh failed; keeping previous alerts");
                self.notifier.error(format!("Failed to refresh alerts: {e}"), now);
                DashboardEvent::RefreshFailed {
                    trigger,
                    message: e.to_string(),
                    at: now,
                }
            }
        };

        drop(permit);
        event
    }

    /// Remove notices that are no longer on screen at `now`.
    pub fn expire_notices(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        let expired = self.notifier.expire(now);
        if !expired.is_empty() {
            tracing::trace!(count = expired.len(), "notices expired");
        }
        expired
    }

    // ── Criteria ─────────────────────────────────────────────────────

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> DashboardEvent {
        self.criteria = criteria;
        self.criteria_changed()
    }

    pub fn toggle_rush_hour_mode(&mut self) -> DashboardEvent {
        self.criteria.rush_hour_mode = !self.criteria.rush_hour_mode;
        let message = if self.criteria.rush_hour_mode {
            RUSH_MODE_ON_MESSAGE
        } else {
            RUSH_MODE_OFF_MESSAGE
        };
        self.notifier.info(message, Utc::now());
        self.criteria_changed()
    }

    pub fn reset_filters(&mut self) -> DashboardEvent {
        self.criteria.reset();
        self.criteria_changed()
    }

    fn criteria_changed(&mut self) -> DashboardEvent {
        let now = Utc::now();
        self.apply_filter(now);
        self.render(now);
        self.persist(now);
        DashboardEvent::CriteriaChanged {
            criteria: self.criteria,
            shown: self.shown.len(),
            at: now,
        }
    }

    // ── UI settings ──────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) -> DashboardEvent {
        self.ui.theme = theme;
        self.ui_changed()
    }

    pub fn toggle_theme(&mut self) -> DashboardEvent {
        self.set_theme(self.ui.theme.toggled())
    }

    pub fn set_font_size(&mut self, size: FontSize) -> DashboardEvent {
        self.ui.font_size = size;
        self.ui_changed()
    }

    pub fn set_sound(&mut self, enabled: bool) -> DashboardEvent {
        self.ui.sound_enabled = enabled;
        let message = if enabled {
            SOUNDS_ENABLED_MESSAGE
        } else {
            SOUNDS_DISABLED_MESSAGE
        };
        self.notifier.info(message, Utc::now());
        self.ui_changed()
    }

    pub fn toggle_sound(&mut self) -> DashboardEvent {
        self.set_sound(!self.ui.sound_enabled)
    }

    pub fn set_language(&mut self, language: Language) -> DashboardEvent {
        self.ui.language = language;
        self.ui_changed()
    }

    fn ui_changed(&mut self) -> DashboardEvent {
        let now = Utc::now();
        self.render(now);
        self.persist(now);
        DashboardEvent::UiSettingsChanged {
            settings: self.ui,
            at: now,
        }
    }

    /// Forget saved preferences and return every setting to its default.
    pub fn clear_preferences(&mut self) -> DashboardEvent {
        let now = Utc::now();
        if let Err(e) = self.prefs.clear() {
            tracing::warn!(error = %e, "failed to clear saved preferences");
        }
        self.criteria = FilterCriteria::default();
        self.ui = UiSettings::default();
        self.apply_filter(now);
        self.render(now);
        self.notifier.info(PREFERENCES_CLEARED_MESSAGE, now);
        DashboardEvent::PreferencesCleared { at: now }
    }

    // ── Location ─────────────────────────────────────────────────────

    /// Ask `provider` for a fix. On success the location scope switches to
    /// "near me"; on failure the scope is left alone.
    pub fn locate(&mut self, provider: &dyn LocationProvider) -> DashboardEvent {
        let now = Utc::now();
        match provider.locate() {
            Ok(fix) => {
                tracing::debug!(lat = fix.lat, lng = fix.lng, "location acquired");
                self.location = Some(fix);
                self.criteria.location_scope = LocationScope::NearMe;
                self.notifier.success(LOCATION_FOUND_MESSAGE, now);
                self.apply_filter(now);
                self.render(now);
                self.persist(now);
                DashboardEvent::LocationAcquired { at: now }
            }
            Err(e) => {
                tracing::debug!(error = %e, "location unavailable");
                let message = match e {
                    LocationError::Unsupported => LOCATION_UNSUPPORTED_MESSAGE,
                    LocationError::Unavailable(_) => LOCATION_ERROR_MESSAGE,
                };
                self.notifier.error(message, now);
                DashboardEvent::LocationFailed {
                    message: e.to_string(),
                    at: now,
                }
            }
        }
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Serialize the shown alerts.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn export(&mut self, format: ExportFormat) -> Result<ExportedFile, CoreError> {
        let content = format.render(&self.shown)?;
        let now = Utc::now();
        let count = self.shown.len();
        self.notifier
            .success(format!("Exported {count} alerts as {format}"), now);
        Ok(ExportedFile {
            filename: format.filename(),
            content,
            event: DashboardEvent::Exported {
                format,
                count,
                at: now,
            },
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_filter(&mut self, now: DateTime<Utc>) {
        let ctx = FilterContext::new(now, self.location);
        self.shown = filter::filter(self.store.alerts(), &self.criteria, &ctx);
    }

    fn render(&mut self, now: DateTime<Utc>) {
        let view = self.view(now);
        if let Err(e) = self.target.render(&view) {
            tracing::warn!(error = %e, "render failed");
        }
    }

    fn persist(&self, now: DateTime<Utc>) {
        let prefs = Preferences {
            criteria: self.criteria,
            ui: self.ui,
            last_updated: Some(now),
        };
        if let Err(e) = self.prefs.save(&prefs) {
            tracing::warn!(error = %e, "failed to save preferences");
        }
    }
}
