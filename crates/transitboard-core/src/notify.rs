//! Transient user-facing notices.
//!
//! Notices stack in posting order and disappear on their own once their
//! display time has passed. Like the scheduler, the notifier owns no timer:
//! callers pass the current instant to [`Notifier::expire`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Display category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Longest a notice may stay on screen.
pub const MAX_DISPLAY: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Queue of visible notices.
#[derive(Debug, Clone)]
pub struct Notifier {
    display_for: Duration,
    queue: Vec<Notice>,
}

impl Notifier {
    /// Display times above [`MAX_DISPLAY`] are capped.
    pub fn new(display_for: std::time::Duration) -> Self {
        let millis = display_for.min(MAX_DISPLAY).as_millis() as i64;
        Self {
            display_for: Duration::milliseconds(millis),
            queue: Vec::new(),
        }
    }

    /// Show a message. Identical messages are not merged.
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        let notice = Notice {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            posted_at: now,
            expires_at: now
                .checked_add_signed(self.display_for)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        tracing::debug!(kind = %notice.kind, message = %notice.message, "notice posted");
        let id = notice.id;
        self.queue.push(notice);
        id
    }

    pub fn info(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        self.post(NoticeKind::Info, message, now)
    }

    pub fn success(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        self.post(NoticeKind::Success, message, now)
    }

    pub fn warning(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        self.post(NoticeKind::Warning, message, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        self.post(NoticeKind::Error, message, now)
    }

    /// Dismiss a notice early. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| n.id != id);
        self.queue.len() != before
    }

    /// Drop every notice whose display time is over and return them.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<Notice> {
        let (expired, live): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|n| n.is_expired(now));
        self.queue = live;
        expired
    }

    /// Notices still on screen at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        self.queue.iter().filter(move |n| !n.is_expired(now))
    }

    /// Take every queued notice, expired or not.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(3000))
    }
}
