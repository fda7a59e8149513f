//! Refresh scheduling.
//!
//! The scheduler is a wall-clock state machine. It does not spawn tasks or
//! own a timer - the caller is responsible for calling `tick()` periodically
//! and for running the refresh a returned trigger asks for.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running <-> Suspended
//!               \-> Stopped
//! ```
//!
//! Whatever the trigger, a refresh only runs while it holds the single
//! [`RefreshPermit`]. Triggers that arrive while the permit is out are
//! coalesced into nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a refresh was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshTrigger {
    Startup,
    Timer,
    Manual,
    Resume,
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefreshTrigger::Startup => "startup",
            RefreshTrigger::Timer => "timer",
            RefreshTrigger::Manual => "manual",
            RefreshTrigger::Resume => "resume",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Stopped,
    Running,
    /// Timer cancelled because the view went away; resumes on demand.
    Suspended,
}

/// Single-slot gate: at most one refresh in flight.
#[derive(Debug, Clone, Default)]
pub struct RefreshSlot {
    busy: Arc<AtomicBool>,
}

impl RefreshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a refresh already holds it.
    pub fn try_acquire(&self, trigger: RefreshTrigger) -> Option<RefreshPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshPermit {
                busy: Arc::clone(&self.busy),
                trigger,
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the refresh slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct RefreshPermit {
    busy: Arc<AtomicBool>,
    trigger: RefreshTrigger,
}

impl RefreshPermit {
    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger
    }
}

impl Drop for RefreshPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Periodic refresh timer plus the refresh slot.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    state: SchedulerState,
    next_due: Option<Instant>,
    slot: RefreshSlot,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Stopped,
            next_due: None,
            slot: RefreshSlot::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_refreshing(&self) -> bool {
        self.slot.is_busy()
    }

    pub fn slot(&self) -> &RefreshSlot {
        &self.slot
    }

    /// Time left until the timer fires, if it is armed.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the timer. Returns the startup trigger for the first load.
    pub fn start(&mut self, now: Instant) -> Option<RefreshTrigger> {
        match self.state {
            SchedulerState::Stopped => {
                self.arm(now);
                Some(RefreshTrigger::Startup)
            }
            SchedulerState::Running | SchedulerState::Suspended => None,
        }
    }

    /// Cancel the timer while the view is hidden.
    pub fn suspend(&mut self) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }
        self.state = SchedulerState::Suspended;
        self.next_due = None;
        tracing::debug!("refresh timer suspended");
        true
    }

    /// Re-arm after a suspend and ask for an immediate refresh.
    pub fn resume(&mut self, now: Instant) -> Option<RefreshTrigger> {
        if self.state != SchedulerState::Suspended {
            return None;
        }
        self.arm(now);
        tracing::debug!("refresh timer resumed");
        Some(RefreshTrigger::Resume)
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.next_due = None;
    }

    /// Call periodically. Returns `Some(RefreshTrigger::Timer)` when the
    /// interval has elapsed. Missed intervals collapse into one trigger.
    pub fn tick(&mut self, now: Instant) -> Option<RefreshTrigger> {
        if self.state != SchedulerState::Running {
            return None;
        }
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(now + self.interval);
        Some(RefreshTrigger::Timer)
    }

    /// A user-requested refresh. Subject to the same slot as every other.
    pub fn manual(&self) -> RefreshTrigger {
        RefreshTrigger::Manual
    }

    /// Claim the refresh slot for `trigger`, or `None` if one is in flight.
    pub fn begin(&self, trigger: RefreshTrigger) -> Option<RefreshPermit> {
        let permit = self.slot.try_acquire(trigger);
        if permit.is_none() {
            tracing::debug!(%trigger, "refresh already in flight; trigger coalesced");
        }
        permit
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self, now: Instant) {
        self.state = SchedulerState::Running;
        self.next_due = Some(now + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(120);

    #[test]
    fn start_requests_startup_refresh_once() {
        let now = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        assert_eq!(s.state(), SchedulerState::Stopped);
        assert_eq!(s.start(now), Some(RefreshTrigger::Startup));
        assert_eq!(s.start(now), None);
        assert_eq!(s.state(), SchedulerState::Running);
    }

    #[test]
    fn tick_fires_on_interval() {
        let now = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.start(now);
        assert_eq!(s.tick(now + Duration::from_secs(119)), None);
        assert_eq!(s.tick(now + INTERVAL), Some(RefreshTrigger::Timer));
        assert_eq!(s.tick(now + INTERVAL), None);
        assert_eq!(s.time_until_next(now + INTERVAL), Some(INTERVAL));
    }

    #[test]
    fn missed_intervals_collapse() {
        let now = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.start(now);
        let late = now + INTERVAL * 5;
        assert_eq!(s.tick(late), Some(RefreshTrigger::Timer));
        assert_eq!(s.tick(late + Duration::from_secs(1)), None);
    }

    #[test]
    fn suspend_cancels_and_resume_refreshes_immediately() {
        let now = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.start(now);
        assert!(s.suspend());
        assert!(!s.suspend());
        assert_eq!(s.tick(now + INTERVAL * 2), None);
        assert_eq!(s.time_until_next(now), None);

        let back = now + INTERVAL * 3;
        assert_eq!(s.resume(back), Some(RefreshTrigger::Resume));
        assert_eq!(s.resume(back), None);
        assert_eq!(s.tick(back + INTERVAL), Some(RefreshTrigger::Timer));
    }

    #[test]
    fn stopped_scheduler_never_ticks() {
        let now = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        assert_eq!(s.tick(now + INTERVAL), None);
        s.start(now);
        s.stop();
        assert_eq!(s.tick(now + INTERVAL), None);
        assert_eq!(s.resume(now), None);
    }

    #[test]
    fn second_trigger_is_coalesced_while_permit_held() {
        let s = Scheduler::new(INTERVAL);
        let permit = s.begin(RefreshTrigger::Timer).expect("slot free");
        assert!(s.is_refreshing());
        assert!(s.begin(s.manual()).is_none());
        assert_eq!(permit.trigger(), RefreshTrigger::Timer);

        drop(permit);
        assert!(!s.is_refreshing());
        assert!(s.begin(RefreshTrigger::Manual).is_some());
    }

    #[test]
    fn cloned_scheduler_shares_the_slot() {
        let s = Scheduler::new(INTERVAL);
        let other = s.clone();
        let _permit = s.begin(RefreshTrigger::Manual).unwrap();
        assert!(other.begin(RefreshTrigger::Timer).is_none());
    }
}
